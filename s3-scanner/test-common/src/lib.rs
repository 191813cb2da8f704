/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use aws_sdk_s3::types::Object;
use aws_sdk_sns::operation::publish::PublishOutput;
use aws_smithy_mocks_experimental::{mock, Rule};
use aws_smithy_runtime::client::http::test_util::infallible_client_fn;
use aws_smithy_runtime_api::client::http::SharedHttpClient;
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
use aws_smithy_runtime_api::http::StatusCode;
use aws_smithy_types::body::SdkBody;
use aws_smithy_types::DateTime;

/// Bucket name used by [`config_builder`]
pub const TEST_BUCKET: &str = "test-bucket";

/// Account ID used by [`config_builder`]
pub const TEST_ACCOUNT_ID: &str = "123456789012";

/// Topic ARN derived from the settings in [`config_builder`]
pub const TEST_TOPIC_ARN: &str = "arn:aws:sns:us-east-1:123456789012:S3ScannerNotifications";

/// Create an S3 object listing entry
pub fn object(key: &str, size: i64, last_modified: Option<i64>) -> Object {
    Object::builder()
        .key(key)
        .size(size)
        .set_last_modified(last_modified.map(DateTime::from_secs))
        .build()
}

/// A single `ListObjectsV2` page
pub fn list_page(
    truncated: bool,
    next_token: Option<&str>,
    objects: Vec<Object>,
) -> ListObjectsV2Output {
    list_page_with(truncated, next_token, Some(objects))
}

/// A `ListObjectsV2` page, `None` leaves out the `Contents` element entirely the way S3 does
/// for an empty listing
pub fn list_page_with(
    truncated: bool,
    next_token: Option<&str>,
    objects: Option<Vec<Object>>,
) -> ListObjectsV2Output {
    ListObjectsV2Output::builder()
        .is_truncated(truncated)
        .set_next_continuation_token(next_token.map(str::to_owned))
        .key_count(objects.as_ref().map_or(0, |o| o.len() as i32))
        .set_contents(objects)
        .build()
}

/// Mock bucket listed over one or more pages.
///
/// Every page after the first is only served to a request carrying the continuation token
/// returned with the page before it.
#[derive(Debug, Default)]
pub struct MockBucket {
    pages: Vec<Option<Vec<Object>>>,
}

impl MockBucket {
    /// Create an empty bucket, listed as a single page without a `Contents` element
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page with the given objects
    pub fn page(mut self, objects: Vec<Object>) -> Self {
        self.pages.push(Some(objects));
        self
    }

    /// Add a page that carries no `Contents` element
    pub fn page_without_contents(mut self) -> Self {
        self.pages.push(None);
        self
    }

    /// Continuation token returned with page `index`
    pub fn token(index: usize) -> String {
        format!("token-{}", index + 1)
    }

    /// The `ListObjectsV2` rules for this bucket, to be used with `RuleMode::Sequential`
    pub fn rules(&self) -> Vec<Rule> {
        let pages = if self.pages.is_empty() {
            vec![None]
        } else {
            self.pages.clone()
        };
        let last = pages.len() - 1;

        pages
            .into_iter()
            .enumerate()
            .map(|(index, objects)| {
                let expected_token = index.checked_sub(1).map(Self::token);
                let next_token = (index < last).then(|| Self::token(index));
                let output =
                    list_page_with(next_token.is_some(), next_token.as_deref(), objects);

                mock!(aws_sdk_s3::Client::list_objects_v2)
                    .match_requests(move |r| {
                        r.bucket() == Some(TEST_BUCKET)
                            && r.max_keys() == Some(1000)
                            && r.continuation_token() == expected_token.as_deref()
                    })
                    .then_output(move || output.clone())
            })
            .collect()
    }
}

/// `ListObjectsV2` fails with the given S3 error code and HTTP status
pub fn list_objects_error_rule(status: u16, code: &'static str) -> Rule {
    mock!(aws_sdk_s3::Client::list_objects_v2).then_http_response(move || {
        s3_error_response(status, code, "mocked failure")
    })
}

fn s3_error_response(status: u16, code: &str, message: &str) -> HttpResponse {
    let body = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Error><Code>{code}</Code><Message>{message}</Message><RequestId>test-request</RequestId></Error>"
    );
    HttpResponse::new(
        StatusCode::try_from(status).unwrap(),
        SdkBody::from(body),
    )
}

/// `Publish` succeeds with the given message ID
pub fn publish_rule(message_id: &'static str) -> Rule {
    mock!(aws_sdk_sns::Client::publish)
        .then_output(move || PublishOutput::builder().message_id(message_id).build())
}

/// `Publish` fails with the given SNS error code and HTTP status
pub fn publish_error_rule(status: u16, code: &'static str) -> Rule {
    mock!(aws_sdk_sns::Client::publish).then_http_response(move || {
        let body = format!(
            "<ErrorResponse xmlns=\"http://sns.amazonaws.com/doc/2010-03-31/\"><Error><Type>Sender</Type><Code>{code}</Code><Message>mocked failure</Message></Error><RequestId>test-request</RequestId></ErrorResponse>"
        );
        HttpResponse::new(
            StatusCode::try_from(status).unwrap(),
            SdkBody::from(body),
        )
    })
}

/// HTTP client answering every request with an empty `200 OK`.
///
/// `then_http_response` rules replace the response after it was received, so requests must
/// never reach the network.
fn stubbed_http_client() -> SharedHttpClient {
    infallible_client_fn(|_req| http_02x::Response::builder().status(200).body("").unwrap())
}

/// Rebuild a (mocked) S3 client so it never leaves the process
pub fn offline_s3(client: aws_sdk_s3::Client) -> aws_sdk_s3::Client {
    aws_sdk_s3::Client::from_conf(
        client
            .config()
            .to_builder()
            .http_client(stubbed_http_client())
            .build(),
    )
}

/// Rebuild a (mocked) SNS client so it never leaves the process
pub fn offline_sns(client: aws_sdk_sns::Client) -> aws_sdk_sns::Client {
    aws_sdk_sns::Client::from_conf(
        client
            .config()
            .to_builder()
            .http_client(stubbed_http_client())
            .build(),
    )
}

/// A fully populated scanner config builder backed by the given (mocked) clients.
///
/// Both clients are made offline with [`offline_s3`] and [`offline_sns`].
pub fn config_builder(
    s3_client: aws_sdk_s3::Client,
    sns_client: aws_sdk_sns::Client,
) -> s3_scanner::config::Builder {
    s3_scanner::Config::builder()
        .region("us-east-1")
        .account_id(TEST_ACCOUNT_ID)
        .bucket_name(TEST_BUCKET)
        .notification_email("ops@example.com")
        .app_version("1.0.0")
        .s3_client(offline_s3(s3_client))
        .sns_client(offline_sns(sns_client))
}
