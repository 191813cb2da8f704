/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::time::Instant;

use aws_smithy_types::error::display::DisplayErrorContext;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use crate::error::{Error, ErrorKind, StorageAccess};
use crate::operation::send_notification::message::scan_summary;
use crate::types::{current_timestamp, ScanResult};
use crate::unit::round_to;
use crate::{Client, Config};

/// Response messages reported in [`InvocationResult::message`]
pub mod messages {
    /// The bucket does not exist
    pub const BUCKET_NOT_FOUND: &str = "S3 bucket not found";
    /// The bucket could not be listed with the function's permissions
    pub const ACCESS_DENIED: &str = "Access denied to S3 bucket";
    /// A required setting is missing
    pub const INVALID_CONFIG: &str = "Invalid configuration";
    /// Credentials are missing or were rejected
    pub const AUTHENTICATION_ERROR: &str = "Authentication error";
    /// The page ceiling was reached before the listing finished
    pub const SCAN_INCOMPLETE: &str = "S3 scan incomplete";
    /// Anything else
    pub const GENERAL_ERROR: &str = "An unexpected error occurred";
}

/// Status code reported for a successful invocation
pub const STATUS_OK: u16 = 200;

/// Status code reported for any failed invocation
pub const STATUS_ERROR: u16 = 500;

/// The payload returned from every invocation
///
/// `scan_results` is only present on success and `error` only on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResult {
    /// 200 on success, 500 on any failure
    pub status_code: u16,

    /// Human readable outcome
    pub message: String,

    /// Summary of the scan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_results: Option<ScanSummary>,

    /// Failure detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Scan details included in a successful [`InvocationResult`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    /// The scanned bucket
    pub bucket_name: String,
    /// Number of objects found
    pub object_count: usize,
    /// Seconds from invocation start until the notification stage
    pub scan_duration: f64,
    /// When the invocation completed
    pub timestamp: String,
}

impl InvocationResult {
    fn success(scan: &ScanResult, scan_duration: f64) -> Self {
        Self {
            status_code: STATUS_OK,
            message: format!(
                "S3 scan completed successfully. Found {} objects in {}",
                scan.object_count(),
                scan.bucket_name()
            ),
            scan_results: Some(ScanSummary {
                bucket_name: scan.bucket_name().to_owned(),
                object_count: scan.object_count(),
                scan_duration,
                timestamp: current_timestamp(),
            }),
            error: None,
        }
    }

    fn failure(message: &str, error: impl Into<String>) -> Self {
        Self {
            status_code: STATUS_ERROR,
            message: message.to_owned(),
            scan_results: None,
            error: Some(error.into()),
        }
    }

    /// True when the invocation succeeded
    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }
}

/// Run one invocation: validate configuration, scan the bucket, publish a notification.
///
/// Never fails, every error is converted into a 500 [`InvocationResult`].
pub async fn handle(client: &Client, request_id: &str) -> InvocationResult {
    let span = tracing::info_span!("invocation", request_id = %request_id);
    run(client, request_id).instrument(span).await
}

async fn run(client: &Client, request_id: &str) -> InvocationResult {
    let config = client.config();
    tracing::info!(
        "starting {} v{} (log level {})",
        config.app_name(),
        config.app_version(),
        config.max_level()
    );
    tracing::info!("request ID: {request_id}");

    let start = Instant::now();
    match invoke(client, start).await {
        Ok(result) => result,
        Err(err) => error_response(config, &err),
    }
}

async fn invoke(client: &Client, start: Instant) -> Result<InvocationResult, Error> {
    client.config().validate()?;

    tracing::info!("starting S3 bucket scan");
    let scan = client.scan_bucket().send().await?;
    tracing::info!(
        "S3 scan completed successfully. Found {} objects",
        scan.object_count()
    );

    let duration = round_to(start.elapsed().as_secs_f64(), 2);
    let scan = scan.with_scan_duration(duration);
    tracing::info!("{}", scan_summary(scan.objects(), duration));

    tracing::info!("sending notification");
    client.send_notification().scan_result(&scan).send().await?;
    tracing::info!("notification sent successfully");

    tracing::info!("execution completed successfully in {duration} seconds");
    Ok(InvocationResult::success(&scan, duration))
}

/// Map an error from any stage to the response payload.
pub fn error_response(config: &Config, err: &Error) -> InvocationResult {
    use messages::*;

    let bucket = config.bucket_name();
    let result = match err.kind() {
        ErrorKind::ConfigurationInvalid => {
            InvocationResult::failure(INVALID_CONFIG, format!("Configuration error: {}", detail(err)))
        }
        ErrorKind::StorageAccess(StorageAccess::NoSuchBucket) => InvocationResult::failure(
            BUCKET_NOT_FOUND,
            format!("Bucket '{bucket}' does not exist"),
        ),
        ErrorKind::StorageAccess(StorageAccess::AccessDenied) => InvocationResult::failure(
            ACCESS_DENIED,
            format!("Insufficient permissions for bucket '{bucket}'"),
        ),
        ErrorKind::StorageAccess(StorageAccess::InvalidBucketName)
        | ErrorKind::Transport
        | ErrorKind::TopicNotFound => match err.code() {
            Some(code) => InvocationResult::failure(
                GENERAL_ERROR,
                format!("AWS Error: {code} - {}", err.message().unwrap_or_default()),
            ),
            None => InvocationResult::failure(
                GENERAL_ERROR,
                format!("Unexpected error: {}", DisplayErrorContext(err)),
            ),
        },
        ErrorKind::CredentialsUnavailable => {
            InvocationResult::failure(AUTHENTICATION_ERROR, "AWS credentials not found or invalid")
        }
        ErrorKind::ValidationFailed => {
            InvocationResult::failure(GENERAL_ERROR, format!("Unexpected error: {}", detail(err)))
        }
        ErrorKind::ScanIncomplete => InvocationResult::failure(SCAN_INCOMPLETE, detail(err)),
    };

    tracing::error!(
        "{}: {}",
        result.message,
        result.error.as_deref().unwrap_or_default()
    );
    result
}

/// The innermost description of what went wrong
fn detail(err: &Error) -> String {
    std::error::Error::source(err)
        .map(ToString::to_string)
        .unwrap_or_else(|| err.to_string())
}
