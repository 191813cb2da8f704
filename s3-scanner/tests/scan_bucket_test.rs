/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_mocks_experimental::{mock, mock_client, RuleMode};
use s3_scanner::error::{ErrorKind, StorageAccess};
use test_common::{
    config_builder, list_objects_error_rule, list_page, object, MockBucket, TEST_BUCKET,
};

fn scanner(s3: aws_sdk_s3::Client) -> s3_scanner::Client {
    let sns = mock_client!(aws_sdk_sns, RuleMode::MatchAny, &[&test_common::publish_rule("unused")]);
    s3_scanner::Client::new(config_builder(s3, sns).build().unwrap())
}

fn keys(scan: &s3_scanner::types::ScanResult) -> Vec<&str> {
    scan.objects().iter().map(|o| o.key()).collect()
}

/// A listing spread over several pages is requested page by page, each request carrying the
/// token from the page before it, and the records come back in listing order
#[tokio::test]
async fn test_scan_follows_continuation_tokens() {
    let bucket = MockBucket::new()
        .page(vec![object("a.txt", 1, Some(1_736_937_045)), object("b.txt", 2, None)])
        .page(vec![object("c/d.json", 3, None)])
        .page(vec![object("e.bin", 4, None), object("f.bin", 5, None)]);
    let rules = bucket.rules();
    let s3 = mock_client!(aws_sdk_s3, RuleMode::Sequential, rules.as_slice());

    let scan = scanner(s3).scan_bucket().send().await.unwrap();

    for rule in &rules {
        assert_eq!(1, rule.num_calls());
    }
    assert_eq!(TEST_BUCKET, scan.bucket_name());
    assert_eq!(5, scan.object_count());
    assert_eq!(
        vec!["a.txt", "b.txt", "c/d.json", "e.bin", "f.bin"],
        keys(&scan)
    );
    assert_eq!(15, scan.total_size());
    assert_eq!(None, scan.scan_duration());
    assert!(scan.scan_timestamp().ends_with('Z'));
}

#[tokio::test]
async fn test_scan_empty_bucket() {
    let rules = MockBucket::new().rules();
    let s3 = mock_client!(aws_sdk_s3, RuleMode::Sequential, rules.as_slice());

    let scan = scanner(s3).scan_bucket().send().await.unwrap();

    assert_eq!(1, rules[0].num_calls());
    assert_eq!(0, scan.object_count());
    assert!(scan.objects().is_empty());
}

/// A page without a `Contents` element in the middle of a listing contributes nothing
#[tokio::test]
async fn test_scan_page_without_contents() {
    let rules = MockBucket::new()
        .page(vec![object("a", 1, None)])
        .page_without_contents()
        .page(vec![object("b", 2, None)])
        .rules();
    let s3 = mock_client!(aws_sdk_s3, RuleMode::Sequential, rules.as_slice());

    let scan = scanner(s3).scan_bucket().send().await.unwrap();

    for rule in &rules {
        assert_eq!(1, rule.num_calls());
    }
    assert_eq!(vec!["a", "b"], keys(&scan));
    assert_eq!(3, scan.total_size());
}

/// A bucket given on the operation overrides the configured bucket
#[tokio::test]
async fn test_scan_explicit_bucket() {
    let list = mock!(aws_sdk_s3::Client::list_objects_v2)
        .match_requests(|r| r.bucket() == Some("other-bucket"))
        .then_output(|| list_page(false, None, vec![object("x", 7, None)]));
    let s3 = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&list]);

    let scan = scanner(s3)
        .scan_bucket()
        .bucket("other-bucket")
        .send()
        .await
        .unwrap();

    assert_eq!("other-bucket", scan.bucket_name());
    assert_eq!(vec!["x"], keys(&scan));
}

#[tokio::test]
async fn test_scan_missing_bucket() {
    let rule = list_objects_error_rule(404, "NoSuchBucket");
    let s3 = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&rule]);

    let err = scanner(s3).scan_bucket().send().await.unwrap_err();

    assert_eq!(
        &ErrorKind::StorageAccess(StorageAccess::NoSuchBucket),
        err.kind()
    );
}

#[tokio::test]
async fn test_scan_access_denied() {
    let rule = list_objects_error_rule(403, "AccessDenied");
    let s3 = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&rule]);

    let err = scanner(s3).scan_bucket().send().await.unwrap_err();

    assert_eq!(
        &ErrorKind::StorageAccess(StorageAccess::AccessDenied),
        err.kind()
    );
    assert_eq!(1, rule.num_calls());
}

#[tokio::test]
async fn test_scan_rejected_credentials() {
    let rule = list_objects_error_rule(403, "InvalidAccessKeyId");
    let s3 = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&rule]);

    let err = scanner(s3).scan_bucket().send().await.unwrap_err();

    assert_eq!(&ErrorKind::CredentialsUnavailable, err.kind());
}

/// A failure part way through the listing discards what was collected so far
#[tokio::test]
async fn test_scan_fails_on_later_page() {
    let first = mock!(aws_sdk_s3::Client::list_objects_v2)
        .match_requests(|r| r.continuation_token().is_none())
        .then_output(|| list_page(true, Some("token-1"), vec![object("a", 1, None)]));
    let second = list_objects_error_rule(403, "AccessDenied");
    let s3 = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&first, &second]);

    let err = scanner(s3).scan_bucket().send().await.unwrap_err();

    assert_eq!(
        &ErrorKind::StorageAccess(StorageAccess::AccessDenied),
        err.kind()
    );
    assert_eq!(1, first.num_calls());
    assert_eq!(1, second.num_calls());
}

#[tokio::test]
async fn test_scan_page_ceiling() {
    let rules = MockBucket::new()
        .page(vec![object("a", 1, None)])
        .page(vec![object("b", 1, None)])
        .page(vec![object("c", 1, None)])
        .rules();
    let s3 = mock_client!(aws_sdk_s3, RuleMode::Sequential, rules.as_slice());

    let err = scanner(s3)
        .scan_bucket()
        .max_pages(2)
        .send()
        .await
        .unwrap_err();

    assert_eq!(&ErrorKind::ScanIncomplete, err.kind());
    assert_eq!(1, rules[0].num_calls());
    assert_eq!(1, rules[1].num_calls());
    assert_eq!(0, rules[2].num_calls());
}

/// Reaching the ceiling on the last page is not an error
#[tokio::test]
async fn test_scan_page_ceiling_exact() {
    let rules = MockBucket::new()
        .page(vec![object("a", 1, None)])
        .page(vec![object("b", 1, None)])
        .rules();
    let s3 = mock_client!(aws_sdk_s3, RuleMode::Sequential, rules.as_slice());

    let scan = scanner(s3)
        .scan_bucket()
        .max_pages(2)
        .send()
        .await
        .unwrap();

    assert_eq!(vec!["a", "b"], keys(&scan));
}

#[tokio::test]
async fn test_scan_rejects_empty_bucket_name() {
    let rules = MockBucket::new().rules();
    let s3 = mock_client!(aws_sdk_s3, RuleMode::Sequential, rules.as_slice());

    let err = scanner(s3).scan_bucket().bucket("").send().await.unwrap_err();

    assert_eq!(&ErrorKind::ValidationFailed, err.kind());
    assert_eq!(0, rules[0].num_calls());
}

#[tokio::test]
async fn test_scan_rejects_zero_page_ceiling() {
    let rules = MockBucket::new().page(vec![object("a", 1, None)]).rules();
    let s3 = mock_client!(aws_sdk_s3, RuleMode::Sequential, rules.as_slice());

    let err = scanner(s3).scan_bucket().max_pages(0).send().await.unwrap_err();

    assert_eq!(&ErrorKind::ValidationFailed, err.kind());
    assert_eq!(0, rules[0].num_calls());
}
