/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Rendering of scan notifications.
//!
//! Everything here is a pure function of its arguments.

use aws_smithy_types::date_time::Format;
use aws_smithy_types::DateTime;

use super::SendNotificationInput;
use crate::types::{current_timestamp, ObjectRecord};
use crate::unit::ByteUnit;

/// Body text used in place of the object list for an empty bucket
pub const EMPTY_BUCKET_TEXT: &str = "No objects found in the bucket.";

/// Subject and body of a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    subject: String,
    body: String,
}

impl NotificationMessage {
    /// Render the notification for a validated input.
    pub fn render(input: &SendNotificationInput, app_name: &str, app_version: &str) -> Self {
        let scan_time = input
            .scan_timestamp()
            .map(str::to_owned)
            .unwrap_or_else(current_timestamp);
        let object_list = format_object_list(input.objects());

        let body = render_body(&BodyParams {
            app_name,
            app_version,
            bucket_name: input.bucket_name(),
            scan_time: &scan_time,
            object_count: input.object_count(),
            duration: input.scan_duration(),
            object_list: &object_list,
        });

        Self {
            subject: render_subject(app_name),
            body,
        }
    }

    /// The message subject
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The message body
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Values substituted into the notification body
#[derive(Debug, Clone, Copy)]
pub struct BodyParams<'a> {
    /// Application name
    pub app_name: &'a str,
    /// Application version
    pub app_version: &'a str,
    /// The scanned bucket
    pub bucket_name: &'a str,
    /// When the scan finished
    pub scan_time: &'a str,
    /// Number of objects found
    pub object_count: usize,
    /// Scan duration in seconds
    pub duration: f64,
    /// Output of [`format_object_list`]
    pub object_list: &'a str,
}

/// Notification subject for the given application name
pub fn render_subject(app_name: &str) -> String {
    format!("[{app_name}] S3 Bucket Scan Results")
}

/// Notification body
pub fn render_body(params: &BodyParams<'_>) -> String {
    let BodyParams {
        app_name,
        app_version,
        bucket_name,
        scan_time,
        object_count,
        duration,
        object_list,
    } = *params;
    let duration = format_decimal(duration);

    format!(
        "
Hello,

The {app_name} has completed a scan of your S3 bucket.

Scan Details:
- Bucket Name: {bucket_name}
- Scan Time: {scan_time}
- Total Objects Found: {object_count}
- Scan Duration: {duration} seconds

Objects Found:
{object_list}

This is an automated message from the {app_name}.
Application Version: {app_version}

Best regards,
{app_name}
"
    )
}

/// One line per object, or [`EMPTY_BUCKET_TEXT`] when there are none
pub fn format_object_list(objects: &[ObjectRecord]) -> String {
    if objects.is_empty() {
        tracing::info!("no objects found in bucket");
        return EMPTY_BUCKET_TEXT.to_owned();
    }

    tracing::info!("formatting {} objects for email", objects.len());
    let lines: Vec<String> = objects.iter().map(format_object_line).collect();
    lines.join("\n")
}

/// `  • {key} ({size} MB) - Modified: {last_modified}`
pub fn format_object_line(object: &ObjectRecord) -> String {
    format!(
        "  • {} ({} MB) - Modified: {}",
        object.key(),
        format_size_mb(object.size()),
        format_last_modified(object.last_modified())
    )
}

/// Size in mebibytes rounded to two decimals, e.g. `1.0`, `0.0`, `2.5`, `12.34`
pub fn format_size_mb(bytes: u64) -> String {
    format_decimal(ByteUnit::Mebibyte.convert_rounded(bytes, 2))
}

/// `YYYY-MM-DD HH:MM:SS UTC`, or `Unknown` when the time is not known
pub fn format_last_modified(last_modified: Option<&DateTime>) -> String {
    const UNKNOWN: &str = "Unknown";

    let Some(last_modified) = last_modified else {
        return UNKNOWN.to_owned();
    };

    // drop sub-second precision so the RFC 3339 form is always `YYYY-MM-DDTHH:MM:SSZ`
    match DateTime::from_secs(last_modified.secs()).fmt(Format::DateTime) {
        Ok(formatted) => format!("{} UTC", formatted.trim_end_matches('Z').replacen('T', " ", 1)),
        Err(_) => UNKNOWN.to_owned(),
    }
}

/// One-line summary of a scan: object count, total size and duration
pub fn scan_summary(objects: &[ObjectRecord], duration: f64) -> String {
    let total_bytes: u64 = objects.iter().map(ObjectRecord::size).sum();
    format!(
        "Scan Summary: {} objects, {} MB total, completed in {} seconds",
        objects.len(),
        format_size_mb(total_bytes),
        format_decimal(duration)
    )
}

/// Render a float the way a decimal literal is written: integral values keep one decimal place.
pub(crate) fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use aws_smithy_types::DateTime;

    use super::*;
    use crate::types::ObjectRecord;

    // 2025-01-15T10:30:45Z
    const JAN_15: i64 = 1_736_937_045;

    #[test]
    fn test_format_size_mb() {
        assert_eq!("1.0", format_size_mb(1_048_576));
        assert_eq!("0.0", format_size_mb(1024));
        assert_eq!("0.0", format_size_mb(0));
        assert_eq!("2.5", format_size_mb(2_621_440));
        assert_eq!("0.01", format_size_mb(10_486));
        assert_eq!("1024.0", format_size_mb(1 << 30));
        // odd multiples of 128 KiB land exactly on a tie
        assert_eq!("0.12", format_size_mb(131_072));
        assert_eq!("0.38", format_size_mb(393_216));
        assert_eq!("0.62", format_size_mb(655_360));
        assert_eq!("0.88", format_size_mb(917_504));
    }

    #[test]
    fn test_format_last_modified() {
        assert_eq!("Unknown", format_last_modified(None));
        assert_eq!(
            "2025-01-15 10:30:45 UTC",
            format_last_modified(Some(&DateTime::from_secs(JAN_15)))
        );
        assert_eq!(
            "2025-01-15 10:30:45 UTC",
            format_last_modified(Some(&DateTime::from_secs_and_nanos(JAN_15, 250_000_000)))
        );
    }

    #[test]
    fn test_format_object_list() {
        assert_eq!(EMPTY_BUCKET_TEXT, format_object_list(&[]));

        let objects = vec![
            ObjectRecord::new("document1.txt", 1_048_576, Some(DateTime::from_secs(JAN_15))),
            ObjectRecord::new("document2.json", 2048, None),
        ];
        assert_eq!(
            "  • document1.txt (1.0 MB) - Modified: 2025-01-15 10:30:45 UTC\n  • document2.json (0.0 MB) - Modified: Unknown",
            format_object_list(&objects)
        );
    }

    #[test]
    fn test_render_body() {
        let body = render_body(&BodyParams {
            app_name: "Serverless S3 Scanner",
            app_version: "1.0.0",
            bucket_name: "test-bucket",
            scan_time: "2025-01-15T10:30:45Z",
            object_count: 0,
            duration: 1.0,
            object_list: EMPTY_BUCKET_TEXT,
        });
        assert!(body.contains("- Bucket Name: test-bucket\n"));
        assert!(body.contains("- Scan Time: 2025-01-15T10:30:45Z\n"));
        assert!(body.contains("- Total Objects Found: 0\n"));
        assert!(body.contains("- Scan Duration: 1.0 seconds\n"));
        assert!(body.contains("Objects Found:\nNo objects found in the bucket.\n"));
        assert!(body.contains("Application Version: 1.0.0\n"));
        assert!(body.ends_with("Best regards,\nServerless S3 Scanner\n"));
    }

    #[test]
    fn test_render_uses_fresh_timestamp_when_absent() {
        let input = super::super::SendNotificationInput::builder()
            .bucket_name("test-bucket")
            .object_count(0)
            .objects(Vec::new())
            .scan_duration(0.12)
            .build()
            .unwrap();
        let message = NotificationMessage::render(&input, "Scanner", "2.0.0");
        assert_eq!("[Scanner] S3 Bucket Scan Results", message.subject());
        let scan_time = message
            .body()
            .lines()
            .find_map(|line| line.strip_prefix("- Scan Time: "))
            .unwrap();
        assert!(scan_time.ends_with('Z'), "{scan_time}");
        assert!(message.body().contains("- Scan Duration: 0.12 seconds"));
    }

    #[test]
    fn test_scan_summary() {
        let objects = vec![
            ObjectRecord::new("a", 1_048_576, None),
            ObjectRecord::new("b", 1_572_864, None),
        ];
        assert_eq!(
            "Scan Summary: 2 objects, 2.5 MB total, completed in 0.5 seconds",
            scan_summary(&objects, 0.5)
        );
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!("3.0", format_decimal(3.0));
        assert_eq!("0.35", format_decimal(0.35));
        assert_eq!("0.0", format_decimal(0.0));
    }
}
