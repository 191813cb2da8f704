/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::time::SystemTime;

use aws_smithy_types::date_time::Format;
use aws_smithy_types::DateTime;

/// Metadata for a single object found during a scan
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRecord {
    key: String,
    size: u64,
    last_modified: Option<DateTime>,
}

impl ObjectRecord {
    /// Create a new record
    pub fn new(key: impl Into<String>, size: u64, last_modified: Option<DateTime>) -> Self {
        Self {
            key: key.into(),
            size,
            last_modified,
        }
    }

    /// The object key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The object size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// When the object was last modified, if S3 reported it
    pub fn last_modified(&self) -> Option<&DateTime> {
        self.last_modified.as_ref()
    }
}

impl From<&aws_sdk_s3::types::Object> for ObjectRecord {
    fn from(value: &aws_sdk_s3::types::Object) -> Self {
        Self {
            key: value.key().unwrap_or_default().to_owned(),
            size: value.size().map_or(0, |size| size.max(0) as u64),
            last_modified: value.last_modified().cloned(),
        }
    }
}

/// The outcome of scanning a single bucket
///
/// The object count is always derived from the records, it can not drift from them.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    bucket_name: String,
    objects: Vec<ObjectRecord>,
    scan_timestamp: String,
    scan_duration: Option<f64>,
}

impl ScanResult {
    /// Create a new scan result. The duration is unset until [`Self::with_scan_duration`] is called.
    pub fn new(
        bucket_name: impl Into<String>,
        objects: Vec<ObjectRecord>,
        scan_timestamp: impl Into<String>,
    ) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            objects,
            scan_timestamp: scan_timestamp.into(),
            scan_duration: None,
        }
    }

    /// Record how long the scan took, in seconds. Negative values are clamped to zero.
    pub fn with_scan_duration(mut self, seconds: f64) -> Self {
        self.scan_duration = Some(seconds.max(0.0));
        self
    }

    /// The scanned bucket
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Number of objects found
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Objects in the order the listing returned them
    pub fn objects(&self) -> &[ObjectRecord] {
        &self.objects
    }

    /// RFC 3339 timestamp (UTC) taken when the listing finished
    pub fn scan_timestamp(&self) -> &str {
        &self.scan_timestamp
    }

    /// Scan duration in seconds, once recorded
    pub fn scan_duration(&self) -> Option<f64> {
        self.scan_duration
    }

    /// Sum of all object sizes in bytes
    pub fn total_size(&self) -> u64 {
        self.objects.iter().map(ObjectRecord::size).sum()
    }
}

/// Current UTC time as an RFC 3339 string with a `Z` suffix
pub fn current_timestamp() -> String {
    let now = DateTime::from(SystemTime::now());
    let timestamp = now
        .fmt(Format::DateTime)
        .unwrap_or_else(|_| now.secs().to_string());
    tracing::debug!("generated timestamp: {timestamp}");
    timestamp
}

#[cfg(test)]
mod tests {
    use aws_smithy_types::DateTime;

    use super::{current_timestamp, ObjectRecord, ScanResult};

    #[test]
    fn test_record_from_sdk_object() {
        let obj = aws_sdk_s3::types::Object::builder()
            .key("reports/q1.csv")
            .size(2048)
            .last_modified(DateTime::from_secs(1_736_937_045))
            .build();
        let record = ObjectRecord::from(&obj);
        assert_eq!("reports/q1.csv", record.key());
        assert_eq!(2048, record.size());
        assert_eq!(Some(&DateTime::from_secs(1_736_937_045)), record.last_modified());

        let obj = aws_sdk_s3::types::Object::builder()
            .key("broken")
            .size(-5)
            .build();
        let record = ObjectRecord::from(&obj);
        assert_eq!(0, record.size());
        assert!(record.last_modified().is_none());
    }

    #[test]
    fn test_object_count_tracks_records() {
        let objects = vec![
            ObjectRecord::new("a", 1, None),
            ObjectRecord::new("b", 2, None),
        ];
        let scan = ScanResult::new("bucket", objects, "2025-01-15T10:30:45Z");
        assert_eq!(2, scan.object_count());
        assert_eq!(scan.objects().len(), scan.object_count());
        assert_eq!(3, scan.total_size());
        assert_eq!(None, scan.scan_duration());

        let scan = scan.with_scan_duration(-1.0);
        assert_eq!(Some(0.0), scan.scan_duration());
    }

    #[test]
    fn test_current_timestamp_is_utc() {
        let ts = current_timestamp();
        assert!(ts.ends_with('Z'), "{ts}");
        assert!(ts.contains('T'), "{ts}");
    }
}
