/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::{self, Error};
use crate::types::{ObjectRecord, ScanResult};

/// Input type for publishing a scan notification
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct SendNotificationInput {
    /// The scanned bucket.
    pub bucket_name: String,

    /// Number of objects reported in the notification.
    pub object_count: usize,

    /// Objects listed in the notification body.
    pub objects: Vec<ObjectRecord>,

    /// How long the scan took, in seconds.
    pub scan_duration: f64,

    /// When the scan finished. A fresh timestamp is used when absent.
    pub scan_timestamp: Option<String>,
}

impl SendNotificationInput {
    /// Creates a new builder-style object to manufacture [`SendNotificationInput`](crate::operation::send_notification::SendNotificationInput).
    pub fn builder() -> SendNotificationInputBuilder {
        SendNotificationInputBuilder::default()
    }

    /// The scanned bucket.
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Number of objects reported in the notification.
    pub fn object_count(&self) -> usize {
        self.object_count
    }

    /// Objects listed in the notification body.
    pub fn objects(&self) -> &[ObjectRecord] {
        &self.objects
    }

    /// How long the scan took, in seconds.
    pub fn scan_duration(&self) -> f64 {
        self.scan_duration
    }

    /// When the scan finished.
    pub fn scan_timestamp(&self) -> Option<&str> {
        self.scan_timestamp.as_deref()
    }
}

/// A builder for [`SendNotificationInput`](crate::operation::send_notification::SendNotificationInput).
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct SendNotificationInputBuilder {
    pub(crate) bucket_name: Option<String>,
    pub(crate) object_count: Option<usize>,
    pub(crate) objects: Option<Vec<ObjectRecord>>,
    pub(crate) scan_duration: Option<f64>,
    pub(crate) scan_timestamp: Option<String>,
}

impl SendNotificationInputBuilder {
    /// Populate every field from a scan result.
    ///
    /// The scan duration is only set if it was recorded on the result.
    pub fn scan_result(self, scan: &ScanResult) -> Self {
        self.bucket_name(scan.bucket_name())
            .object_count(scan.object_count())
            .objects(scan.objects().to_vec())
            .scan_timestamp(scan.scan_timestamp())
            .set_scan_duration(scan.scan_duration())
    }

    /// Set the scanned bucket.
    ///
    /// NOTE: Required.
    pub fn bucket_name(mut self, input: impl Into<String>) -> Self {
        self.bucket_name = Some(input.into());
        self
    }

    /// Set the scanned bucket.
    pub fn set_bucket_name(mut self, input: Option<String>) -> Self {
        self.bucket_name = input;
        self
    }

    /// Set the number of objects found.
    ///
    /// NOTE: Required.
    pub fn object_count(mut self, input: usize) -> Self {
        self.object_count = Some(input);
        self
    }

    /// Set the number of objects found.
    pub fn set_object_count(mut self, input: Option<usize>) -> Self {
        self.object_count = input;
        self
    }

    /// Set the objects to list in the notification.
    ///
    /// NOTE: Required, may be empty.
    pub fn objects(mut self, input: Vec<ObjectRecord>) -> Self {
        self.objects = Some(input);
        self
    }

    /// Set the objects to list in the notification.
    pub fn set_objects(mut self, input: Option<Vec<ObjectRecord>>) -> Self {
        self.objects = input;
        self
    }

    /// Set the scan duration in seconds.
    ///
    /// NOTE: Required.
    pub fn scan_duration(mut self, input: f64) -> Self {
        self.scan_duration = Some(input);
        self
    }

    /// Set the scan duration in seconds.
    pub fn set_scan_duration(mut self, input: Option<f64>) -> Self {
        self.scan_duration = input;
        self
    }

    /// Set when the scan finished.
    pub fn scan_timestamp(mut self, input: impl Into<String>) -> Self {
        self.scan_timestamp = Some(input.into());
        self
    }

    /// Set when the scan finished.
    pub fn set_scan_timestamp(mut self, input: Option<String>) -> Self {
        self.scan_timestamp = input;
        self
    }

    /// Names of the required fields that have not been set
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.bucket_name.is_none() {
            missing.push("bucket_name");
        }
        if self.object_count.is_none() {
            missing.push("object_count");
        }
        if self.objects.is_none() {
            missing.push("objects");
        }
        if self.scan_duration.is_none() {
            missing.push("scan_duration");
        }
        missing
    }

    /// Consumes the builder and constructs a [`SendNotificationInput`](crate::operation::send_notification::SendNotificationInput).
    ///
    /// Fails with [`ErrorKind::ValidationFailed`](crate::error::ErrorKind::ValidationFailed)
    /// naming every missing field.
    pub fn build(self) -> Result<SendNotificationInput, Error> {
        match (
            self.bucket_name,
            self.object_count,
            self.objects,
            self.scan_duration,
        ) {
            (Some(bucket_name), Some(object_count), Some(objects), Some(scan_duration)) => {
                Ok(SendNotificationInput {
                    bucket_name,
                    object_count,
                    objects,
                    scan_duration,
                    scan_timestamp: self.scan_timestamp,
                })
            }
            (bucket_name, object_count, objects, scan_duration) => {
                let missing = SendNotificationInputBuilder {
                    bucket_name,
                    object_count,
                    objects,
                    scan_duration,
                    scan_timestamp: None,
                }
                .missing_keys();
                let msg = format!(
                    "Missing required keys in scan result: [{}]",
                    missing.join(", ")
                );
                tracing::error!("{msg}");
                Err(error::validation_failed(msg))
            }
        }
    }
}
