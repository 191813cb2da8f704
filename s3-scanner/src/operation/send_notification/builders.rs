/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use crate::error::Error;
use crate::types::{ObjectRecord, ScanResult};

use super::{SendNotificationInputBuilder, SendNotificationOutput};

/// Fluent builder for publishing a scan notification
#[derive(Debug)]
pub struct SendNotificationFluentBuilder {
    handle: Arc<crate::client::Handle>,
    inner: SendNotificationInputBuilder,
}

impl SendNotificationFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: ::std::default::Default::default(),
        }
    }

    /// Validate the input and publish the notification.
    ///
    /// No request is made if a required field is missing.
    pub async fn send(self) -> Result<SendNotificationOutput, Error> {
        tracing::info!("preparing email notification");
        let input = self.inner.build()?;
        crate::operation::send_notification::SendNotification::orchestrate(self.handle, input)
            .await
    }

    /// Populate every field from a scan result.
    pub fn scan_result(mut self, scan: &ScanResult) -> Self {
        self.inner = self.inner.scan_result(scan);
        self
    }

    /// Set the scanned bucket.
    pub fn bucket_name(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.bucket_name(input);
        self
    }

    /// Set the number of objects found.
    pub fn object_count(mut self, input: usize) -> Self {
        self.inner = self.inner.object_count(input);
        self
    }

    /// Set the objects to list in the notification.
    pub fn objects(mut self, input: Vec<ObjectRecord>) -> Self {
        self.inner = self.inner.objects(input);
        self
    }

    /// Set the scan duration in seconds.
    pub fn scan_duration(mut self, input: f64) -> Self {
        self.inner = self.inner.scan_duration(input);
        self
    }

    /// Set when the scan finished.
    pub fn scan_timestamp(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.scan_timestamp(input);
        self
    }

    /// Names of the required fields that have not been set
    pub fn missing_keys(&self) -> Vec<&'static str> {
        self.inner.missing_keys()
    }
}

impl SendNotificationInputBuilder {
    /// Publish a notification with this input using the given client.
    pub async fn send_with(self, client: &crate::Client) -> Result<SendNotificationOutput, Error> {
        let mut fluent_builder = client.send_notification();
        fluent_builder.inner = self;
        fluent_builder.send().await
    }
}
