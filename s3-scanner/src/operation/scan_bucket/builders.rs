/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use crate::error::Error;
use crate::types::ScanResult;

use super::ScanBucketInputBuilder;

/// Fluent builder for constructing a bucket scan
#[derive(Debug)]
pub struct ScanBucketFluentBuilder {
    handle: Arc<crate::client::Handle>,
    inner: ScanBucketInputBuilder,
}

impl ScanBucketFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: ::std::default::Default::default(),
        }
    }

    /// List the bucket and collect every object.
    ///
    /// Settings left unset fall back to the client configuration.
    pub async fn send(self) -> Result<ScanResult, Error> {
        let config = &self.handle.config;
        let mut inner = self.inner;
        if inner.get_bucket().is_none() {
            inner = inner.bucket(config.bucket_name());
        }
        if inner.get_max_pages().is_none() {
            inner = inner.set_max_pages(config.max_pages());
        }
        let input = inner.build()?;
        crate::operation::scan_bucket::ScanBucket::orchestrate(self.handle, input).await
    }

    /// Set the bucket to list. Defaults to the configured bucket.
    pub fn bucket(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.bucket(input);
        self
    }

    /// Set the bucket to list. Defaults to the configured bucket.
    pub fn set_bucket(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_bucket(input);
        self
    }

    /// The bucket to list.
    pub fn get_bucket(&self) -> &Option<String> {
        self.inner.get_bucket()
    }

    /// Maximum number of listing pages to request. Defaults to the configured ceiling.
    pub fn max_pages(mut self, input: usize) -> Self {
        self.inner = self.inner.max_pages(input);
        self
    }

    /// Maximum number of listing pages to request. Defaults to the configured ceiling.
    pub fn set_max_pages(mut self, input: Option<usize>) -> Self {
        self.inner = self.inner.set_max_pages(input);
        self
    }

    /// Maximum number of listing pages to request.
    pub fn get_max_pages(&self) -> &Option<usize> {
        self.inner.get_max_pages()
    }
}

impl ScanBucketInputBuilder {
    /// Scan a bucket with this input using the given client.
    pub async fn send_with(self, client: &crate::Client) -> Result<ScanResult, Error> {
        let mut fluent_builder = client.scan_bucket();
        fluent_builder.inner = self;
        fluent_builder.send().await
    }
}
