/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;

/// Input type for scanning a bucket
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct ScanBucketInput {
    /// The bucket to list.
    pub bucket: Option<String>,

    /// Maximum number of listing pages to request, `None` for unbounded.
    pub max_pages: Option<usize>,
}

impl ScanBucketInput {
    /// Creates a new builder-style object to manufacture [`ScanBucketInput`](crate::operation::scan_bucket::ScanBucketInput).
    pub fn builder() -> ScanBucketInputBuilder {
        ScanBucketInputBuilder::default()
    }

    /// The bucket to list.
    pub fn bucket(&self) -> Option<&str> {
        self.bucket.as_deref()
    }

    /// Maximum number of listing pages to request.
    pub fn max_pages(&self) -> Option<usize> {
        self.max_pages
    }
}

/// A builder for [`ScanBucketInput`](crate::operation::scan_bucket::ScanBucketInput).
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct ScanBucketInputBuilder {
    pub(crate) bucket: Option<String>,
    pub(crate) max_pages: Option<usize>,
}

impl ScanBucketInputBuilder {
    /// Set the bucket to list.
    ///
    /// NOTE: A bucket name is required.
    pub fn bucket(mut self, input: impl Into<String>) -> Self {
        self.bucket = Some(input.into());
        self
    }

    /// Set the bucket to list.
    ///
    /// NOTE: A bucket name is required.
    pub fn set_bucket(mut self, input: Option<String>) -> Self {
        self.bucket = input;
        self
    }

    /// The bucket to list.
    pub fn get_bucket(&self) -> &Option<String> {
        &self.bucket
    }

    /// Fail with `ScanIncomplete` instead of requesting more than this many pages.
    pub fn max_pages(mut self, input: usize) -> Self {
        self.max_pages = Some(input);
        self
    }

    /// Fail with `ScanIncomplete` instead of requesting more than this many pages.
    pub fn set_max_pages(mut self, input: Option<usize>) -> Self {
        self.max_pages = input;
        self
    }

    /// Maximum number of listing pages to request.
    pub fn get_max_pages(&self) -> &Option<usize> {
        &self.max_pages
    }

    /// Consumes the builder and constructs a [`ScanBucketInput`](crate::operation::scan_bucket::ScanBucketInput).
    pub fn build(self) -> Result<ScanBucketInput, BuildError> {
        if matches!(self.bucket.as_deref(), None | Some("")) {
            return Err(BuildError::missing_field("bucket", "A bucket is required"));
        }
        if self.max_pages == Some(0) {
            return Err(BuildError::invalid_field(
                "max_pages",
                "max_pages must be at least 1",
            ));
        }
        Ok(ScanBucketInput {
            bucket: self.bucket,
            max_pages: self.max_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ScanBucketInput;

    #[test]
    fn test_bucket_is_required() {
        assert!(ScanBucketInput::builder().build().is_err());
        assert!(ScanBucketInput::builder().bucket("").build().is_err());

        let input = ScanBucketInput::builder()
            .bucket("test-bucket")
            .max_pages(4)
            .build()
            .unwrap();
        assert_eq!(Some("test-bucket"), input.bucket());
        assert_eq!(Some(4), input.max_pages());
    }

    #[test]
    fn test_zero_max_pages_is_rejected() {
        let err = ScanBucketInput::builder()
            .bucket("test-bucket")
            .max_pages(0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("max_pages"), "{err}");

        let input = ScanBucketInput::builder()
            .bucket("test-bucket")
            .max_pages(1)
            .build()
            .unwrap();
        assert_eq!(Some(1), input.max_pages());
    }
}
