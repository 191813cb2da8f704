/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;

mod input;
/// Input type for scanning a bucket
pub use input::{ScanBucketInput, ScanBucketInputBuilder};

mod paginator;

use std::sync::Arc;

use aws_sdk_s3::error::DisplayErrorContext;
use paginator::ListObjectsPaginator;

use crate::error::{self, Error};
use crate::types::{current_timestamp, ObjectRecord, ScanResult};

/// Operation struct for listing every object in a bucket
#[derive(Clone, Default, Debug)]
pub(crate) struct ScanBucket;

impl ScanBucket {
    /// Execute a single `ScanBucket` operation
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: ScanBucketInput,
    ) -> Result<ScanResult, Error> {
        let bucket = input.bucket().unwrap_or_default().to_owned();
        tracing::info!("scanning S3 bucket: {bucket}");

        let mut paginator = ListObjectsPaginator::new(handle, bucket.clone());
        let mut objects: Vec<ObjectRecord> = Vec::new();

        while let Some(page) = paginator.next_page().await {
            let page = page.map_err(|err| {
                tracing::error!("failed to scan S3 bucket: {}", DisplayErrorContext(&err));
                Error::from(err)
            })?;

            let batch = page.contents();
            if batch.is_empty() {
                tracing::debug!("no objects in page {}", paginator.pages());
            } else {
                tracing::debug!("retrieved {} objects in this batch", batch.len());
            }
            objects.extend(batch.iter().map(ObjectRecord::from));

            if let Some(max_pages) = input.max_pages() {
                if paginator.pages() >= max_pages && !paginator.is_done() {
                    let msg = format!(
                        "stopped listing bucket '{bucket}' after {max_pages} pages ({} objects) with more objects remaining",
                        objects.len()
                    );
                    tracing::error!("{msg}");
                    return Err(error::scan_incomplete(msg));
                }
            }
        }

        if objects.is_empty() {
            tracing::info!("no objects found in the bucket");
        }
        tracing::debug!(
            "all objects retrieved after {} pages, pagination complete",
            paginator.pages()
        );

        let scan = ScanResult::new(bucket, objects, current_timestamp());
        tracing::info!("S3 scan completed: {} objects found", scan.object_count());
        Ok(scan)
    }
}
