/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::Config;
use std::sync::Arc;

/// Scanner client for Amazon S3 and Amazon SNS.
///
/// Cloning a client is cheap, clones share the same configuration and SDK clients.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) handle: Arc<Handle>,
}

/// Whatever is needed to carry out operations
#[derive(Debug)]
pub(crate) struct Handle {
    pub(crate) config: crate::Config,
}

impl Handle {
    /// The S3 client to use for listing operations
    pub(crate) fn s3(&self) -> &aws_sdk_s3::Client {
        self.config.s3_client()
    }

    /// The SNS client to use for publishing notifications
    pub(crate) fn sns(&self) -> &aws_sdk_sns::Client {
        self.config.sns_client()
    }
}

impl Client {
    /// Creates a new client from a scanner config.
    pub fn new(config: Config) -> Client {
        let handle = Arc::new(Handle { config });
        Client { handle }
    }

    /// Returns the client's configuration
    pub fn config(&self) -> &Config {
        &self.handle.config
    }

    /// List every object in a bucket.
    ///
    /// The bucket defaults to the configured [`bucket_name`](crate::Config::bucket_name).
    /// Results are paginated transparently, a request is issued per page of up to 1000 keys
    /// until S3 reports the listing is complete.
    ///
    /// # Examples
    /// ```no_run
    /// async fn scan(client: &s3_scanner::Client) -> Result<(), s3_scanner::error::Error> {
    ///     let scan = client.scan_bucket().send().await?;
    ///     for object in scan.objects() {
    ///         println!("{} ({} bytes)", object.key(), object.size());
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub fn scan_bucket(&self) -> crate::operation::scan_bucket::builders::ScanBucketFluentBuilder {
        crate::operation::scan_bucket::builders::ScanBucketFluentBuilder::new(self.handle.clone())
    }

    /// Publish a summary of a scan to the configured topic.
    ///
    /// Exactly one `Publish` request is made, it is not retried by this library.
    ///
    /// # Examples
    /// ```no_run
    /// async fn notify(client: &s3_scanner::Client) -> Result<(), s3_scanner::error::Error> {
    ///     let scan = client.scan_bucket().send().await?.with_scan_duration(0.42);
    ///     let output = client.send_notification().scan_result(&scan).send().await?;
    ///     println!("published {:?}", output.message_id());
    ///     Ok(())
    /// }
    /// ```
    pub fn send_notification(
        &self,
    ) -> crate::operation::send_notification::builders::SendNotificationFluentBuilder {
        crate::operation::send_notification::builders::SendNotificationFluentBuilder::new(
            self.handle.clone(),
        )
    }
}
