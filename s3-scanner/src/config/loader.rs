/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_config::BehaviorVersion;
use aws_types::region::Region;
use tracing::Level;

use crate::config::{parse_log_level, Builder, DEFAULT_APP_NAME, DEFAULT_TOPIC_NAME};
use crate::error::Error;
use crate::Config;

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Load scanner [`Config`] from the environment.
///
/// Settings are resolved once when the loader is created. Unset variables fall back to
/// hardcoded defaults, variables that are set (even to an empty string) are used as-is.
#[derive(Debug)]
pub struct ConfigLoader {
    builder: Builder,
}

impl ConfigLoader {
    /// Resolve settings from the process environment
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve settings through `lookup`, which returns the value of an environment variable
    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_owned());

        let account_id = var("AWS_ACCOUNT_ID", "");
        let default_bucket = format!("serverless-s3-scanner-files-{account_id}");
        let max_pages = lookup("SCAN_MAX_PAGES").and_then(|value| match value.trim().parse() {
            Ok(0) | Err(_) => {
                tracing::warn!("ignoring invalid SCAN_MAX_PAGES value {value:?}");
                None
            }
            Ok(pages) => Some(pages),
        });

        let builder = Builder::default()
            .region(var("AWS_REGION", DEFAULT_REGION))
            .bucket_name(var("S3_BUCKET_NAME", &default_bucket))
            .account_id(account_id)
            .topic_name(var("SNS_TOPIC_NAME", DEFAULT_TOPIC_NAME))
            .set_topic_arn(lookup("SNS_TOPIC_ARN"))
            .notification_email(var("NOTIFICATION_EMAIL", ""))
            .log_level(var("LOG_LEVEL", DEFAULT_LOG_LEVEL))
            .app_name(var("APP_NAME", DEFAULT_APP_NAME))
            .app_version(var("APP_VERSION", env!("CARGO_PKG_VERSION")))
            .set_max_pages(max_pages);

        Self { builder }
    }

    /// Override the bucket to scan.
    pub fn bucket_name(mut self, bucket_name: impl Into<String>) -> Self {
        self.builder = self.builder.bucket_name(bucket_name);
        self
    }

    /// Override the topic notifications are published to.
    pub fn topic_arn(mut self, topic_arn: impl Into<String>) -> Self {
        self.builder = self.builder.topic_arn(topic_arn);
        self
    }

    /// Override the listing page ceiling.
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.builder = self.builder.max_pages(max_pages);
        self
    }

    /// The most verbose level to log, available before the configuration is loaded so logging
    /// can be installed first.
    pub fn max_level(&self) -> Level {
        parse_log_level(&self.builder.log_level)
    }

    /// Load the shared AWS configuration and construct the SDK clients.
    ///
    /// Credential resolution is left to the default provider chain.
    pub async fn load(self) -> Result<Config, Error> {
        let region = self.builder.region.clone();
        tracing::info!("creating AWS clients for region: {region}");

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if !region.is_empty() {
            loader = loader.region(Region::new(region));
        }
        let shared_config = loader.load().await;

        let s3_client = aws_sdk_s3::Client::new(&shared_config);
        let sns_client = aws_sdk_sns::Client::new(&shared_config);
        tracing::info!("AWS clients created successfully");

        let config = self
            .builder
            .s3_client(s3_client)
            .sns_client(sns_client)
            .build()?;
        Ok(config)
    }
}
