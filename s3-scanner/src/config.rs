/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;
use tracing::Level;

use crate::error::{self, Error};

pub(crate) mod loader;

/// Application name used in notification subjects when none is configured
pub const DEFAULT_APP_NAME: &str = "Serverless S3 Scanner";

/// Topic name used to derive the topic ARN when no ARN is configured
pub const DEFAULT_TOPIC_NAME: &str = "S3ScannerNotifications";

/// Map a `LOG_LEVEL` value to a [`Level`].
///
/// Matching ignores case and surrounding whitespace. `WARNING` is accepted for warn,
/// `CRITICAL` and `FATAL` for error. Anything unrecognized logs at info.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "WARN" | "WARNING" => Level::WARN,
        "ERROR" | "CRITICAL" | "FATAL" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Configuration for a [`Client`](crate::client::Client)
///
/// A `Config` is built once at process start and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    region: String,
    account_id: String,
    bucket_name: String,
    topic_name: String,
    topic_arn: Option<String>,
    notification_email: String,
    log_level: String,
    app_name: String,
    app_version: String,
    max_pages: Option<usize>,
    s3_client: aws_sdk_s3::Client,
    sns_client: aws_sdk_sns::Client,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// AWS region the bucket and topic live in
    pub fn region(&self) -> &str {
        &self.region
    }

    /// AWS account ID, used to derive the topic ARN
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Bucket to scan
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Name of the notification topic
    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }

    /// Explicitly configured topic ARN, if any
    pub fn topic_arn(&self) -> Option<&str> {
        self.topic_arn.as_deref()
    }

    /// The ARN notifications are published to.
    ///
    /// Prefers the configured ARN, otherwise builds one from region, account ID and topic name.
    pub fn resolved_topic_arn(&self) -> String {
        match self.topic_arn() {
            Some(arn) => arn.to_owned(),
            None => format!(
                "arn:aws:sns:{}:{}:{}",
                self.region, self.account_id, self.topic_name
            ),
        }
    }

    /// Address subscribed to the topic
    pub fn notification_email(&self) -> &str {
        &self.notification_email
    }

    /// Log verbosity as configured (e.g. `INFO`, `WARNING`)
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// The most verbose level that should be logged, see [`parse_log_level`]
    pub fn max_level(&self) -> Level {
        parse_log_level(&self.log_level)
    }

    /// Application name shown in the notification subject
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Application version shown in the notification body
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Maximum number of listing pages a scan may request, `None` means unbounded
    pub fn max_pages(&self) -> Option<usize> {
        self.max_pages
    }

    /// The Amazon S3 client instance used to list objects.
    pub fn s3_client(&self) -> &aws_sdk_s3::Client {
        &self.s3_client
    }

    /// The Amazon SNS client instance used to publish notifications.
    pub fn sns_client(&self) -> &aws_sdk_sns::Client {
        &self.sns_client
    }

    /// Check that every setting required for an invocation is present.
    ///
    /// Region, bucket name and notification email must be non-empty.
    pub fn validate(&self) -> Result<(), Error> {
        tracing::info!("validating configuration");
        let required = [
            ("AWS_REGION", &self.region),
            ("S3_BUCKET_NAME", &self.bucket_name),
            ("NOTIFICATION_EMAIL", &self.notification_email),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            let msg = format!("Missing required configuration: {}", missing.join(", "));
            tracing::error!("{msg}");
            return Err(error::invalid_configuration(msg));
        }

        tracing::info!("configuration validation passed");
        Ok(())
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Clone)]
pub struct Builder {
    region: String,
    account_id: String,
    bucket_name: String,
    topic_name: String,
    topic_arn: Option<String>,
    notification_email: String,
    log_level: String,
    app_name: String,
    app_version: String,
    max_pages: Option<usize>,
    s3_client: Option<aws_sdk_s3::Client>,
    sns_client: Option<aws_sdk_sns::Client>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            region: String::new(),
            account_id: String::new(),
            bucket_name: String::new(),
            topic_name: DEFAULT_TOPIC_NAME.to_owned(),
            topic_arn: None,
            notification_email: String::new(),
            log_level: "INFO".to_owned(),
            app_name: DEFAULT_APP_NAME.to_owned(),
            app_version: env!("CARGO_PKG_VERSION").to_owned(),
            max_pages: None,
            s3_client: None,
            sns_client: None,
        }
    }
}

impl Builder {
    /// AWS region the bucket and topic live in.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// AWS account ID, used to derive the topic ARN when none is given.
    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = account_id.into();
        self
    }

    /// Bucket to scan.
    pub fn bucket_name(mut self, bucket_name: impl Into<String>) -> Self {
        self.bucket_name = bucket_name.into();
        self
    }

    /// Name of the notification topic.
    ///
    /// Default is `S3ScannerNotifications`
    pub fn topic_name(mut self, topic_name: impl Into<String>) -> Self {
        self.topic_name = topic_name.into();
        self
    }

    /// Explicit topic ARN. Empty values are treated as unset.
    pub fn topic_arn(self, topic_arn: impl Into<String>) -> Self {
        self.set_topic_arn(Some(topic_arn.into()))
    }

    /// Explicit topic ARN. Empty values are treated as unset.
    pub fn set_topic_arn(mut self, topic_arn: Option<String>) -> Self {
        self.topic_arn = topic_arn.filter(|arn| !arn.is_empty());
        self
    }

    /// Address subscribed to the topic.
    pub fn notification_email(mut self, email: impl Into<String>) -> Self {
        self.notification_email = email.into();
        self
    }

    /// Log verbosity.
    ///
    /// Default is `INFO`
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Application name shown in the notification subject.
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Application version shown in the notification body.
    ///
    /// Default is the crate version
    pub fn app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = version.into();
        self
    }

    /// Maximum number of listing pages a scan may request before failing with
    /// [`ErrorKind::ScanIncomplete`](crate::error::ErrorKind::ScanIncomplete).
    ///
    /// Default is unbounded
    pub fn max_pages(self, max_pages: usize) -> Self {
        self.set_max_pages(Some(max_pages))
    }

    /// Maximum number of listing pages a scan may request, `None` for unbounded.
    pub fn set_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set an explicit S3 client to use.
    pub fn s3_client(mut self, client: aws_sdk_s3::Client) -> Self {
        self.s3_client = Some(client);
        self
    }

    /// Set an explicit SNS client to use.
    pub fn sns_client(mut self, client: aws_sdk_sns::Client) -> Self {
        self.sns_client = Some(client);
        self
    }

    /// Consumes the builder and constructs a [`Config`]
    ///
    /// Both SDK clients are required. Settings are not validated here, see [`Config::validate`].
    pub fn build(self) -> Result<Config, BuildError> {
        Ok(Config {
            region: self.region,
            account_id: self.account_id,
            bucket_name: self.bucket_name,
            topic_name: self.topic_name,
            topic_arn: self.topic_arn,
            notification_email: self.notification_email,
            log_level: self.log_level,
            app_name: self.app_name,
            app_version: self.app_version,
            max_pages: self.max_pages,
            s3_client: self.s3_client.ok_or_else(|| {
                BuildError::missing_field("s3_client", "an S3 client is required")
            })?,
            sns_client: self.sns_client.ok_or_else(|| {
                BuildError::missing_field("sns_client", "an SNS client is required")
            })?,
        })
    }
}
