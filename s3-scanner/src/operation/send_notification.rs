/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;

mod input;
/// Input type for publishing a scan notification
pub use input::{SendNotificationInput, SendNotificationInputBuilder};

mod output;
/// Output type for a published scan notification
pub use output::SendNotificationOutput;

/// Notification rendering
pub mod message;
pub use message::NotificationMessage;

use std::sync::Arc;

use aws_sdk_sns::config::retry::RetryConfig;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_smithy_types::error::metadata::ErrorMetadata;

use crate::error::{Error, ErrorKind};

/// Operation struct for publishing a scan notification
#[derive(Clone, Default, Debug)]
pub(crate) struct SendNotification;

impl SendNotification {
    /// Execute a single `SendNotification` operation
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: SendNotificationInput,
    ) -> Result<SendNotificationOutput, Error> {
        let config = &handle.config;
        let message = NotificationMessage::render(&input, config.app_name(), config.app_version());
        tracing::debug!("email subject: {}", message.subject());

        let topic_arn = config.resolved_topic_arn();
        tracing::info!("publishing message to SNS topic: {topic_arn}");

        let response = handle
            .sns()
            .publish()
            .topic_arn(&topic_arn)
            .subject(message.subject())
            .message(message.body())
            .customize()
            // at most one publish per invocation
            .config_override(
                aws_sdk_sns::config::Builder::default().retry_config(RetryConfig::disabled()),
            )
            .send()
            .await
            .map_err(|err| {
                tracing::error!("SNS publish failed: {}", DisplayErrorContext(&err));
                let err = Error::from(err);
                match err.kind() {
                    ErrorKind::TopicNotFound => err.with_metadata(
                        ErrorMetadata::builder()
                            .code("TopicNotFound")
                            .message(format!("SNS topic not found: {topic_arn}"))
                            .build(),
                    ),
                    _ => err,
                }
            })?;

        let message_id = response.message_id().map(str::to_owned);
        tracing::info!(
            "SNS message published successfully. Message ID: {}",
            message_id.as_deref().unwrap_or("unknown")
        );
        tracing::debug!("notification sent to: {}", config.notification_email());
        tracing::debug!("object count in notification: {}", input.object_count());

        Ok(SendNotificationOutput {
            message_id,
            topic_arn,
        })
    }
}
