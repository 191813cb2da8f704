/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Output type for a published scan notification
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendNotificationOutput {
    /// ID SNS assigned to the published message
    pub message_id: Option<String>,

    /// The topic the message was published to
    pub topic_arn: String,
}

impl SendNotificationOutput {
    /// ID SNS assigned to the published message
    pub fn message_id(&self) -> Option<&str> {
        self.message_id.as_deref()
    }

    /// The topic the message was published to
    pub fn topic_arn(&self) -> &str {
        &self.topic_arn
    }
}
