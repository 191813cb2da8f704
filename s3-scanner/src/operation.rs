/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Types for the bucket scan operation
pub mod scan_bucket;

/// Types for the scan notification operation
pub mod send_notification;
