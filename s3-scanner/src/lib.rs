/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/* End of automatically managed default lints */
#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

//! Scan an Amazon S3 bucket and publish a summary of its contents to Amazon SNS.
//!
//! The crate is built around two operations, [`scan_bucket`](crate::Client::scan_bucket)
//! and [`send_notification`](crate::Client::send_notification), plus an entry point,
//! [`handler::handle`], that runs both and turns every outcome into an
//! [`InvocationResult`](crate::handler::InvocationResult).
//!
//! # Examples
//!
//! Load the configuration from the environment and run a single invocation:
//!
//! ```no_run
//! # async fn example() -> Result<(), s3_scanner::error::Error> {
//! let config = s3_scanner::from_env().load().await?;
//! let client = s3_scanner::Client::new(config);
//!
//! let result = s3_scanner::handler::handle(&client, "local-test").await;
//! println!("{}", result.status_code);
//! # Ok(())
//! # }
//! ```
//!
//! Scan a bucket without publishing anything:
//!
//! ```no_run
//! # async fn example(client: s3_scanner::Client) -> Result<(), s3_scanner::error::Error> {
//! let scan = client.scan_bucket().bucket("my-bucket").send().await?;
//! println!("{} objects", scan.object_count());
//! # Ok(())
//! # }
//! ```

/// Maximum number of keys S3 returns for a single `ListObjectsV2` request
pub(crate) const MAX_KEYS_PER_PAGE: i32 = 1000;

/// Error types emitted by `s3-scanner`
pub mod error;

/// Common types used by `s3-scanner`
pub mod types;

/// Byte unit conversions
pub mod unit;

/// Scanner client
pub mod client;

/// Scanner operations
pub mod operation;

/// Scanner configuration
pub mod config;

/// Invocation entry point
pub mod handler;

pub use self::client::Client;
use self::config::loader::ConfigLoader;
pub use self::config::Config;

/// Create a config loader that resolves settings from the process environment
pub fn from_env() -> ConfigLoader {
    ConfigLoader::from_env()
}
