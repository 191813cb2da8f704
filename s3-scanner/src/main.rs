/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use s3_scanner::handler::{handle, InvocationResult};
use s3_scanner::Client;
use serde_json::Value;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let loader = s3_scanner::from_env();

    // RUST_LOG directives, when present, refine the LOG_LEVEL default
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(loader.max_level()).into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let config = loader.load().await?;
    let client = Client::new(config);
    let client = &client;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        let result: InvocationResult = handle(client, &event.context.request_id).await;
        Ok::<_, Error>(result)
    }))
    .await
}
