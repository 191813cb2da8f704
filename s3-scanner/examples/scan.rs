/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
use std::error::Error;
use std::time;

use aws_sdk_s3::error::DisplayErrorContext;
use clap::Parser;
use s3_scanner::operation::send_notification::{NotificationMessage, SendNotificationInput};
use s3_scanner::unit::round_to;
use tracing::{debug_span, Instrument};

type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Debug, Clone, clap::Parser)]
#[command(name = "scan")]
#[command(about = "Scans an S3 bucket and publishes a summary of its contents to SNS.")]
pub struct Args {
    /// Bucket to scan, overrides S3_BUCKET_NAME
    #[arg(long)]
    bucket: Option<String>,

    /// Topic to publish to, overrides SNS_TOPIC_ARN
    #[arg(long)]
    topic_arn: Option<String>,

    /// Stop listing after this many pages
    #[arg(long)]
    max_pages: Option<usize>,

    /// Scan and print the notification without publishing it
    #[arg(long, default_value_t = false, action = clap::ArgAction::SetTrue)]
    dry_run: bool,
}

async fn dry_run(client: &s3_scanner::Client) -> Result<(), BoxError> {
    let start = time::Instant::now();
    let scan = client.scan_bucket().send().await?;
    let elapsed = round_to(start.elapsed().as_secs_f64(), 2);
    let scan = scan.with_scan_duration(elapsed);

    let input = SendNotificationInput::builder().scan_result(&scan).build()?;
    let config = client.config();
    let message = NotificationMessage::render(&input, config.app_name(), config.app_version());

    println!("To: {}", config.resolved_topic_arn());
    println!("Subject: {}", message.subject());
    println!("{}", message.body());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let args = Args::parse();

    let mut loader = s3_scanner::from_env();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(
                    tracing_subscriber::filter::LevelFilter::from_level(loader.max_level()).into(),
                )
                .from_env_lossy(),
        )
        .with_thread_ids(true)
        .init();

    if let Some(bucket) = args.bucket {
        loader = loader.bucket_name(bucket);
    }
    if let Some(topic_arn) = args.topic_arn {
        loader = loader.topic_arn(topic_arn);
    }
    if let Some(max_pages) = args.max_pages {
        loader = loader.max_pages(max_pages);
    }

    let config = loader.load().await?;
    let client = s3_scanner::Client::new(config);

    if args.dry_run {
        if let Err(err) = dry_run(&client).instrument(debug_span!("dry-run")).await {
            eprintln!("dry run failed: {}", DisplayErrorContext(err.as_ref()));
            std::process::exit(1);
        }
        return Ok(());
    }

    let result = s3_scanner::handler::handle(&client, "local").await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    if !result.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
