//! Print a pre-signed URL for one object.
//!
//! Reads the disk configuration from `S3_*` environment variables (or a
//! `.env` file), e.g.
//!
//! ```text
//! S3_ENDPOINT=http://minio:9000 S3_BUCKET=media \
//! S3_ACCESS_KEY=minioadmin S3_SECRET_KEY=minioadmin \
//! S3_TEMPORARY_URL=https://files.example.com \
//! cargo run --example presign -- photos/cat.jpg --expires-in 600
//! ```

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, ValueEnum};
use s3_temporary_urls::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Action {
    Download,
    Upload,
}

#[derive(Parser, Debug)]
#[command(name = "presign")]
#[command(about = "Issue a pre-signed URL through the configured public endpoint")]
struct Cli {
    /// Object key to sign
    key: String,

    #[arg(long, value_enum, default_value = "download")]
    action: Action,

    /// Lifetime of the URL in seconds
    #[arg(long, default_value_t = 3600)]
    expires_in: i64,

    /// Content type the uploader must send (upload only)
    #[arg(long)]
    content_type: Option<String>,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let issuer = create_issuer_from_env().context("failed to configure issuer")?;
    info!(endpoint = %issuer.endpoint(), public = issuer.has_public_endpoint(), "issuer ready");

    let expiration = Utc::now() + Duration::seconds(cli.expires_in);
    let options = match cli.content_type {
        Some(content_type) => SigningOptions::new().with_content_type(content_type),
        None => SigningOptions::new(),
    };

    let signed = match cli.action {
        Action::Download => issuer.sign_download_url(&cli.key, expiration, &options).await,
        Action::Upload => issuer.sign_upload_url(&cli.key, expiration, &options).await,
    }
    .with_context(|| format!("failed to sign {}", cli.key))?;

    println!("{} {}", signed.method().http_method(), signed);
    for (name, value) in signed.headers() {
        println!("  {}: {}", name, value);
    }
    println!("expires at {}", signed.expires_at());

    Ok(())
}
