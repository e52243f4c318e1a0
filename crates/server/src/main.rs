// ABOUTME: Entry point for the scraper API server binary.
// ABOUTME: Reads settings from flags/env, initialises logging and serves the router.

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use digests_scrape::Client;
use digests_scrape_server::observability::{init_logging, LogConfig};
use digests_scrape_server::{create_app, AppState, ServerArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();

    let log_path = init_logging(LogConfig {
        log_dir: args.log_dir.clone(),
        emit_stderr: true,
        format: args.log_format,
        default_filter: args.environment.default_log_filter(),
    })?;

    let client = Client::builder()
        .timeout(args.timeout())
        .allow_private_networks(args.allow_private_networks)
        .build()?;

    let app = create_app(AppState::new(client, args.environment, Some(log_path.clone())));

    let addr = args.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        %addr,
        environment = args.environment.as_str(),
        log_file = %log_path.display(),
        "scraper API listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
