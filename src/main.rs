use alloy::signers::local::PrivateKeySigner;
use anyhow::Context;
use dotenv::dotenv;
use kaia_trading_mcp::{
    client::TradingClient, config, connection, server, tools, upload::UploadClient,
};
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Kaia Trading MCP Server...");

    let config = config::Config::from_env()?;
    let signer =
        PrivateKeySigner::from_str(&config.private_key).context("PRIVATE_KEY is not a valid key")?;
    let address = signer.address();
    let connection = connection::connect(&config.rpc_url, signer).await?;

    let client = TradingClient::new(
        connection,
        address,
        config.chain,
        UploadClient::new(config.api_url.clone()),
        config.web_url.as_deref(),
    );

    server::run(&client, tools::registry()).await?;

    Ok(())
}
