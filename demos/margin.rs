//! Margin API example: connectivity checks, read-only margin lookups, and the loan history.
//!
//! Needs `BINANCE_API_KEY` and `BINANCE_SECRET_KEY`. Run with tracing enabled:
//! ```sh
//! RUST_LOG=info,hyper_util=off,hyper=off,reqwest=off,h2=off,rustls=off cargo run --example margin --features margin,tracing
//! ```
//!
//! Optionally log to a file:
//! ```sh
//! LOG_FILE=margin.log RUST_LOG=info,hyper_util=off,hyper=off,reqwest=off,h2=off,rustls=off cargo run --example margin --features margin,tracing
//! ```

use std::fs::File;

use binance_client_sdk::auth::Credentials;
use binance_client_sdk::margin::Client;
use binance_client_sdk::margin::types::{AssetRequest, LoansRequest, PairRequest, PriceIndexRequest};
use binance_client_sdk::{API_KEY_VAR, Config, DEFAULT_HOST, SECRET_KEY_VAR};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(path) = std::env::var("LOG_FILE") {
        let file = File::create(path)?;
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let credentials = Credentials::new(std::env::var(API_KEY_VAR)?, std::env::var(SECRET_KEY_VAR)?);
    let config = Config::builder().recv_window(5_000).build();
    let client = Client::new(DEFAULT_HOST, config, credentials)?;

    match client.inner().ping().await {
        Ok(()) => info!(endpoint = "ping"),
        Err(e) => debug!(endpoint = "ping", error = %e),
    }

    match client.inner().server_time().await {
        Ok(time) => info!(endpoint = "server_time", time),
        Err(e) => debug!(endpoint = "server_time", error = %e),
    }

    let request = AssetRequest::builder().asset("BNB").build();
    match client.asset(&request).await {
        Ok(asset) => info!(
            endpoint = "asset",
            name = %asset.name,
            borrowable = asset.borrowable,
            min_borrow = %asset.user_min_borrow
        ),
        Err(e) => debug!(endpoint = "asset", error = %e),
    }

    let request = PairRequest::builder().symbol("BNBBTC").build();
    match client.pair(&request).await {
        Ok(pair) => info!(
            endpoint = "pair",
            symbol = %pair.symbol,
            margin_trade = pair.is_margin_trade
        ),
        Err(e) => debug!(endpoint = "pair", error = %e),
    }

    let request = PriceIndexRequest::builder().symbol("BNBBTC").build();
    match client.price_index(&request).await {
        Ok(index) => info!(endpoint = "price_index", price = %index.price, calc_time = %index.calc_time),
        Err(e) => debug!(endpoint = "price_index", error = %e),
    }

    match client.account().await {
        Ok(account) => {
            info!(
                endpoint = "account",
                margin_level = %account.margin_level,
                net_asset_btc = %account.total_net_asset_of_btc
            );
            for asset in &account.user_assets {
                info!(endpoint = "account", asset = %asset.asset, free = %asset.free, borrowed = %asset.borrowed);
            }
        }
        Err(e) => debug!(endpoint = "account", error = %e),
    }

    let request = LoansRequest::builder().asset("BNB").size(10).build();
    match client.loans(&request).await {
        Ok(response) => {
            info!(endpoint = "loans", total = response.total);
            for loan in &response.rows {
                info!(endpoint = "loans", principal = %loan.principal, status = ?loan.status);
            }
        }
        Err(e) => debug!(endpoint = "loans", error = %e),
    }

    Ok(())
}
