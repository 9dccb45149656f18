//! Raw stream example: prints trades for a symbol until the stream ends or Ctrl-C is pressed.
//!
//! Run with tracing enabled:
//! ```sh
//! RUST_LOG=info,binance_client_sdk=debug cargo run --example stream --features ws,tracing -- btcusdt@trade
//! ```

use std::time::Duration;

use binance_client_sdk::DEFAULT_STREAM_HOST;
use binance_client_sdk::ws::{self, Bytes, Config};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let stream = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "btcusdt@trade".to_owned());
    let endpoint = format!("{DEFAULT_STREAM_HOST}/{stream}");

    let config = Config::builder()
        .handshake_timeout(Duration::from_secs(10))
        .build();

    let session = ws::serve(&endpoint, &config, |payload: Bytes| async move {
        match serde_json::from_slice::<serde_json::Value>(&payload) {
            Ok(event) => info!(%event),
            Err(e) => warn!(error = %e, "non-JSON payload"),
        }
    })
    .await?;

    tokio::select! {
        reason = session.done() => info!(?reason, "stream ended"),
        _ = tokio::signal::ctrl_c() => {
            session.close();
            let reason = session.done().await;
            info!(?reason, "stream closed");
        }
    }

    Ok(())
}
