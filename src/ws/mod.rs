//! Raw WebSocket streams.
//!
//! **Feature flag:** `ws` (enabled by default)
//!
//! [`serve`] opens one connection and hands every inbound text or binary payload to a handler.
//! Each payload gets its own task, so a slow handler never holds up the ones after it. The
//! returned [`Session`] reports when the stream has ended and why. Dropped streams are not
//! reconnected; call [`serve`] again to resume.
//!
//! ```rust,no_run
//! use binance_client_sdk::DEFAULT_STREAM_HOST;
//! use binance_client_sdk::ws::{self, Bytes, Config};
//!
//! # async fn run() -> binance_client_sdk::Result<()> {
//! let endpoint = format!("{DEFAULT_STREAM_HOST}/btcusdt@trade");
//! let session = ws::serve(&endpoint, &Config::default(), |payload: Bytes| async move {
//!     println!("{}", String::from_utf8_lossy(&payload));
//! })
//! .await?;
//!
//! let reason = session.done().await;
//! println!("stream ended: {reason:?}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod session;

pub use config::Config;
#[expect(
    clippy::module_name_repetitions,
    reason = "WsError includes module name for clarity when used outside this module"
)]
pub use error::WsError;
pub use session::{CloseReason, Session, State, serve};
/// Payload type handed to stream handlers.
pub use tokio_tungstenite::tungstenite::Bytes;
