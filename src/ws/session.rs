use std::future::Future;
use std::sync::Arc;

use futures::StreamExt as _;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::{self, Bytes, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use super::config::Config;
use super::error::WsError;
use crate::Result;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Why a session ended.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum CloseReason {
    /// [`Session::close`] was called, or every [`Session`] handle was dropped
    Local,
    /// The server sent a Close frame or ended the stream
    Remote,
    /// Reading from the socket failed
    Failed(Arc<tungstenite::Error>),
    /// The receive task stopped without reporting, e.g. because its runtime shut down
    Aborted,
}

/// Lifecycle of a session: `Connecting → Open → Closed`.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum State {
    /// Handshake in progress. [`serve`] only returns a [`Session`] once the handshake is done,
    /// so [`Session::state`] never reports this state.
    Connecting,
    Open,
    Closed(CloseReason),
}

impl State {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    #[must_use]
    pub const fn close_reason(&self) -> Option<&CloseReason> {
        match self {
            Self::Closed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Handle to a running stream.
///
/// Clones share the same connection. The connection is closed once [`Session::close`] is called
/// or the last handle is dropped.
#[derive(Debug, Clone)]
#[must_use = "dropping every Session handle closes the connection"]
pub struct Session {
    state_rx: watch::Receiver<State>,
    close_tx: mpsc::Sender<()>,
}

impl Session {
    /// Returns the current state without waiting.
    #[must_use]
    pub fn state(&self) -> State {
        self.state_rx.borrow().clone()
    }

    /// Asks the receive loop to send a Close frame and stop. Returns immediately; await
    /// [`Session::done`] to observe the shutdown.
    pub fn close(&self) {
        // A full channel already holds a pending close request
        _ = self.close_tx.try_send(());
    }

    /// Waits until the session is closed and returns the reason. Every call, from any clone,
    /// observes the same reason.
    pub async fn done(&self) -> CloseReason {
        let mut state_rx = self.state_rx.clone();

        match state_rx.wait_for(|state| state.close_reason().is_some()).await {
            Ok(state) => state.close_reason().cloned().unwrap_or(CloseReason::Aborted),
            Err(_closed) => CloseReason::Aborted,
        }
    }
}

/// Connects to `endpoint` and hands every inbound text or binary payload to `handler`.
///
/// Each payload is passed to its own [`tokio::spawn`]ed task, so handlers run concurrently with
/// the receive loop and with each other. There is no ordering between handler invocations and no
/// bound on how many may be in flight. Control frames are not delivered.
///
/// Handlers run on the async runtime; offload blocking work with
/// [`tokio::task::spawn_blocking`].
///
/// # Errors
///
/// Returns [`crate::error::Kind::WebSocket`] if the handshake fails or exceeds
/// [`Config::handshake_timeout`]. No session exists in that case.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(config, handler), err)
)]
pub async fn serve<H, Fut>(endpoint: &str, config: &Config, handler: H) -> Result<Session>
where
    H: Fn(Bytes) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let (state_tx, state_rx) = watch::channel(State::Connecting);

    let connect = connect_async(endpoint);
    let (stream, _response) = match config.handshake_timeout {
        Some(limit) => timeout(limit, connect)
            .await
            .map_err(|_elapsed| WsError::HandshakeTimeout(limit))??,
        None => connect.await?,
    };

    state_tx.send_replace(State::Open);

    #[cfg(feature = "tracing")]
    tracing::debug!("stream open");

    let (close_tx, close_rx) = mpsc::channel(1);
    tokio::spawn(receive_loop(stream, handler, close_rx, state_tx));

    Ok(Session { state_rx, close_tx })
}

async fn receive_loop<H, Fut>(
    mut stream: WsStream,
    handler: H,
    mut close_rx: mpsc::Receiver<()>,
    state_tx: watch::Sender<State>,
) where
    H: Fn(Bytes) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let reason = loop {
        tokio::select! {
            // `None` means every Session handle is gone
            _ = close_rx.recv() => {
                if let Err(e) = stream.close(None).await {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(error = %e, "unable to send Close frame");
                    #[cfg(not(feature = "tracing"))]
                    let _ = &e;
                }
                break CloseReason::Local;
            }
            message = stream.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(len = text.len(), "received text message");

                    tokio::spawn(handler(Bytes::from(text)));
                }
                Some(Ok(Message::Binary(payload))) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(len = payload.len(), "received binary message");

                    tokio::spawn(handler(payload));
                }
                Some(Ok(Message::Close(frame))) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(?frame, "server closed the stream");
                    #[cfg(not(feature = "tracing"))]
                    let _ = &frame;

                    // Flushes the Close reply queued by tungstenite
                    if let Err(e) = stream.close(None).await {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(error = %e, "unable to flush Close reply");
                        #[cfg(not(feature = "tracing"))]
                        let _ = &e;
                    }
                    break CloseReason::Remote;
                }
                // Ping, Pong and raw frames; pings are answered by tungstenite
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %e, "stream read failed");

                    break CloseReason::Failed(Arc::new(e));
                }
                None => break CloseReason::Remote,
            }
        }
    };

    drop(stream);

    #[cfg(feature = "tracing")]
    tracing::debug!(?reason, "stream closed");

    state_tx.send_replace(State::Closed(reason));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_reason_only_when_closed() {
        assert!(State::Connecting.close_reason().is_none());
        assert!(State::Open.is_open());
        assert!(matches!(
            State::Closed(CloseReason::Remote).close_reason(),
            Some(CloseReason::Remote)
        ));
    }
}
