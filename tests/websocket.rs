#![cfg(feature = "ws")]
#![allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    reason = "Do not need additional syntax for setting up tests"
)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use binance_client_sdk::error::Kind;
use binance_client_sdk::ws::{self, Bytes, CloseReason, Config, Session, State, WsError};
use futures_util::{SinkExt as _, StreamExt as _};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{sleep, timeout};
use tokio_tungstenite::tungstenite::Message;

const WAIT: Duration = Duration::from_secs(2);

#[derive(Clone, Debug)]
enum Command {
    Text(&'static str),
    Binary(&'static [u8]),
    /// Send a Close frame
    Close,
    /// Drop the TCP connection without a closing handshake
    Reset,
}

/// Mock WebSocket server.
struct MockWsServer {
    addr: SocketAddr,
    /// Commands applied to ALL connected clients
    command_tx: broadcast::Sender<Command>,
    /// Notified when a client sends a Close frame
    client_close_rx: mpsc::UnboundedReceiver<()>,
}

impl MockWsServer {
    /// Start a mock WebSocket server on a random port.
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (command_tx, _) = broadcast::channel::<Command>(100);
        let (client_close_tx, client_close_rx) = mpsc::unbounded_channel();

        let commands = command_tx.clone();

        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };

                // Subscribe before the handshake completes so nothing sent after `serve`
                // returns is missed
                let mut command_rx = commands.subscribe();
                let Ok(ws_stream) = tokio_tungstenite::accept_async(stream).await else {
                    continue;
                };

                let (mut write, mut read) = ws_stream.split();
                let close_tx = client_close_tx.clone();

                tokio::spawn(async move {
                    loop {
                        tokio::select! {
                            msg = read.next() => {
                                match msg {
                                    Some(Ok(Message::Close(_))) => {
                                        drop(close_tx.send(()));
                                    }
                                    Some(Ok(_)) => {}
                                    _ => break,
                                }
                            }
                            command = command_rx.recv() => {
                                let message = match command {
                                    Ok(Command::Text(text)) => Message::Text(text.into()),
                                    Ok(Command::Binary(data)) => {
                                        Message::Binary(Bytes::from_static(data))
                                    }
                                    Ok(Command::Close) => Message::Close(None),
                                    Ok(Command::Reset) | Err(_) => break,
                                };
                                if write.send(message).await.is_err() {
                                    break;
                                }
                            }
                        }
                    }
                });
            }
        });

        Self {
            addr,
            command_tx,
            client_close_rx,
        }
    }

    fn ws_url(&self, path: &str) -> String {
        format!("ws://{}{}", self.addr, path)
    }

    fn send(&self, command: Command) {
        drop(self.command_tx.send(command));
    }

    /// Waits for the client's Close frame.
    async fn recv_client_close(&mut self) -> Option<()> {
        timeout(WAIT, self.client_close_rx.recv())
            .await
            .ok()
            .flatten()
    }
}

/// Serves `server` with a handler that forwards every payload to the returned receiver.
async fn serve_forwarding(
    server: &MockWsServer,
) -> anyhow::Result<(Session, mpsc::UnboundedReceiver<Bytes>)> {
    let (tx, rx) = mpsc::unbounded_channel();

    let session = ws::serve(
        &server.ws_url("/ws/btcusdt@trade"),
        &Config::default(),
        move |payload: Bytes| {
            let tx = tx.clone();
            async move {
                drop(tx.send(payload));
            }
        },
    )
    .await?;

    Ok((session, rx))
}

mod delivery {
    use super::*;

    #[tokio::test]
    async fn text_and_binary_payloads_are_delivered() -> anyhow::Result<()> {
        let server = MockWsServer::start().await;
        let (session, mut rx) = serve_forwarding(&server).await?;

        assert!(session.state().is_open());

        server.send(Command::Text(r#"{"e":"trade","s":"BTCUSDT"}"#));
        server.send(Command::Binary(&[1, 2, 3]));

        let mut received = vec![
            timeout(WAIT, rx.recv()).await?.unwrap(),
            timeout(WAIT, rx.recv()).await?.unwrap(),
        ];
        received.sort();

        assert_eq!(
            received,
            vec![
                Bytes::from_static(&[1, 2, 3]),
                Bytes::from_static(br#"{"e":"trade","s":"BTCUSDT"}"#),
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn blocked_handler_does_not_delay_next_message() -> anyhow::Result<()> {
        let server = MockWsServer::start().await;
        let (tx, mut rx) = mpsc::unbounded_channel();

        let _session = ws::serve(
            &server.ws_url("/ws"),
            &Config::default(),
            move |payload: Bytes| {
                let tx = tx.clone();
                async move {
                    if payload == "M1" {
                        std::future::pending::<()>().await;
                    }
                    drop(tx.send(payload));
                }
            },
        )
        .await?;

        server.send(Command::Text("M1"));
        server.send(Command::Text("M2"));

        let received = timeout(WAIT, rx.recv()).await?.unwrap();
        assert_eq!(received, "M2");

        Ok(())
    }
}

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn remote_close_completes_once() -> anyhow::Result<()> {
        let server = MockWsServer::start().await;
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let session = ws::serve(
            &server.ws_url("/ws"),
            &Config::default(),
            move |_payload: Bytes| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            },
        )
        .await?;

        server.send(Command::Text("M1"));
        server.send(Command::Close);
        server.send(Command::Text("after close"));

        let reason = timeout(WAIT, session.done()).await?;
        assert!(matches!(reason, CloseReason::Remote));

        // Later observers see the same completion
        assert!(matches!(session.clone().done().await, CloseReason::Remote));
        assert!(matches!(
            session.state(),
            State::Closed(CloseReason::Remote)
        ));

        sleep(Duration::from_millis(200)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        Ok(())
    }

    #[tokio::test]
    async fn local_close_sends_close_frame() -> anyhow::Result<()> {
        let mut server = MockWsServer::start().await;
        let (session, _rx) = serve_forwarding(&server).await?;

        session.close();
        session.close();

        let reason = timeout(WAIT, session.done()).await?;
        assert!(matches!(reason, CloseReason::Local));
        assert!(server.recv_client_close().await.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn dropping_session_closes_connection() -> anyhow::Result<()> {
        let mut server = MockWsServer::start().await;
        let (session, _rx) = serve_forwarding(&server).await?;

        drop(session);

        assert!(server.recv_client_close().await.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn reset_connection_is_failure() -> anyhow::Result<()> {
        let server = MockWsServer::start().await;
        let (session, _rx) = serve_forwarding(&server).await?;

        server.send(Command::Reset);

        let reason = timeout(WAIT, session.done()).await?;
        assert!(matches!(reason, CloseReason::Failed(_)));

        Ok(())
    }
}

mod handshake {
    use super::*;

    #[tokio::test]
    async fn refused_connection_returns_error() -> anyhow::Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        drop(listener);

        let result = ws::serve(
            &format!("ws://{addr}/ws"),
            &Config::default(),
            |_payload: Bytes| async {},
        )
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.kind(), Kind::WebSocket);
        assert!(matches!(
            err.downcast_ref::<WsError>(),
            Some(WsError::Connection(_))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn silent_server_hits_handshake_timeout() -> anyhow::Result<()> {
        // Accepts TCP connections but never answers the upgrade request
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let config = Config::builder()
            .handshake_timeout(Duration::from_millis(200))
            .build();
        let result = ws::serve(&format!("ws://{addr}/ws"), &config, |_payload: Bytes| async {}).await;

        let err = result.unwrap_err();
        assert_eq!(err.kind(), Kind::WebSocket);
        assert!(matches!(
            err.downcast_ref::<WsError>(),
            Some(WsError::HandshakeTimeout(_))
        ));

        drop(listener);

        Ok(())
    }
}
