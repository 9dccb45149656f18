use std::time::Duration;

use bon::Builder;

/// Configuration for [`super::serve`].
#[non_exhaustive]
#[derive(Debug, Clone, Default, Builder)]
pub struct Config {
    /// Upper bound for the TCP, TLS and WebSocket handshake. Unbounded when `None`.
    pub handshake_timeout: Option<Duration>,
}
