use std::sync::Arc;
use std::time::Duration;

use bon::Builder;
use chrono::Utc;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Method};
use secrecy::ExposeSecret as _;
use url::Url;

use crate::auth::{self, API_KEY_HEADER, Credentials, SecurityLevel};
use crate::error::Error;
use crate::general::{PingRequest, ServerTimeRequest, ServerTimeResponse};
use crate::request::{ApiRequest, Endpoint};
use crate::{DEFAULT_HOST, Result, Timestamp};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Configuration for [`Client`]
#[derive(Clone, Debug, Default, Builder)]
pub struct Config {
    /// Whether signed requests take their `timestamp` from `GET /api/v3/time` instead of the
    /// local clock. This adds another round trip to every signed request.
    #[builder(default)]
    use_server_time: bool,
    /// `recvWindow`, in milliseconds, attached to every signed request. The exchange rejects a
    /// signed request whose timestamp is older than this window.
    recv_window: Option<u64>,
    /// Timeout applied to every call. [`ApiRequest::timeout`] overrides it per call.
    timeout: Option<Duration>,
}

/// The dispatch engine: turns [`ApiRequest`]s into authenticated HTTP calls.
///
/// A [`Client`] is cheap to clone and safe to share between tasks. Its [`Credentials`] are
/// fixed at construction and only ever read.
///
/// ```rust,no_run
/// use binance_client_sdk::auth::Credentials;
/// use binance_client_sdk::{API_KEY_VAR, Client, Config, DEFAULT_HOST, SECRET_KEY_VAR};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let credentials = Credentials::new(
///         std::env::var(API_KEY_VAR)?,
///         std::env::var(SECRET_KEY_VAR)?,
///     );
///     let config = Config::builder().recv_window(5_000).build();
///     let client = Client::with_credentials(DEFAULT_HOST, config, credentials)?;
///
///     println!("Server time: {}", client.server_time().await?);
///
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    config: Config,
    /// The [`Url`] against which `client` is making requests. Always ends with `/`.
    host: Url,
    credentials: Credentials,
    /// The inner [`ReqwestClient`] used to make requests to `host`.
    client: ReqwestClient,
}

impl Default for Client {
    fn default() -> Self {
        Client::new(DEFAULT_HOST, Config::default())
            .expect("Client with default endpoint should succeed")
    }
}

impl Client {
    /// Creates a client without credentials; only [`SecurityLevel::None`] calls will succeed.
    pub fn new(host: &str, config: Config) -> Result<Client> {
        Self::with_credentials(host, config, Credentials::default())
    }

    pub fn with_credentials(host: &str, config: Config, credentials: Credentials) -> Result<Client> {
        let mut headers = HeaderMap::new();

        headers.insert("User-Agent", HeaderValue::from_static("binance_client_sdk"));
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert("Connection", HeaderValue::from_static("keep-alive"));

        let mut builder = ReqwestClient::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let mut host = Url::parse(host)?;
        if !host.path().ends_with('/') {
            let path = format!("{}/", host.path());
            host.set_path(&path);
        }

        Ok(Self {
            inner: Arc::new(ClientInner {
                config,
                host,
                credentials,
                client,
            }),
        })
    }

    /// Returns the REST host URL.
    #[must_use]
    pub fn host(&self) -> &Url {
        &self.inner.host
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Authenticates and sends `request`, returning the raw response body.
    ///
    /// For [`SecurityLevel::Signed`] requests, `timestamp` (and `recvWindow` when configured)
    /// is appended to the form body if the request has one, otherwise to the query string.
    /// The signature is the hex HMAC-SHA256 of the encoded query string followed by the encoded
    /// body, computed over the same strings that are then sent.
    ///
    /// # Errors
    ///
    /// - [`crate::error::Kind::Configuration`] when a credential the security level needs is
    ///   missing; nothing is sent.
    /// - [`crate::error::Kind::Transport`] when no response was received.
    /// - [`crate::error::Kind::Api`] when the exchange answered with a non-successful status.
    pub async fn dispatch(&self, request: ApiRequest) -> Result<Vec<u8>> {
        let ApiRequest {
            method,
            endpoint,
            security,
            mut query,
            mut form,
            timeout,
        } = request;

        self.inner.credentials.require(security)?;

        let signed_in_body = !form.is_empty();
        if security == SecurityLevel::Signed {
            let timestamp = self.timestamp().await?;
            let signed = if signed_in_body {
                &mut form
            } else {
                &mut query
            };

            signed.set(auth::TIMESTAMP, timestamp);
            if let Some(recv_window) = self.inner.config.recv_window {
                signed.set(auth::RECV_WINDOW, recv_window);
            }
        }

        let mut query_string = query.encode()?;
        let mut body = form.encode()?;

        if security == SecurityLevel::Signed {
            let secret = self.inner.credentials.secret_key().ok_or_else(|| {
                Error::configuration("secret key is required for signed endpoints")
            })?;
            let signature = auth::hmac(secret, &format!("{query_string}{body}"))?;

            let target = if signed_in_body {
                &mut body
            } else {
                &mut query_string
            };
            if !target.is_empty() {
                target.push('&');
            }
            target.push_str(auth::SIGNATURE);
            target.push('=');
            target.push_str(&signature);
        }

        let mut url = self.inner.host.join(endpoint.trim_start_matches('/'))?;
        if !query_string.is_empty() {
            url.set_query(Some(&query_string));
        }

        let mut builder = self.inner.client.request(method, url);

        if security != SecurityLevel::None {
            let api_key = self.inner.credentials.api_key().ok_or_else(|| {
                Error::configuration("api key is required for authenticated endpoints")
            })?;
            let mut value = HeaderValue::from_str(api_key.expose_secret())?;
            value.set_sensitive(true);
            builder = builder.header(API_KEY_HEADER, value);
        }

        if !body.is_empty() {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
                .body(body);
        }

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        crate::execute(&self.inner.client, builder.build()?).await
    }

    /// Dispatches a typed [`Endpoint`] record and decodes its response.
    pub async fn send<E: Endpoint>(&self, endpoint: &E) -> Result<E::Response> {
        let raw = self.dispatch(endpoint.to_request()?).await?;

        crate::decode(&raw)
    }

    /// Tests connectivity to the REST API.
    pub async fn ping(&self) -> Result<()> {
        self.send(&PingRequest).await?;

        Ok(())
    }

    /// Returns the current server timestamp in milliseconds since Unix epoch.
    pub async fn server_time(&self) -> Result<Timestamp> {
        Ok(self.send(&ServerTimeRequest).await?.server_time)
    }

    async fn timestamp(&self) -> Result<Timestamp> {
        if !self.inner.config.use_server_time {
            return Ok(Utc::now().timestamp_millis());
        }

        // Bypasses `dispatch`, which would otherwise recurse into this method
        let url = self
            .inner
            .host
            .join(ServerTimeRequest::PATH.trim_start_matches('/'))?;
        let request = self.inner.client.request(Method::GET, url).build()?;
        let raw = crate::execute(&self.inner.client, request).await?;
        let response: ServerTimeResponse = crate::decode(&raw)?;

        Ok(response.server_time)
    }
}
