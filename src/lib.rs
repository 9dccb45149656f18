#![cfg_attr(doc, doc = include_str!("../README.md"))]

pub mod auth;
pub mod client;
pub mod decode;
pub mod error;
pub mod general;
#[cfg(feature = "margin")]
pub mod margin;
pub mod params;
pub mod request;
pub mod types;
#[cfg(feature = "ws")]
pub mod ws;

use reqwest::{Method, Request, StatusCode};
use serde::Deserialize;

pub use crate::client::{Client, Config};
pub use crate::decode::decode;
use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Default REST host.
pub const DEFAULT_HOST: &str = "https://api.binance.com";

/// Default raw stream host; append a stream name such as `/btcusdt@trade`.
pub const DEFAULT_STREAM_HOST: &str = "wss://stream.binance.com:9443/ws";

pub const API_KEY_VAR: &str = "BINANCE_API_KEY";
pub const SECRET_KEY_VAR: &str = "BINANCE_SECRET_KEY";

/// Timestamp in milliseconds since [`std::time::UNIX_EPOCH`]
pub type Timestamp = i64;

/// Error body returned with non-successful statuses.
#[derive(Deserialize)]
struct ErrorBody {
    code: i64,
    #[serde(alias = "message")]
    msg: String,
}

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "debug",
        skip(client, request),
        fields(
            method = %request.method(),
            path = request.url().path(),
            status_code
        )
    )
)]
async fn execute(client: &reqwest::Client, request: Request) -> Result<Vec<u8>> {
    let method = request.method().clone();
    let path = request.url().path().to_owned();

    let response = client.execute(request).await?;
    let status_code = response.status();

    #[cfg(feature = "tracing")]
    tracing::Span::current().record("status_code", status_code.as_u16());

    let body = response.bytes().await?;

    if !status_code.is_success() {
        let error = api_error(status_code, method, path, &body);

        #[cfg(feature = "tracing")]
        tracing::warn!(error = %error, "API request failed");

        return Err(error);
    }

    Ok(body.to_vec())
}

fn api_error(status_code: StatusCode, method: Method, path: String, body: &[u8]) -> Error {
    if let Ok(ErrorBody { code, msg }) = serde_json::from_slice::<ErrorBody>(body) {
        return Error::api(status_code, method, path, Some(code), msg);
    }

    let text = String::from_utf8_lossy(body);
    let message = if text.trim().is_empty() {
        status_code
            .canonical_reason()
            .unwrap_or("request failed")
            .to_owned()
    } else {
        text.into_owned()
    };

    Error::api(status_code, method, path, None, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Api, Kind};

    #[test]
    fn api_error_reads_code_and_message() {
        let error = api_error(
            StatusCode::BAD_REQUEST,
            Method::GET,
            "/sapi/v1/margin/pair".to_owned(),
            br#"{"code":-1121,"msg":"Invalid symbol."}"#,
        );

        assert_eq!(error.kind(), Kind::Api);
        let api = error.downcast_ref::<Api>().unwrap();
        assert_eq!(api.code, Some(-1121));
        assert_eq!(api.message, "Invalid symbol.");
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_without_body_uses_status_reason() {
        let error = api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            Method::GET,
            "/api/v3/time".to_owned(),
            b"",
        );

        let api = error.downcast_ref::<Api>().unwrap();
        assert_eq!(api.code, None);
        assert_eq!(api.message, "Service Unavailable");
    }
}
