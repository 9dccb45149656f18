use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

use hmac::digest::InvalidLength;
/// HTTP method type, re-exported for use with error inspection.
pub use reqwest::Method;
/// HTTP status code type, re-exported for use with error inspection.
pub use reqwest::StatusCode;
use reqwest::header;

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A credential required by the request's security level is missing
    Configuration,
    /// The request never produced an HTTP response (connect, TLS, timeout)
    Transport,
    /// The exchange answered with a non-successful HTTP status
    Api,
    /// The exchange answered successfully but the payload did not match the expected shape
    Decode,
    /// A request value could not be turned into parameters
    Validation,
    /// Internal error from dependencies
    Internal,
    /// Error related to WebSocket connections
    WebSocket,
}

#[derive(Debug)]
pub struct Error {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    backtrace: Backtrace,
}

impl Error {
    pub fn with_source<S: StdError + Send + Sync + 'static>(kind: Kind, source: S) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            backtrace: Backtrace::capture(),
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        let e = self.source.as_deref()?;
        e.downcast_ref::<E>()
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Validation {
            reason: message.into(),
        }
        .into()
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Configuration {
            reason: message.into(),
        }
        .into()
    }

    pub fn api<S: Into<String>>(
        status: StatusCode,
        method: Method,
        path: String,
        code: Option<i64>,
        message: S,
    ) -> Self {
        Api {
            status,
            method,
            path,
            code,
            message: message.into(),
        }
        .into()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(src) => write!(f, "{:?}: {}", self.kind, src),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

/// The exchange rejected a request.
///
/// `code` and `message` come from the `{"code": .., "msg": ..}` error body. When the body
/// could not be parsed, `code` is `None` and `message` holds the raw body text.
#[non_exhaustive]
#[derive(Debug)]
pub struct Api {
    pub status: StatusCode,
    pub method: Method,
    pub path: String,
    pub code: Option<i64>,
    pub message: String,
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(
                f,
                "error({}) making {} call to {}: code {code}, {}",
                self.status, self.method, self.path, self.message
            ),
            None => write!(
                f,
                "error({}) making {} call to {} with {}",
                self.status, self.method, self.path, self.message
            ),
        }
    }
}

impl StdError for Api {}

#[non_exhaustive]
#[derive(Debug)]
pub struct Configuration {
    pub reason: String,
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "misconfigured client: {}", self.reason)
    }
}

impl StdError for Configuration {}

#[non_exhaustive]
#[derive(Debug)]
pub struct Validation {
    pub reason: String,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid: {}", self.reason)
    }
}

impl StdError for Validation {}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            Error::with_source(Kind::Internal, e)
        } else {
            Error::with_source(Kind::Transport, e)
        }
    }
}

impl From<header::InvalidHeaderValue> for Error {
    fn from(e: header::InvalidHeaderValue) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<InvalidLength> for Error {
    fn from(e: InvalidLength) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::with_source(Kind::Decode, e)
    }
}

impl From<serde_html_form::ser::Error> for Error {
    fn from(e: serde_html_form::ser::Error) -> Self {
        Error::with_source(Kind::Validation, e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<Validation> for Error {
    fn from(err: Validation) -> Self {
        Error::with_source(Kind::Validation, err)
    }
}

impl From<Configuration> for Error {
    fn from(err: Configuration) -> Self {
        Error::with_source(Kind::Configuration, err)
    }
}

impl From<Api> for Error {
    fn from(err: Api) -> Self {
        Error::with_source(Kind::Api, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_display_with_code_should_succeed() {
        let api = Api {
            status: StatusCode::BAD_REQUEST,
            method: Method::POST,
            path: "/sapi/v1/margin/transfer".to_owned(),
            code: Some(-1102),
            message: "Mandatory parameter 'asset' was not sent.".to_owned(),
        };

        assert_eq!(
            api.to_string(),
            "error(400 Bad Request) making POST call to /sapi/v1/margin/transfer: code -1102, \
             Mandatory parameter 'asset' was not sent."
        );
    }

    #[test]
    fn api_into_error_should_keep_kind_and_source() {
        let error = Error::api(
            StatusCode::BAD_GATEWAY,
            Method::GET,
            "/api/v3/time".to_owned(),
            None,
            "<html>bad gateway</html>",
        );

        assert_eq!(error.kind(), Kind::Api);
        let api = error.downcast_ref::<Api>().unwrap();
        assert_eq!(api.status, StatusCode::BAD_GATEWAY);
        assert!(api.code.is_none());
    }

    #[test]
    fn configuration_into_error_should_succeed() {
        let error = Error::configuration("secret key is required for signed requests");

        assert_eq!(error.kind(), Kind::Configuration);
        assert_eq!(
            error.to_string(),
            "Configuration: misconfigured client: secret key is required for signed requests"
        );
    }
}
