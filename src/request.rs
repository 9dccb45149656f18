use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Result;
use crate::auth::SecurityLevel;
use crate::params::{ParamValue, Params};

/// One pending HTTP call: method, path, security level and parameters.
///
/// [`crate::client::Client::dispatch`] takes the descriptor by value, so it can neither be
/// changed nor reused once dispatch begins.
///
/// ```
/// use binance_client_sdk::auth::SecurityLevel;
/// use binance_client_sdk::request::ApiRequest;
///
/// let request = ApiRequest::post("/sapi/v1/margin/loan", SecurityLevel::Signed)
///     .form("asset", "BTC")
///     .form("amount", "1.000");
///
/// assert_eq!(request.endpoint(), "/sapi/v1/margin/loan");
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) endpoint: String,
    pub(crate) security: SecurityLevel,
    pub(crate) query: Params,
    pub(crate) form: Params,
    pub(crate) timeout: Option<Duration>,
}

impl ApiRequest {
    #[must_use]
    pub fn new<E: Into<String>>(method: Method, endpoint: E, security: SecurityLevel) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            security,
            query: Params::new(),
            form: Params::new(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn get<E: Into<String>>(endpoint: E, security: SecurityLevel) -> Self {
        Self::new(Method::GET, endpoint, security)
    }

    #[must_use]
    pub fn post<E: Into<String>>(endpoint: E, security: SecurityLevel) -> Self {
        Self::new(Method::POST, endpoint, security)
    }

    #[must_use]
    pub fn put<E: Into<String>>(endpoint: E, security: SecurityLevel) -> Self {
        Self::new(Method::PUT, endpoint, security)
    }

    #[must_use]
    pub fn delete<E: Into<String>>(endpoint: E, security: SecurityLevel) -> Self {
        Self::new(Method::DELETE, endpoint, security)
    }

    /// Sets a query string parameter.
    #[must_use]
    pub fn query<K: Into<String>, V: Into<ParamValue>>(mut self, key: K, value: V) -> Self {
        self.query.set(key, value);
        self
    }

    /// Sets a form body parameter.
    #[must_use]
    pub fn form<K: Into<String>, V: Into<ParamValue>>(mut self, key: K, value: V) -> Self {
        self.form.set(key, value);
        self
    }

    /// Merges `params` into the query string, replacing existing keys.
    #[must_use]
    pub fn query_params(mut self, params: Params) -> Self {
        self.query.merge(params);
        self
    }

    /// Merges `params` into the form body, replacing existing keys.
    #[must_use]
    pub fn form_params(mut self, params: Params) -> Self {
        self.form.merge(params);
        self
    }

    /// Deadline for this call only, overriding [`crate::client::Config`]'s timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn security(&self) -> SecurityLevel {
        self.security
    }

    #[must_use]
    pub fn query_string_params(&self) -> &Params {
        &self.query
    }

    #[must_use]
    pub fn form_body_params(&self) -> &Params {
        &self.form
    }
}

/// A typed request record that knows how to reach its endpoint.
///
/// The record's serialized fields become the call's parameters: query string parameters for
/// `GET`/`DELETE`, form body parameters otherwise. Use `#[serde(rename = "..")]` to map field
/// names to parameter keys and `Option` to mark optional parameters.
pub trait Endpoint: Serialize {
    const METHOD: Method;
    const PATH: &'static str;
    const SECURITY: SecurityLevel;

    type Response: DeserializeOwned;

    /// Builds the [`ApiRequest`] for this record.
    fn to_request(&self) -> Result<ApiRequest> {
        let params = Params::from_serialize(self)?;
        let request = ApiRequest::new(Self::METHOD, Self::PATH, Self::SECURITY);

        Ok(if Self::METHOD == Method::GET || Self::METHOD == Method::DELETE {
            request.query_params(params)
        } else {
            request.form_params(params)
        })
    }
}
