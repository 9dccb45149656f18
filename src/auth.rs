use std::fmt;

use hmac::{Hmac, Mac as _};
/// Secret string types that redact values in debug output for security.
pub use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::Result;
use crate::error::Error;

/// Header carrying the API key on [`SecurityLevel::ApiKey`] and [`SecurityLevel::Signed`]
/// requests.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

pub(crate) const TIMESTAMP: &str = "timestamp";
pub(crate) const RECV_WINDOW: &str = "recvWindow";
pub(crate) const SIGNATURE: &str = "signature";

/// Authentication strength an endpoint requires.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SecurityLevel {
    /// Public endpoint, nothing attached.
    #[default]
    None,
    /// The API key travels in the [`API_KEY_HEADER`], no signature.
    ApiKey,
    /// The API key header plus `timestamp` and an HMAC-SHA256 `signature` parameter.
    Signed,
}

/// API key and secret key used to authenticate to the exchange.
///
/// Both halves are optional so that a client can be built for public or key-only endpoints;
/// dispatching a request whose [`SecurityLevel`] needs a missing half fails with
/// [`crate::error::Kind::Configuration`] before anything is sent. Neither value is ever
/// printed by [`fmt::Debug`].
#[derive(Clone, Default)]
pub struct Credentials {
    pub(crate) api_key: Option<SecretString>,
    pub(crate) secret_key: Option<SecretString>,
}

impl Credentials {
    #[must_use]
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key)),
            secret_key: Some(SecretString::from(secret_key)),
        }
    }

    /// Credentials that can only reach [`SecurityLevel::ApiKey`] endpoints.
    #[must_use]
    pub fn api_key_only(api_key: String) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key)),
            secret_key: None,
        }
    }

    /// Returns the API key, if set.
    #[must_use]
    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }

    /// Returns the secret key, if set.
    #[must_use]
    pub fn secret_key(&self) -> Option<&SecretString> {
        self.secret_key.as_ref()
    }

    /// Checks that every credential `level` needs is present.
    pub(crate) fn require(&self, level: SecurityLevel) -> Result<()> {
        match level {
            SecurityLevel::None => Ok(()),
            SecurityLevel::ApiKey if self.api_key.is_none() => Err(Error::configuration(
                "api key is required for api-key endpoints",
            )),
            SecurityLevel::ApiKey => Ok(()),
            SecurityLevel::Signed if self.api_key.is_none() => Err(Error::configuration(
                "api key is required for signed endpoints",
            )),
            SecurityLevel::Signed if self.secret_key.is_none() => Err(Error::configuration(
                "secret key is required for signed endpoints",
            )),
            SecurityLevel::Signed => Ok(()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Hex-encoded HMAC-SHA256 of `message` keyed by `secret`.
pub fn hmac(secret: &SecretString, message: &str) -> Result<String> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.expose_secret().as_bytes())?;
    mac.update(message.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}
