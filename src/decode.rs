//! Response decoding.
//!
//! Payloads are decoded structurally: unknown fields are ignored so new exchange fields do not
//! break older clients. With the `tracing` feature, unknown fields are logged as warnings and
//! decode failures are logged with the JSON path that failed.

use serde::de::DeserializeOwned;

use crate::Result;

/// Decodes a raw response body into `T`.
///
/// Failures are reported as [`crate::error::Kind::Decode`], distinct from transport and API
/// errors: the exchange accepted the request but the reply did not have the expected shape.
///
/// ```
/// use binance_client_sdk::decode;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// #[serde(rename_all = "camelCase")]
/// struct ServerTime {
///     server_time: i64,
/// }
///
/// let time: ServerTime = decode(br#"{"serverTime": 1499827319559, "extra": true}"#)?;
/// assert_eq!(time.server_time, 1_499_827_319_559);
/// # Ok::<(), binance_client_sdk::error::Error>(())
/// ```
#[cfg(not(feature = "tracing"))]
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(feature = "tracing")]
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    use std::any::type_name;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = &mut serde_json::Deserializer::from_slice(bytes);

    let result: T = serde_ignored::deserialize(deserializer, |path| {
        unknown_paths.push(path.to_string());
    })
    .inspect_err(|e| {
        // Re-run with serde_path_to_error to find where the shape diverged
        let deserializer = &mut serde_json::Deserializer::from_slice(bytes);
        let path = serde_path_to_error::deserialize::<_, T>(deserializer)
            .err()
            .map(|err| err.path().to_string())
            .unwrap_or_default();

        tracing::error!(
            type_name = %type_name::<T>(),
            path = %path,
            error = %e,
            "deserialization failed"
        );
    })?;

    for path in unknown_paths {
        tracing::warn!(
            type_name = %type_name::<T>(),
            field = %path,
            "unknown field in API response"
        );
    }

    Ok(result)
}
