//! Re-exported types from external crates for convenience.
//!
//! These types are commonly used in this SDK and are re-exported here
//! so users don't need to add these dependencies to their `Cargo.toml`.

/// Date and time types for converting millisecond [`crate::Timestamp`]s.
pub use chrono::{DateTime, Utc};
/// Arbitrary precision decimal type for prices, quantities, and amounts.
pub use rust_decimal::Decimal;
/// Macro for creating [`Decimal`] literals at compile time.
///
/// # Example
/// ```
/// use binance_client_sdk::types::dec;
/// let amount = dec!(1.000);
/// assert_eq!(amount.to_string(), "1.000");
/// ```
pub use rust_decimal_macros::dec;

/// Converts a millisecond [`crate::Timestamp`] to a [`DateTime`], if it is in range.
#[must_use]
pub fn to_datetime(timestamp: crate::Timestamp) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(timestamp)
}
