//! Ordered parameter bag shared by query strings and form bodies.
//!
//! Serialization order is insertion order, and the same [`Params::encode`] output is used both
//! as signing input and as the transmitted bytes, so a signature always covers exactly what is
//! sent.

use std::fmt;

use rust_decimal::Decimal;
use serde::ser::SerializeMap as _;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::Result;
use crate::error::Error;

/// A scalar parameter value.
///
/// Quantities should be passed as [`Decimal`] or as a caller-formatted string; there is no
/// floating point variant, so `"1.000"` is transmitted as `1.000`.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    String(String),
    Int(i64),
    UInt(u64),
    Bool(bool),
    Decimal(Decimal),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Decimal(d) => write!(f, "{d}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

/// Key → value bag with unique keys. Setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, overwriting any previous value.
    pub fn set<K: Into<String>, V: Into<ParamValue>>(&mut self, key: K, value: V) -> &mut Self {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }

        self
    }

    /// Chainable form of [`Self::set`].
    #[must_use]
    pub fn with<K: Into<String>, V: Into<ParamValue>>(mut self, key: K, value: V) -> Self {
        self.set(key, value);
        self
    }

    /// Unions `other` into `self`; `other` wins on conflicting keys.
    pub fn merge(&mut self, other: Params) -> &mut Self {
        for (key, value) in other.entries {
            self.set(key, value);
        }

        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// URL-encodes the bag as `k1=v1&k2=v2` in insertion order.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_html_form::to_string(self)?)
    }

    /// Builds a bag from a serializable request record.
    ///
    /// Field order is kept, `null` fields are skipped, unit records yield an empty bag, and
    /// values must be scalars. Floats are rejected so that quantities are only ever passed as
    /// exact decimals or strings.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let map = match serde_json::to_value(value).map_err(|e| {
            Error::validation(format!("unable to convert request to parameters: {e}"))
        })? {
            Value::Object(map) => map,
            // Unit records carry no parameters
            Value::Null => return Ok(Params::new()),
            _ => {
                return Err(Error::validation(
                    "request parameters must serialize to a map",
                ));
            }
        };

        let mut params = Params::new();
        for (key, value) in map {
            let value = match value {
                Value::Null => continue,
                Value::Bool(b) => ParamValue::Bool(b),
                Value::String(s) => ParamValue::String(s),
                Value::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        ParamValue::Int(i)
                    } else if let Some(u) = n.as_u64() {
                        ParamValue::UInt(u)
                    } else {
                        return Err(Error::validation(format!(
                            "parameter `{key}` is a floating point number, use a decimal instead"
                        )));
                    }
                }
                Value::Array(_) | Value::Object(_) => {
                    return Err(Error::validation(format!(
                        "parameter `{key}` is not a scalar value"
                    )));
                }
            };
            params.set(key, value);
        }

        Ok(params)
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, &value.to_string())?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}
