//! Open-ended claim set
//!
//! Claims are an insertion-ordered map of JSON values with no fixed schema.
//! Callers project the fields they need through the fallible accessors.

use crate::codec::DecodeError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved expiration claim, milliseconds since the Unix epoch
pub const EXPIRATION_CLAIM: &str = "exp";

/// Token payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Empty claim set
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Insert a claim, returning the value it replaced
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style `insert`
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Remove a claim
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Raw claim value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Claim as a string, `None` if absent or not a string
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Claim as an integer, `None` if absent or not an integer
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    /// Claim as a boolean, `None` if absent or not a boolean
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Whether `key` is present
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// `exp` in milliseconds since epoch.
    ///
    /// Fractional values are floored; integers beyond `i64` saturate.
    ///
    /// # Errors
    /// `DecodeError::InvalidClaim` if `exp` is present but not a number.
    pub fn expiration_ms(&self) -> Result<Option<i64>, DecodeError> {
        let Some(exp) = self.0.get(EXPIRATION_CLAIM) else {
            return Ok(None);
        };
        if let Some(exp) = exp.as_i64() {
            return Ok(Some(exp));
        }
        if exp.as_u64().is_some() {
            return Ok(Some(i64::MAX));
        }
        match exp.as_f64() {
            // `as` saturates on overflow
            Some(exp) if exp.is_finite() => Ok(Some(exp.floor() as i64)),
            _ => Err(DecodeError::InvalidClaim(EXPIRATION_CLAIM.to_string())),
        }
    }

    /// Number of claims
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no claims
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Claims in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Borrow the underlying map
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Unwrap into the underlying map
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Claims {
    type Error = DecodeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(DecodeError::NotAnObject),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Claims {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
