//! Key/value attributes attached to records or bound to loggers

use super::value::Value;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// One key/value pair.
///
/// `Attr::default()` (empty key, empty value) stands for "no attribute" and is
/// skipped by every encoder.
#[derive(Debug, Clone, Default)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, Value::Int64(value))
    }

    pub fn uint(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, Value::Uint64(value))
    }

    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, Value::Float64(value))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, Value::Bool(value))
    }

    pub fn duration(key: impl Into<String>, value: std::time::Duration) -> Self {
        Self::new(key, value)
    }

    pub fn time(key: impl Into<String>, value: DateTime<Utc>) -> Self {
        Self::new(key, Value::Timestamp(value))
    }

    /// Named group. An empty key makes the group anonymous: its members are
    /// spliced into the parent.
    pub fn group<I>(key: impl Into<String>, attrs: I) -> Self
    where
        I: IntoIterator<Item = Attr>,
    {
        Self::new(key, Value::group(attrs))
    }

    pub fn any<T>(key: impl Into<String>, value: T) -> Self
    where
        T: Serialize + fmt::Debug + Send + Sync + 'static,
    {
        Self::new(key, Value::any(value))
    }

    /// True for the zero attribute
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }
}

impl<K, V> From<(K, V)> for Attr
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from((key, value): (K, V)) -> Self {
        Attr::new(key, value)
    }
}
