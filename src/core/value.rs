//! Attribute payloads
//!
//! This module provides:
//! - `Value`: the tagged payload of one attribute
//! - `AnyValue`: type-erased access to a serde serializer for opaque payloads
//! - `LogValuer`: payloads computed only when a record is actually encoded

use super::attr::Attr;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Upper bound on chained `LogValuer` resolutions before giving up.
pub const MAX_RESOLVE_DEPTH: usize = 100;

/// Opaque payload rendered through `serde_json`.
///
/// Implemented for every `Serialize` type, so callers normally go through
/// [`Value::any`] instead of implementing it by hand.
pub trait AnyValue: fmt::Debug + Send + Sync {
    fn to_json(&self) -> serde_json::Result<String>;
}

impl<T> AnyValue for T
where
    T: Serialize + fmt::Debug + Send + Sync,
{
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// A payload that produces its real value on demand.
///
/// Resolution happens during encoding, after the level check, so expensive
/// values cost nothing for suppressed records.
pub trait LogValuer: fmt::Debug + Send + Sync {
    fn log_value(&self) -> Value;
}

/// Value type for one attribute
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Zero value. Paired with an empty key it means "no attribute".
    #[default]
    Empty,
    String(String),
    Int64(i64),
    Uint64(u64),
    Float64(f64),
    Bool(bool),
    /// Signed nanosecond count
    Duration(i64),
    Timestamp(DateTime<Utc>),
    Group(Vec<Attr>),
    Any(Arc<dyn AnyValue>),
    Lazy(Arc<dyn LogValuer>),
}

impl Value {
    /// Wrap any serializable value
    pub fn any<T>(value: T) -> Self
    where
        T: Serialize + fmt::Debug + Send + Sync + 'static,
    {
        Value::Any(Arc::new(value))
    }

    /// Wrap a lazily computed value
    pub fn lazy<T>(valuer: T) -> Self
    where
        T: LogValuer + 'static,
    {
        Value::Lazy(Arc::new(valuer))
    }

    /// Group of attributes
    pub fn group<I>(attrs: I) -> Self
    where
        I: IntoIterator<Item = Attr>,
    {
        Value::Group(attrs.into_iter().collect())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Short name of the payload kind
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Empty => "empty",
            Value::String(_) => "string",
            Value::Int64(_) => "int64",
            Value::Uint64(_) => "uint64",
            Value::Float64(_) => "float64",
            Value::Bool(_) => "bool",
            Value::Duration(_) => "duration",
            Value::Timestamp(_) => "timestamp",
            Value::Group(_) => "group",
            Value::Any(_) => "any",
            Value::Lazy(_) => "lazy",
        }
    }

    /// Follow `Lazy` payloads until a concrete value appears.
    ///
    /// Returns `None` when the chain is still lazy after
    /// [`MAX_RESOLVE_DEPTH`] steps.
    pub fn resolve(&self) -> Option<Cow<'_, Value>> {
        let Value::Lazy(valuer) = self else {
            return Some(Cow::Borrowed(self));
        };

        let mut current = valuer.log_value();
        for _ in 1..MAX_RESOLVE_DEPTH {
            match current {
                Value::Lazy(next) => current = next.log_value(),
                resolved => return Some(Cow::Owned(resolved)),
            }
        }

        match current {
            Value::Lazy(_) => None,
            resolved => Some(Cow::Owned(resolved)),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int64(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int64(i64::from(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint64(u)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::Uint64(u64::from(u))
    }
}

impl From<usize> for Value {
    fn from(u: usize) -> Self {
        Value::Uint64(u as u64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float64(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<std::time::Duration> for Value {
    fn from(d: std::time::Duration) -> Self {
        Value::Duration(i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Timestamp(t)
    }
}

impl From<Vec<Attr>> for Value {
    fn from(attrs: Vec<Attr>) -> Self {
        Value::Group(attrs)
    }
}
