//! Log record structure

use super::attr::Attr;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};

/// One logging event. Built per call and only read by encoders.
#[derive(Debug, Clone)]
pub struct Record {
    pub time: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub attrs: Vec<Attr>,
}

impl Record {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            time: Utc::now(),
            level,
            message: message.into(),
            attrs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    #[must_use]
    pub fn with_attr(mut self, attr: Attr) -> Self {
        self.attrs.push(attr);
        self
    }

    #[must_use]
    pub fn with_attrs<I>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = Attr>,
    {
        self.attrs.extend(attrs);
        self
    }

    #[inline]
    pub fn num_attrs(&self) -> usize {
        self.attrs.len()
    }
}
