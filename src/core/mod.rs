//! Core logger types and traits

pub mod attr;
pub mod config;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod record;
pub mod sink;
pub mod value;

pub use attr::Attr;
pub use config::{Config, DEFAULT_BUFFER_CAPACITY, DEFAULT_FLUSH_INTERVAL};
pub use error::{LoggerError, Result};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::SinkMetrics;
pub use output_format::OutputFormat;
pub use record::Record;
pub use sink::{Destination, Sink};
pub use value::{AnyValue, LogValuer, Value, MAX_RESOLVE_DEPTH};
