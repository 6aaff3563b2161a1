//! # Rust Structured Logger
//!
//! A small structured logging library: records carry a severity level, a
//! message, and typed key/value attributes, and are written as either
//! JSON-shaped lines or colorized human-readable text.
//!
//! ## Features
//!
//! - **Two Formats**: JSON objects with nested groups, or `key=value` text with dotted group prefixes
//! - **Cheap Derivation**: `with_attrs` and `with_group` pre-encode bound context once
//! - **Thread Safe**: Loggers are immutable values sharing one mutex-guarded sink
//! - **Buffered Output**: Optional write buffer with a background flusher
//! - **Never Fails**: Malformed input is replaced by sentinel tokens, the record is still written
//!
//! ## Example
//!
//! ```
//! use rust_structured_logger::prelude::*;
//! use std::time::Duration;
//!
//! let logger = Logger::json(std::io::stdout(), None).unwrap();
//! let payments = logger.with_group("payment").with_attrs(&[Attr::string("user_id", "u-42")]);
//!
//! payments.log_attrs(
//!     LogLevel::INFO,
//!     "charged",
//!     vec![Attr::int("amount", 500), Attr::duration("latency", Duration::from_millis(15))],
//! );
//! ```

pub mod core;
pub mod encoders;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        AnyValue, Attr, Config, LogLevel, LogValuer, Logger, LoggerBuilder, LoggerError,
        OutputFormat, Record, Result, Sink, SinkMetrics, Value,
    };
    pub use crate::encoders::{ColorPalette, Encoder, JsonEncoder, TextEncoder};
}

pub use self::core::{
    AnyValue, Attr, Config, Destination, LogLevel, LogValuer, Logger, LoggerBuilder, LoggerError,
    OutputFormat, Record, Result, Sink, SinkMetrics, Value, DEFAULT_BUFFER_CAPACITY,
    DEFAULT_FLUSH_INTERVAL, MAX_RESOLVE_DEPTH,
};
pub use encoders::{ColorPalette, Encoder, GroupPrefix, JsonEncoder, TextEncoder};
