//! Logging macros for ergonomic log message formatting.
//!
//! The message accepts `format!` arguments. Attributes follow a `;` as
//! `key => value` pairs, where the value is anything convertible into
//! [`Value`](crate::Value). Nothing is formatted when the level is disabled.
//!
//! # Examples
//!
//! ```
//! use rust_structured_logger::prelude::*;
//! use rust_structured_logger::{info, warn};
//!
//! let logger = Logger::text(std::io::sink(), None).unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With attributes
//! warn!(logger, "Slow request"; "path" => "/api/users", "latency_ms" => 850u64);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::json(std::io::sink(), None).unwrap();
/// use rust_structured_logger::log;
/// log!(logger, LogLevel::INFO, "Simple message");
/// log!(logger, LogLevel::ERROR, "Error code: {}", 500);
/// log!(logger, LogLevel::WARN, "Retrying"; "attempt" => 3, "backoff" => std::time::Duration::from_secs(2));
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log_attrs(level, $msg, $crate::attrs![$($key => $value),+]);
        }
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log(level, format!($($arg)+));
        }
    }};
}

/// Build a `Vec<Attr>` from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use rust_structured_logger::attrs;
///
/// let attrs = attrs!["user_id" => "u-42", "amount" => 500];
/// assert_eq!(attrs.len(), 2);
/// assert_eq!(attrs[0].key, "user_id");
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        ::std::vec::Vec::<$crate::Attr>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        vec![$($crate::Attr::new($key, $value)),+]
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::builder().min_level(LogLevel::DEBUG).writer(std::io::sink()).build().unwrap();
/// use rust_structured_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::DEBUG, $msg; $($key => $value),+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::json(std::io::sink(), None).unwrap();
/// use rust_structured_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::INFO, $msg; $($key => $value),+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::INFO, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::json(std::io::sink(), None).unwrap();
/// use rust_structured_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::WARN, $msg; $($key => $value),+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::WARN, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::json(std::io::sink(), None).unwrap();
/// use rust_structured_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Query failed"; "code" => 500, "table" => "users");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::ERROR, $msg; $($key => $value),+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::ERROR, $($arg)+)
    };
}
