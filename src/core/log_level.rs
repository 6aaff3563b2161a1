//! Log level definitions
//!
//! Levels are plain integers so that callers may use values between the named
//! levels. The named levels leave gaps of four to make room for them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogLevel(pub i32);

impl LogLevel {
    pub const DEBUG: LogLevel = LogLevel(-4);
    pub const INFO: LogLevel = LogLevel(0);
    pub const WARN: LogLevel = LogLevel(4);
    pub const ERROR: LogLevel = LogLevel(8);

    /// Full label. Levels without a name are reported as `INFO`.
    pub fn to_str(&self) -> &'static str {
        match *self {
            LogLevel::DEBUG => "DEBUG",
            LogLevel::INFO => "INFO",
            LogLevel::WARN => "WARN",
            LogLevel::ERROR => "ERROR",
            _ => "INFO",
        }
    }

    /// Four character label used by the text format.
    pub fn short_str(&self) -> &'static str {
        &self.to_str()[..4]
    }

    /// Severity color, `None` for levels without a name.
    pub fn color_code(&self) -> Option<colored::Color> {
        use colored::Color::*;
        match *self {
            LogLevel::DEBUG => Some(Blue),
            LogLevel::INFO => Some(Green),
            LogLevel::WARN => Some(Yellow),
            LogLevel::ERROR => Some(Red),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl From<i32> for LogLevel {
    fn from(level: i32) -> Self {
        LogLevel(level)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::DEBUG),
            "INFO" => Ok(LogLevel::INFO),
            "WARN" | "WARNING" => Ok(LogLevel::WARN),
            "ERROR" => Ok(LogLevel::ERROR),
            other => other
                .parse::<i32>()
                .map(LogLevel)
                .map_err(|_| format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(LogLevel::DEBUG.to_str(), "DEBUG");
        assert_eq!(LogLevel::ERROR.short_str(), "ERRO");
        assert_eq!(LogLevel::DEBUG.short_str(), "DEBU");
        assert_eq!(LogLevel::WARN.short_str(), "WARN");
        assert_eq!(LogLevel(3).to_str(), "INFO");
    }

    #[test]
    fn test_colors() {
        assert_eq!(LogLevel::INFO.color_code(), Some(colored::Color::Green));
        assert_eq!(LogLevel::ERROR.color_code(), Some(colored::Color::Red));
        assert_eq!(LogLevel(-8).color_code(), None);
    }

    #[test]
    fn test_ordering() {
        assert!(LogLevel::DEBUG < LogLevel::INFO);
        assert!(LogLevel::WARN < LogLevel::ERROR);
        assert!(LogLevel(2) > LogLevel::INFO);
        assert_eq!(LogLevel::default(), LogLevel::INFO);
    }

    #[test]
    fn test_parse() {
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::WARN));
        assert_eq!("Debug".parse::<LogLevel>(), Ok(LogLevel::DEBUG));
        assert_eq!("-2".parse::<LogLevel>(), Ok(LogLevel(-2)));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_serde_is_integer() {
        let json = serde_json::to_string(&LogLevel::WARN).expect("serialize");
        assert_eq!(json, "4");
        let level: LogLevel = serde_json::from_str("-4").expect("deserialize");
        assert_eq!(level, LogLevel::DEBUG);
    }
}
