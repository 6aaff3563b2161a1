//! Output format selection
//!
//! - Text: colorized, human-readable lines (default)
//! - Json: one JSON-shaped object per line

use super::config::Config;
use crate::encoders::{ColorPalette, Encoder, JsonEncoder, TextEncoder};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Output format for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `10:30:45 | INFO | Request processed status=200`
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"time":"2025-01-08 10:30:45","level":"INFO","msg":"Request processed","status":200}`
    Json,
}

impl OutputFormat {
    /// Build the encoder for this format
    pub fn encoder(&self, config: &Config, palette: ColorPalette) -> Arc<dyn Encoder> {
        match self {
            OutputFormat::Text => Arc::new(TextEncoder::new(palette)),
            OutputFormat::Json => Arc::new(JsonEncoder::new().with_escaping(config.escape_json)),
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: '{}'", s)),
        }
    }
}
