//! Human-readable colorized encoder
//!
//! ```text
//! 10:30:45 | INFO | request served status=200 req.path=/health latency=15ms
//! ```
//!
//! Groups do not nest; their names become dotted prefixes of the leaf keys.

use super::{
    append_any, append_float, append_timestamp, Encoder, GroupPrefix, DATE_TIME_FORMAT, EMPTY_KEY,
    EMPTY_VALUE, TIME_ONLY_FORMAT, UNHANDLED,
};
use crate::core::{Attr, LogLevel, Record, Value};
use colored::Color;
use std::borrow::Cow;
use std::fmt::Write;

const RESET: &str = "\x1b[0m";

/// Colors of the fixed parts of a text line. `None` writes no escape code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub time: Option<Color>,
    pub key: Option<Color>,
    pub value: Option<Color>,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            time: Some(Color::Blue),
            key: Some(Color::Magenta),
            value: None,
        }
    }
}

impl ColorPalette {
    pub fn new(time: Option<Color>, key: Option<Color>, value: Option<Color>) -> Self {
        Self { time, key, value }
    }
}

fn escape_code(color: Option<Color>) -> String {
    color
        .map(|c| format!("\x1b[{}m", c.to_fg_str()))
        .unwrap_or_default()
}

/// Escape codes resolved once at construction, so encoding only copies bytes.
#[derive(Debug, Clone)]
pub struct TextEncoder {
    palette: ColorPalette,
    time_color: String,
    key_color: String,
    value_color: String,
    level_colors: Vec<(LogLevel, String)>,
}

impl Default for TextEncoder {
    fn default() -> Self {
        Self::new(ColorPalette::default())
    }
}

impl TextEncoder {
    pub fn new(palette: ColorPalette) -> Self {
        let level_colors = [LogLevel::DEBUG, LogLevel::INFO, LogLevel::WARN, LogLevel::ERROR]
            .into_iter()
            .map(|level| (level, escape_code(level.color_code())))
            .collect();

        Self {
            palette,
            time_color: escape_code(palette.time),
            key_color: escape_code(palette.key),
            value_color: escape_code(palette.value),
            level_colors,
        }
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    fn level_color(&self, level: LogLevel) -> &str {
        self.level_colors
            .iter()
            .find(|(l, _)| *l == level)
            .map_or("", |(_, code)| code.as_str())
    }

    fn append_leaf(&self, buf: &mut String, prefix: &str, key: &str, value: Option<&Value>) {
        buf.push(' ');
        buf.push_str(&self.key_color);
        buf.push_str(prefix);
        buf.push_str(if key.is_empty() { EMPTY_KEY } else { key });
        buf.push_str(RESET);
        buf.push('=');

        buf.push_str(&self.value_color);
        match value {
            Some(value) => self.append_value(buf, value),
            None => buf.push_str(UNHANDLED),
        }
        buf.push_str(RESET);
    }

    fn append_value(&self, buf: &mut String, value: &Value) {
        match value {
            Value::Empty => buf.push_str("null"),
            Value::String(s) if s.is_empty() => buf.push_str(EMPTY_VALUE),
            Value::String(s) => buf.push_str(s),
            Value::Int64(i) => {
                let _ = write!(buf, "{}", i);
            }
            Value::Uint64(u) => {
                let _ = write!(buf, "{}", u);
            }
            Value::Float64(f) => append_float(buf, *f),
            Value::Bool(b) => buf.push_str(if *b { "true" } else { "false" }),
            Value::Duration(nanos) => {
                if *nanos < 0 {
                    buf.push('-');
                }
                let magnitude = std::time::Duration::from_nanos(nanos.unsigned_abs());
                let _ = write!(buf, "{}", humantime::format_duration(magnitude));
            }
            Value::Timestamp(time) => append_timestamp(buf, time, DATE_TIME_FORMAT),
            Value::Any(any) => append_any(buf, &**any),
            Value::Group(_) | Value::Lazy(_) => buf.push_str(UNHANDLED),
        }
    }
}

impl Encoder for TextEncoder {
    fn encode_record(&self, buf: &mut String, record: &Record, precomputed: &str, prefix: &GroupPrefix) {
        buf.push_str(&self.time_color);
        append_timestamp(buf, &record.time, TIME_ONLY_FORMAT);
        buf.push_str(RESET);
        buf.push_str(" | ");

        let level_color = self.level_color(record.level);
        buf.push_str(level_color);
        buf.push_str(record.level.short_str());
        buf.push_str(RESET);
        buf.push_str(" | ");

        buf.push_str(level_color);
        buf.push_str(&record.message);
        buf.push_str(RESET);

        // Already formatted with leading separators
        buf.push_str(precomputed);

        for attr in &record.attrs {
            self.encode_attr(buf, prefix.as_str(), attr);
        }

        buf.push('\n');
    }

    fn encode_attr(&self, buf: &mut String, prefix: &str, attr: &Attr) -> bool {
        if attr.is_empty() {
            return false;
        }

        let Some(value) = attr.value.resolve() else {
            self.append_leaf(buf, prefix, &attr.key, None);
            return true;
        };

        if attr.key.is_empty() && value.is_empty() {
            return false;
        }

        if let Value::Group(members) = value.as_ref() {
            let nested: Cow<'_, str> = if attr.key.is_empty() {
                Cow::Borrowed(prefix)
            } else {
                Cow::Owned(format!("{}{}.", prefix, attr.key))
            };

            let mut wrote = false;
            for member in members {
                wrote |= self.encode_attr(buf, &nested, member);
            }
            return wrote;
        }

        self.append_leaf(buf, prefix, &attr.key, Some(&value));
        true
    }

    fn precompute_attrs(&self, buf: &mut String, prefix: &GroupPrefix, attrs: &[Attr]) {
        for attr in attrs {
            self.encode_attr(buf, prefix.as_str(), attr);
        }
    }

    fn group_prefix(&self, old: &GroupPrefix, name: &str) -> GroupPrefix {
        old.extended(&format!("{}.", name))
    }

    fn name(&self) -> &str {
        "text"
    }
}
