//! Record encoders
//!
//! An [`Encoder`] turns records and attributes into bytes for one output format:
//! - [`JsonEncoder`]: one JSON-shaped object per line, groups as nested objects
//! - [`TextEncoder`]: colorized `key=value` lines, groups as dotted key prefixes
//!
//! Both share the substitution rules below: malformed content is replaced by a
//! sentinel token and the record is still emitted.

use crate::core::{AnyValue, Attr, Record};
use chrono::{DateTime, Utc};
use std::fmt::{self, Write};

pub mod json;
pub mod text;

pub use json::JsonEncoder;
pub use text::{ColorPalette, TextEncoder};

/// Substituted for an empty attribute key
pub const EMPTY_KEY: &str = "!EMPTY_KEY";
/// Substituted for an empty string value
pub const EMPTY_VALUE: &str = "!EMPTY_VALUE";
/// Substituted when an opaque value fails to serialize
pub const ERR_MARSHAL: &str = "!ERR_MARSHAL";
/// Substituted for a value kind the encoder cannot render
pub const UNHANDLED: &str = "!UNHANDLED";

/// `YYYY-MM-DD HH:MM:SS`
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// `HH:MM:SS`
pub const TIME_ONLY_FORMAT: &str = "%H:%M:%S";

/// Accumulated group context of a derived logger.
///
/// `text` is format specific (an open `"name":{` chain for JSON, a dotted
/// `name.` chain for text); `depth` counts the groups entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPrefix {
    text: String,
    depth: usize,
}

impl GroupPrefix {
    pub fn new() -> Self {
        Self::default()
    }

    /// A prefix one group deeper, with `segment` appended
    #[must_use]
    pub fn extended(&self, segment: &str) -> Self {
        let mut text = String::with_capacity(self.text.len() + segment.len());
        text.push_str(&self.text);
        text.push_str(segment);
        Self {
            text,
            depth: self.depth + 1,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }
}

/// Output format strategy used by [`Logger`](crate::Logger).
///
/// Implementations append to a caller supplied buffer and never fail; every
/// problem with the input is expressed through sentinel tokens.
pub trait Encoder: Send + Sync + fmt::Debug {
    /// Append one complete, newline-terminated record.
    ///
    /// `precomputed` is the fragment produced by earlier
    /// [`precompute_attrs`](Encoder::precompute_attrs) calls, `prefix` the
    /// group context from [`group_prefix`](Encoder::group_prefix).
    fn encode_record(&self, buf: &mut String, record: &Record, precomputed: &str, prefix: &GroupPrefix);

    /// Append one attribute, recursing into groups.
    ///
    /// Returns `false` when the attribute produced no output (zero attribute,
    /// group without content).
    fn encode_attr(&self, buf: &mut String, prefix: &str, attr: &Attr) -> bool;

    /// Extend the pre-bound fragment in `buf` with `attrs`.
    fn precompute_attrs(&self, buf: &mut String, prefix: &GroupPrefix, attrs: &[Attr]);

    /// The prefix after entering group `name` below `old`.
    fn group_prefix(&self, old: &GroupPrefix, name: &str) -> GroupPrefix;

    fn name(&self) -> &str;
}

pub(crate) fn append_float(buf: &mut String, value: f64) {
    if value.is_nan() {
        buf.push_str("NaN");
    } else if value.is_infinite() {
        buf.push_str(if value > 0.0 { "+Inf" } else { "-Inf" });
    } else {
        // Display for f64 is the shortest round-trip form and never uses an exponent
        let _ = write!(buf, "{}", value);
    }
}

pub(crate) fn append_timestamp(buf: &mut String, time: &DateTime<Utc>, format: &str) {
    let _ = write!(buf, "{}", time.format(format));
}

pub(crate) fn append_any(buf: &mut String, value: &dyn AnyValue) {
    match value.to_json() {
        Ok(json) => buf.push_str(&json),
        Err(_) => buf.push_str(ERR_MARSHAL),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_group_prefix_extended() {
        let root = GroupPrefix::new();
        assert!(root.is_empty());

        let one = root.extended("a.");
        let two = one.extended("b.");
        assert_eq!(two.as_str(), "a.b.");
        assert_eq!(two.depth(), 2);
        assert_eq!(one.as_str(), "a.");
    }

    #[test]
    fn test_append_float() {
        let cases = [
            (1.5, "1.5"),
            (100.0, "100"),
            (-0.25, "-0.25"),
            (1e21, "1000000000000000000000"),
            (1e-7, "0.0000001"),
            (f64::NAN, "NaN"),
            (f64::INFINITY, "+Inf"),
            (f64::NEG_INFINITY, "-Inf"),
        ];
        for (value, expected) in cases {
            let mut buf = String::new();
            append_float(&mut buf, value);
            assert_eq!(buf, expected, "formatting {}", value);
        }
    }

    #[test]
    fn test_append_timestamp() {
        let time = Utc
            .with_ymd_and_hms(2024, 3, 9, 17, 4, 5)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(250);

        let mut buf = String::new();
        append_timestamp(&mut buf, &time, DATE_TIME_FORMAT);
        assert_eq!(buf, "2024-03-09 17:04:05");

        buf.clear();
        append_timestamp(&mut buf, &time, TIME_ONLY_FORMAT);
        assert_eq!(buf, "17:04:05");
    }

    #[test]
    fn test_append_any_failure() {
        use std::collections::HashMap;

        // Maps with non-string keys cannot be JSON objects
        let mut map = HashMap::new();
        map.insert((1, 2), "x");

        let mut buf = String::new();
        append_any(&mut buf, &map);
        assert_eq!(buf, ERR_MARSHAL);

        buf.clear();
        append_any(&mut buf, &vec!["a", "b"]);
        assert_eq!(buf, r#"["a","b"]"#);
    }
}
