//! Machine-readable encoder
//!
//! One JSON-shaped object per line:
//!
//! ```text
//! {"time":"2024-01-01 00:00:00","level":"INFO","msg":"msg","amount":500,"retry":false}
//! ```
//!
//! Named groups become nested objects, anonymous groups splice their members
//! into the enclosing object. Strings are written verbatim unless escaping is
//! enabled with [`JsonEncoder::with_escaping`]; without it, values containing
//! quotes or control characters produce lines that are not valid JSON.

use super::{
    append_any, append_float, append_timestamp, Encoder, GroupPrefix, DATE_TIME_FORMAT, EMPTY_KEY,
    EMPTY_VALUE, UNHANDLED,
};
use crate::core::{Attr, Record, Value};
use std::fmt::Write;

#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    escape: bool,
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escape quotes, backslashes and control characters in keys, messages
    /// and string values.
    #[must_use]
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    pub fn escapes(&self) -> bool {
        self.escape
    }

    /// Append `s` surrounded by quotes
    fn append_quoted(&self, buf: &mut String, s: &str) {
        if self.escape {
            if let Ok(quoted) = serde_json::to_string(s) {
                buf.push_str(&quoted);
                return;
            }
        }
        buf.push('"');
        buf.push_str(s);
        buf.push('"');
    }

    fn append_key(&self, buf: &mut String, key: &str) {
        if key.is_empty() {
            self.append_quoted(buf, EMPTY_KEY);
        } else {
            self.append_quoted(buf, key);
        }
        buf.push(':');
    }

    /// Named groups open a nested object; anonymous ones splice their members.
    fn append_group(&self, buf: &mut String, key: &str, members: &[Attr]) -> bool {
        let mark = buf.len();
        if !key.is_empty() {
            self.append_key(buf, key);
            buf.push('{');
        }

        let mut wrote = false;
        for member in members {
            let member_mark = buf.len();
            if wrote {
                buf.push(',');
            }
            if self.encode_attr(buf, "", member) {
                wrote = true;
            } else {
                buf.truncate(member_mark);
            }
        }

        if !wrote {
            buf.truncate(mark);
            return false;
        }
        if !key.is_empty() {
            buf.push('}');
        }
        true
    }

    fn append_value(&self, buf: &mut String, value: &Value) {
        match value {
            Value::Empty => buf.push_str("null"),
            Value::String(s) if s.is_empty() => self.append_quoted(buf, EMPTY_VALUE),
            Value::String(s) => self.append_quoted(buf, s),
            Value::Int64(i) => {
                let _ = write!(buf, "{}", i);
            }
            Value::Uint64(u) => {
                let _ = write!(buf, "{}", u);
            }
            Value::Float64(f) => append_float(buf, *f),
            Value::Bool(b) => buf.push_str(if *b { "true" } else { "false" }),
            Value::Duration(nanos) => {
                let _ = write!(buf, "{}", nanos);
            }
            Value::Timestamp(time) => {
                buf.push('"');
                append_timestamp(buf, time, DATE_TIME_FORMAT);
                buf.push('"');
            }
            Value::Any(any) => append_any(buf, &**any),
            Value::Group(_) | Value::Lazy(_) => buf.push_str(UNHANDLED),
        }
    }
}

impl Encoder for JsonEncoder {
    fn encode_record(&self, buf: &mut String, record: &Record, precomputed: &str, prefix: &GroupPrefix) {
        buf.push_str(r#"{"time":""#);
        append_timestamp(buf, &record.time, DATE_TIME_FORMAT);
        buf.push_str(r#"","level":""#);
        buf.push_str(record.level.to_str());
        buf.push_str(r#"","msg":"#);
        self.append_quoted(buf, &record.message);

        let section = buf.len();
        buf.push(',');
        buf.push_str(prefix.as_str());
        buf.push_str(precomputed);

        let mut wrote = !precomputed.is_empty();
        for attr in &record.attrs {
            let attr_mark = buf.len();
            if wrote {
                buf.push(',');
            }
            if self.encode_attr(buf, "", attr) {
                wrote = true;
            } else {
                buf.truncate(attr_mark);
            }
        }

        if wrote {
            for _ in 0..prefix.depth() {
                buf.push('}');
            }
        } else {
            buf.truncate(section);
        }

        buf.push_str("}\n");
    }

    fn encode_attr(&self, buf: &mut String, _prefix: &str, attr: &Attr) -> bool {
        if attr.is_empty() {
            return false;
        }

        let Some(value) = attr.value.resolve() else {
            self.append_key(buf, &attr.key);
            buf.push_str(UNHANDLED);
            return true;
        };

        if attr.key.is_empty() && value.is_empty() {
            return false;
        }

        if let Value::Group(members) = value.as_ref() {
            return self.append_group(buf, &attr.key, members);
        }

        self.append_key(buf, &attr.key);
        self.append_value(buf, &value);
        true
    }

    fn precompute_attrs(&self, buf: &mut String, _prefix: &GroupPrefix, attrs: &[Attr]) {
        for attr in attrs {
            let mark = buf.len();
            if !buf.is_empty() {
                buf.push(',');
            }
            if !self.encode_attr(buf, "", attr) {
                buf.truncate(mark);
            }
        }
    }

    fn group_prefix(&self, old: &GroupPrefix, name: &str) -> GroupPrefix {
        let mut segment = String::with_capacity(name.len() + 4);
        self.append_quoted(&mut segment, name);
        segment.push_str(":{");
        old.extended(&segment)
    }

    fn name(&self) -> &str {
        "json"
    }
}
