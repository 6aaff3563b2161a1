//! Property-based tests for the encoders and logger derivation
//!
//! These verify invariants that must hold for any input:
//! - Sentinel substitution for empty keys and empty string values
//! - Zero attributes and empty groups leave no trace in the output
//! - Pre-bound attributes encode exactly like dynamic ones
//! - Group prefixes compose into dotted text keys

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_structured_logger::encoders::{EMPTY_KEY, EMPTY_VALUE};
use rust_structured_logger::prelude::*;
use rust_structured_logger::GroupPrefix;

fn plain_text() -> TextEncoder {
    TextEncoder::new(ColorPalette::new(None, None, None))
}

fn encoders() -> Vec<Box<dyn Encoder>> {
    vec![Box::new(JsonEncoder::new()), Box::new(plain_text())]
}

fn record(attrs: Vec<Attr>) -> Record {
    let time = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid datetime");
    Record::new(LogLevel::INFO, "msg").with_time(time).with_attrs(attrs)
}

fn encode(encoder: &dyn Encoder, record: &Record, precomputed: &str, prefix: &GroupPrefix) -> String {
    let mut buf = String::new();
    encoder.encode_record(&mut buf, record, precomputed, prefix);
    buf
}

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-zA-Z0-9 ]{1,16}".prop_map(Value::String),
        any::<i64>().prop_map(Value::Int64),
        any::<u64>().prop_map(Value::Uint64),
        any::<bool>().prop_map(Value::Bool),
        (-1_000_000i64..1_000_000).prop_map(|ms| Value::Duration(ms * 1_000_000)),
        (-1e9f64..1e9).prop_map(Value::Float64),
    ]
}

fn attr_strategy() -> impl Strategy<Value = Attr> {
    let leaf = (key_strategy(), scalar_strategy()).prop_map(|(key, value)| Attr { key, value });
    leaf.prop_recursive(3, 16, 4, |inner| {
        (key_strategy(), prop::collection::vec(inner, 0..4))
            .prop_map(|(key, members)| Attr::group(key, members))
    })
}

fn zero_group_strategy() -> impl Strategy<Value = Attr> {
    let empty = Just(Attr::default());
    empty.prop_recursive(3, 8, 3, |inner| {
        prop_oneof![
            (key_strategy(), prop::collection::vec(inner.clone(), 0..3))
                .prop_map(|(key, members)| Attr::group(key, members)),
            prop::collection::vec(inner, 0..3).prop_map(|members| Attr::group("", members)),
        ]
    })
}

proptest! {
    #[test]
    fn prop_empty_string_value_is_sentinel(key in key_strategy()) {
        for encoder in encoders() {
            let mut buf = String::new();
            prop_assert!(encoder.encode_attr(&mut buf, "", &Attr::string(key.clone(), "")));
            prop_assert!(buf.contains(EMPTY_VALUE), "{}: {}", encoder.name(), buf);
        }
    }

    #[test]
    fn prop_empty_key_is_sentinel(value in scalar_strategy()) {
        for encoder in encoders() {
            let mut buf = String::new();
            prop_assert!(encoder.encode_attr(&mut buf, "", &Attr::new("", value.clone())));
            prop_assert!(buf.contains(EMPTY_KEY), "{}: {}", encoder.name(), buf);
        }
    }

    #[test]
    fn prop_zero_attrs_are_skipped(
        attrs in prop::collection::vec(attr_strategy(), 0..4),
        zero_at in 0usize..5,
    ) {
        let mut with_zero = attrs.clone();
        with_zero.insert(zero_at.min(attrs.len()), Attr::default());

        for encoder in encoders() {
            let prefix = GroupPrefix::new();
            prop_assert_eq!(
                encode(encoder.as_ref(), &record(with_zero.clone()), "", &prefix),
                encode(encoder.as_ref(), &record(attrs.clone()), "", &prefix)
            );
        }
    }

    #[test]
    fn prop_empty_groups_are_absent(
        attrs in prop::collection::vec(attr_strategy(), 0..3),
        group in zero_group_strategy(),
    ) {
        let mut with_group = attrs.clone();
        with_group.push(group);

        for encoder in encoders() {
            let prefix = GroupPrefix::new();
            prop_assert_eq!(
                encode(encoder.as_ref(), &record(with_group.clone()), "", &prefix),
                encode(encoder.as_ref(), &record(attrs.clone()), "", &prefix)
            );
        }
    }

    #[test]
    fn prop_prebinding_is_byte_equivalent(
        bound in prop::collection::vec(attr_strategy(), 0..4),
        groups in prop::collection::vec(key_strategy(), 0..3),
    ) {
        let encoder = JsonEncoder::new();
        let mut prefix = GroupPrefix::new();
        for name in &groups {
            prefix = encoder.group_prefix(&prefix, name);
        }

        let mut fragment = String::new();
        encoder.precompute_attrs(&mut fragment, &prefix, &bound);

        let prebound = encode(&encoder, &record(vec![]), &fragment, &prefix);
        let dynamic = encode(&encoder, &record(bound.clone()), "", &prefix);
        prop_assert_eq!(prebound, dynamic);
    }

    #[test]
    fn prop_json_lines_are_valid(attrs in prop::collection::vec(attr_strategy(), 0..6)) {
        let line = encode(&JsonEncoder::new(), &record(attrs), "", &GroupPrefix::new());
        prop_assert!(line.ends_with('\n'));
        prop_assert_eq!(line.matches('\n').count(), 1);
        let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_str(line.trim_end());
        prop_assert!(parsed.is_ok(), "invalid json: {}", line);
    }

    #[test]
    fn prop_group_prefixes_compose(
        g1 in key_strategy(),
        g2 in key_strategy(),
        k in key_strategy(),
    ) {
        let encoder = plain_text();
        let prefix = encoder.group_prefix(&encoder.group_prefix(&GroupPrefix::new(), &g1), &g2);
        prop_assert_eq!(prefix.depth(), 2);

        let mut fragment = String::new();
        encoder.precompute_attrs(&mut fragment, &prefix, &[Attr::string(k.clone(), "v")]);
        let expected = format!(" {}.{}.{}\x1b[0m=v\x1b[0m", g1, g2, k);
        prop_assert_eq!(fragment, expected);
    }
}
