/// Property-based tests for the JSON document builder.
///
/// Strategies generate keys, finite floats, integers, strings (including
/// escapes and unicode) and homogeneous arrays, then check that:
/// - a single field decodes back to exactly that field and value
/// - pretty and compact output decode to the same structure
/// - `len()` counts distinct keys
/// - `clear()` always returns the document to `{}`
use proptest::prelude::*;
use serde_json::{json, Value};
use subcalc_core::JsonDocument;

/// A field value as generated by the strategies, with its expected JSON.
#[derive(Debug, Clone)]
enum Field {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Ints(Vec<i64>),
    Strs(Vec<String>),
}

impl Field {
    fn set(&self, doc: &mut JsonDocument, key: &str) {
        match self.clone() {
            Field::Int(v) => doc.set(key, v),
            Field::Float(v) => doc.set(key, v),
            Field::Bool(v) => doc.set(key, v),
            Field::Str(v) => doc.set(key, v),
            Field::Ints(v) => doc.set(key, v),
            Field::Strs(v) => doc.set(key, v),
        }
    }

    fn expected(&self) -> Value {
        match self {
            Field::Int(v) => json!(v),
            Field::Float(v) => json!(v),
            Field::Bool(v) => json!(v),
            Field::Str(v) => json!(v),
            Field::Ints(v) => json!(v),
            Field::Strs(v) => json!(v),
        }
    }
}

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_ .:-]{0,15}").unwrap()
}

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,30}",
        Just(String::new()),
        Just("line1\nline2".to_string()),
        Just("say \"hi\"".to_string()),
        Just("path\\to\\file".to_string()),
        Just("caf\u{00e9}".to_string()),
        Just("\u{4f60}\u{597d}".to_string()),
        any::<String>(),
    ]
}

/// Floats with a few decimal places, so the decimal text parses back to the
/// exact same `f64`.
fn arb_float() -> impl Strategy<Value = f64> {
    (-1_000_000i64..1_000_000i64, 0i32..4).prop_map(|(m, e)| m as f64 / 10f64.powi(e))
}

fn arb_field() -> impl Strategy<Value = Field> {
    prop_oneof![
        any::<i64>().prop_map(Field::Int),
        arb_float().prop_map(Field::Float),
        any::<bool>().prop_map(Field::Bool),
        arb_string().prop_map(Field::Str),
        prop::collection::vec(any::<i64>(), 0..8).prop_map(Field::Ints),
        prop::collection::vec(arb_string(), 0..8).prop_map(Field::Strs),
    ]
}

fn arb_fields() -> impl Strategy<Value = Vec<(String, Field)>> {
    prop::collection::btree_map(arb_key(), arb_field(), 0..12)
        .prop_map(|m| m.into_iter().collect())
}

proptest! {
    #[test]
    fn single_field_roundtrips(key in arb_key(), field in arb_field()) {
        let mut doc = JsonDocument::new().unwrap();
        field.set(&mut doc, &key);

        let value: Value = serde_json::from_str(&doc.serialize(false)).unwrap();
        let object = value.as_object().unwrap();
        prop_assert_eq!(object.len(), 1);
        prop_assert_eq!(&object[&key], &field.expected());
    }

    #[test]
    fn pretty_and_compact_decode_identically(fields in arb_fields(), nested in arb_fields()) {
        let mut doc = JsonDocument::new().unwrap();
        for (key, field) in &fields {
            field.set(&mut doc, key);
        }
        let handle = doc.create_nested("__nested");
        for (key, field) in &nested {
            match field {
                Field::Int(v) => doc.set_nested(handle, key.as_str(), *v).unwrap(),
                Field::Float(v) => doc.set_nested(handle, key.as_str(), *v).unwrap(),
                Field::Bool(v) => doc.set_nested(handle, key.as_str(), *v).unwrap(),
                Field::Str(v) => doc.set_nested(handle, key.as_str(), v.as_str()).unwrap(),
                Field::Ints(_) | Field::Strs(_) => {}
            }
        }

        let compact: Value = serde_json::from_str(&doc.serialize(false)).unwrap();
        let pretty: Value = serde_json::from_str(&doc.serialize(true)).unwrap();
        prop_assert_eq!(compact, pretty);
    }

    #[test]
    fn len_counts_distinct_keys(fields in arb_fields()) {
        let mut doc = JsonDocument::new().unwrap();
        for (key, field) in &fields {
            field.set(&mut doc, key);
        }
        prop_assert_eq!(doc.len(), fields.len());
        prop_assert_eq!(doc.is_empty(), fields.is_empty());

        // Writing every key a second time does not grow the document.
        for (key, field) in &fields {
            field.set(&mut doc, key);
        }
        prop_assert_eq!(doc.len(), fields.len());
    }

    #[test]
    fn clear_always_resets(fields in arb_fields(), nested_keys in prop::collection::vec(arb_key(), 0..4)) {
        let mut doc = JsonDocument::new().unwrap();
        for (key, field) in &fields {
            field.set(&mut doc, key);
        }
        for key in &nested_keys {
            let handle = doc.create_nested(key.as_str());
            doc.set_nested(handle, "x", 1).unwrap();
        }
        doc.clear();

        prop_assert_eq!(doc.serialize(false), "{}");
        prop_assert!(doc.is_empty());
        prop_assert_eq!(doc.len(), 0);
    }
}
