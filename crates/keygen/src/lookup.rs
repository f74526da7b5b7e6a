//! Resolving field paths against raw JSON documents.
use crate::field_path::FieldPath;
use serde_json::Value;

/// The outcome of looking up a field path in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupValue {
    /// The path does not lead anywhere (missing key, non-object parent, bad JSON).
    Absent,
    Null,
    Array,
    Object,
    /// A string, number or boolean, already rendered as text.
    Scalar(String),
}

impl From<&Value> for LookupValue {
    /// Strings are taken without quotes, booleans render as `true`/`false` and numbers
    /// keep the exact text they were written with in the source document.
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => LookupValue::Null,
            Value::Array(_) => LookupValue::Array,
            Value::Object(_) => LookupValue::Object,
            Value::String(s) => LookupValue::Scalar(s.clone()),
            Value::Number(n) => LookupValue::Scalar(n.to_string()),
            Value::Bool(b) => LookupValue::Scalar(b.to_string()),
        }
    }
}

/// Resolves field paths inside a raw document. Implemented by [`JsonLookup`] and by
/// any `Fn(&[u8], &FieldPath) -> LookupValue`.
///
/// A pipeline decodes each document at most once, the first time one of its field
/// references needs it, and resolves every field reference against that result.
pub trait FieldLookup {
    type Decoded<'a>;

    fn decode<'a>(&self, document: &'a [u8]) -> Self::Decoded<'a>;

    fn lookup(&self, document: &Self::Decoded<'_>, path: &FieldPath) -> LookupValue;
}

impl<F> FieldLookup for F
where
    F: Fn(&[u8], &FieldPath) -> LookupValue,
{
    type Decoded<'a> = &'a [u8];

    fn decode<'a>(&self, document: &'a [u8]) -> &'a [u8] {
        document
    }

    fn lookup(&self, document: &&[u8], path: &FieldPath) -> LookupValue {
        self(*document, path)
    }
}

/// The default lookup, decoding documents with `serde_json`. A document that is not
/// valid JSON has no fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLookup;

impl FieldLookup for JsonLookup {
    type Decoded<'a> = Option<Value>;

    fn decode<'a>(&self, document: &'a [u8]) -> Option<Value> {
        serde_json::from_slice(document).ok()
    }

    fn lookup(&self, document: &Option<Value>, path: &FieldPath) -> LookupValue {
        match document {
            Some(root) => lookup_value(root, path),
            None => LookupValue::Absent,
        }
    }
}

/// Walks `path` through nested objects of an already decoded document.
pub fn lookup_value(root: &Value, path: &FieldPath) -> LookupValue {
    let mut current = root;
    for name in path.segments() {
        match current.as_object().and_then(|map| map.get(name)) {
            Some(next) => current = next,
            None => return LookupValue::Absent,
        }
    }
    LookupValue::from(current)
}
