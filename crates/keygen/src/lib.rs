//! Compiler and runtime for document key-generation expressions.
//!
//! A key expression mixes literal text, references to (possibly nested) fields of a
//! JSON document and built-in generators. With the default delimiters:
//!
//! | Expression               | Produces                                  |
//! |--------------------------|-------------------------------------------|
//! | `example`                | `example`                                 |
//! | `%key%`                  | the value of `key`                        |
//! | `%nested.key%`           | the value of `key` inside `nested`        |
//! | ``%nested.`with.dot`%``  | the value of `with.dot` inside `nested`   |
//! | `#MONO_INCR#`            | `1`, `2`, ...                             |
//! | `#MONO_INCR[100]#`       | `100`, `101`, ...                         |
//! | `#UUID#`                 | a random v4 UUID                          |
//! | `user::%id%::#MONO_INCR#`| `user::<id>::1`, `user::<id>::2`, ...     |
//!
//! Doubling a delimiter (`%%`, `##`) writes it literally.

pub mod error;
pub mod field_path;
pub mod generator;
pub mod lookup;
mod parser;
mod pipeline;
mod scan;

// --- Public API ---
pub use error::{FieldPathError, KeygenError};
pub use field_path::FieldPath;
pub use generator::GeneratorNode;
pub use lookup::{FieldLookup, JsonLookup, LookupValue, lookup_value};
pub use parser::{Delimiters, parse_expression, validate_delimiters};
pub use pipeline::{MAX_KEY_SIZE, Pipeline, compile};

#[cfg(test)]
mod tests {
    use super::*;

    const F_DEL: char = '%';
    const G_DEL: char = '#';

    fn test_value() -> Vec<u8> {
        format!(
            r##"{{"stringvalue": "value",
                "emptystring": "",
                "intvalue": 10,
                "boolvalue": true,
                "floatvalue": 3.1415,
                "nested1": {{"nested2": {{"nested3": "nestedvalue"}}}},
                "nested": {{"nested": "nestedvalue"}},
                "nestedempty": {{"nested": {{}}}},
                "field.with.dot.": 1,
                "backtick`": 2,
                "100%": 100,
                "#hello": "world",
                "`nestedbacktick": {{"a`b": 3}},
                ".nestedHidden": {{"nested2": {{"nested3": 4}}}},
                "array": ["one", "two", "three"],
                "`.key": "backtick1",
                "`.key.`": "backtick2",
                "nullvalue": null,
                "too_long": "{}"}}"##,
            " ".repeat(MAX_KEY_SIZE + 1)
        )
        .into_bytes()
    }

    fn pipeline(expression: &str) -> Pipeline {
        compile(expression, F_DEL, G_DEL).unwrap()
    }

    fn key(expression: &str) -> Vec<u8> {
        pipeline(expression).next(&test_value()).unwrap()
    }

    fn result_error(expression: &str) -> KeygenError {
        let err = pipeline(expression).next(&test_value()).unwrap_err();
        assert!(err.is_result_error(), "{:?} is not a result error", err);
        err
    }

    #[test]
    fn test_text_only() {
        let mut pipe = pipeline("textonly");
        for _ in 0..10 {
            assert_eq!(pipe.next(&test_value()).unwrap(), b"textonly");
        }
    }

    #[test]
    fn test_empty_expression() {
        let err = compile("", F_DEL, G_DEL).unwrap_err();
        assert_eq!(err, KeygenError::EmptyExpression);
        assert!(err.is_expression_error());
    }

    #[test]
    fn test_mono_incr_generator() {
        for (expression, offset) in [
            ("#MONO_INCR#", 1),
            ("#MONO_INCR[128]#", 128),
            ("#MONO_INCR[0]#", 1),
            ("#MONO_INCR[1]#", 1),
        ] {
            let mut pipe = pipeline(expression);
            for i in 0..10 {
                let key = pipe.next(&test_value()).unwrap();
                assert_eq!(key, (i + offset).to_string().into_bytes(), "{}", expression);
            }
        }
    }

    #[test]
    fn test_mono_incr_ignores_document() {
        let mut pipe = pipeline("#MONO_INCR#");
        assert_eq!(pipe.next(b"{}").unwrap(), b"1");
        assert_eq!(pipe.next(b"not even json").unwrap(), b"2");
        assert_eq!(pipe.next(&test_value()).unwrap(), b"3");
    }

    #[test]
    fn test_uuid_generator() {
        let mut pipe = pipeline("#UUID#");
        let mut keys: Vec<Vec<u8>> = Vec::new();
        for _ in 0..10 {
            let key = pipe.next(&test_value()).unwrap();
            assert_eq!(key.len(), 36);
            assert!(!keys.contains(&key));
            keys.push(key);
        }
    }

    #[test]
    fn test_generator_with_text() {
        let mut pipe = pipeline("before#MONO_INCR#");
        assert_eq!(pipe.next(&test_value()).unwrap(), b"before1");
        assert_eq!(pipe.next(&test_value()).unwrap(), b"before2");

        let mut pipe = pipeline("#MONO_INCR#after");
        assert_eq!(pipe.next(&test_value()).unwrap(), b"1after");
        assert_eq!(pipe.next(&test_value()).unwrap(), b"2after");

        let mut pipe = pipeline("before#MONO_INCR#after");
        assert_eq!(pipe.next(&test_value()).unwrap(), b"before1after");
        assert_eq!(pipe.next(&test_value()).unwrap(), b"before2after");
    }

    #[test]
    fn test_field_scalar_values() {
        for (field, value) in [
            ("stringvalue", "value"),
            ("intvalue", "10"),
            ("boolvalue", "true"),
            ("floatvalue", "3.1415"),
        ] {
            let mut pipe = pipeline(&format!("%{}%::#MONO_INCR#", field));
            for i in 1..=10 {
                let expected = format!("{}::{}", value, i);
                assert_eq!(pipe.next(&test_value()).unwrap(), expected.into_bytes());
            }
        }
    }

    #[test]
    fn test_nested_fields() {
        assert_eq!(key("%nested.nested%"), b"nestedvalue");
        assert_eq!(key("%nested1.nested2.nested3%"), b"nestedvalue");
        assert_eq!(key("%`.nestedHidden`.nested2.nested3%"), b"4");
        assert_eq!(key("%``nestedbacktick.a``b%"), b"3");
    }

    #[test]
    fn test_fields_with_special_characters() {
        assert_eq!(key("%`field.with.dot.`%"), b"1");
        assert_eq!(key("%backtick``%"), b"2");
        assert_eq!(key("%```.key`%"), b"backtick1");
        assert_eq!(key("%```.key.```%"), b"backtick2");
        assert_eq!(key("%#hello%"), b"world");
    }

    #[test]
    fn test_escaped_delimiters() {
        assert_eq!(key("##pound###MONO_INCR###sign##"), b"#pound#1#sign#");
        assert_eq!(key("##pound##%stringvalue%##"), b"#pound#value#");
        assert_eq!(key("%%percentage%%sign%%"), b"%percentage%sign%");
        assert_eq!(key("%%percentagesign%%%100%%%"), b"%percentagesign%100");
    }

    #[test]
    fn test_fixture_is_valid_json() {
        let value: serde_json::Value = serde_json::from_slice(&test_value()).unwrap();
        assert_eq!(value["#hello"], "world");
        assert_eq!(value["`.key.`"], "backtick2");
    }

    #[test]
    fn test_trailing_period_in_field() {
        assert_eq!(key("%stringvalue.%"), b"value");
        assert_eq!(key("%nested.nested.%"), b"nestedvalue");
    }

    #[test]
    fn test_invalid_field_paths() {
        for expression in ["%backtick`%", "%back`tick%", "%.field%", "%a..b%", "%field`te%"] {
            let err = compile(expression, F_DEL, G_DEL).unwrap_err();
            assert!(matches!(err, KeygenError::FieldPath(_)), "{}", expression);
        }
    }

    #[test]
    fn test_result_errors() {
        assert_eq!(
            result_error("%nullvalue%").to_string(),
            "key generation for document failed, resulting field is null"
        );
        assert_eq!(
            result_error("%emptystring%").to_string(),
            "key generation for document failed, generated key is an empty string"
        );
        assert_eq!(
            result_error("%too_long%").to_string(),
            "key generation for document failed, generated key is larger than 250 bytes"
        );
        assert_eq!(
            result_error("%array%").to_string(),
            "key generation for document failed, resulting field is a JSON array/object"
        );
        result_error("%nestedempty.nested%");
        result_error("%nested.nothere%");
    }

    #[test]
    fn test_empty_field_with_text_is_valid() {
        assert_eq!(key("key::%emptystring%"), b"key::");
    }

    #[test]
    fn test_missing_field_keeps_failing() {
        let mut pipe = pipeline("%non-existent%::#MONO_INCR#");
        for _ in 0..10 {
            let err = pipe.next(&test_value()).unwrap_err();
            assert_eq!(
                err,
                KeygenError::Result("resulting field does not exist".to_string())
            );
        }
    }

    #[test]
    fn test_key_size_boundary() {
        let at_limit = "k".repeat(MAX_KEY_SIZE);
        assert_eq!(key(&at_limit).len(), MAX_KEY_SIZE);

        let over_limit = "k".repeat(MAX_KEY_SIZE + 1);
        result_error(&over_limit);
    }

    #[test]
    fn test_custom_delimiters() {
        for (expression, expected) in [
            (";MONO_INCR;", "1"),
            ("?stringvalue?", "value"),
            ("?stringvalue?::;MONO_INCR;", "value::1"),
            ("a??b;;", "a?b;"),
            ("#MONO_INCR#", "#MONO_INCR#"),
        ] {
            let mut pipe = compile(expression, '?', ';').unwrap();
            assert_eq!(pipe.next(&test_value()).unwrap(), expected.as_bytes());
        }
    }

    #[test]
    fn test_invalid_delimiters_fail_before_scanning() {
        for (field, generator) in [
            ('\0', G_DEL),
            (F_DEL, '\0'),
            ('.', G_DEL),
            (F_DEL, '.'),
            ('`', G_DEL),
            (F_DEL, '`'),
            ('-', '-'),
        ] {
            let err = compile("", field, generator).unwrap_err();
            assert!(matches!(err, KeygenError::InvalidDelimiters(_)));
            assert!(validate_delimiters(field, generator).is_err());
        }
    }

    #[test]
    fn test_custom_lookup() {
        let lookup = |_: &[u8], path: &FieldPath| match path.segments() {
            [name] if name == "id" => LookupValue::Scalar("42".to_string()),
            _ => LookupValue::Absent,
        };
        let mut pipe = pipeline("doc::%id%").with_lookup(lookup);
        assert_eq!(pipe.next(b"").unwrap(), b"doc::42");
        assert_eq!(pipe.len(), 2);
    }
}
