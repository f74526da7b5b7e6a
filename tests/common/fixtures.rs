use serde_json::{Value, json};

/// A user document with nested and dotted fields
pub fn user(id: &str) -> Value {
    json!({
        "id": id,
        "name": {"first": "Ada", "last": "Lovelace"},
        "meta.data": {"internal": true, "source": "import"},
        "score": 42
    })
}

/// Serialize `value` the way documents arrive from an import source
pub fn bytes(value: &Value) -> Vec<u8> {
    serde_json::to_vec(value).expect("fixture serializes")
}

/// A batch mixing good documents with ones that cannot be keyed
pub fn mixed_batch() -> Vec<Vec<u8>> {
    vec![
        bytes(&user("u1")),
        bytes(&json!({"name": "no id"})),
        bytes(&user("u2")),
        bytes(&json!({"id": null})),
        b"not json at all".to_vec(),
        bytes(&user("u3")),
    ]
}
