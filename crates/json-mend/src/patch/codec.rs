//! RFC 6902 wire codec.
//!
//! Converts between [`Op`] values and the JSON Patch document form: an
//! array of `{"op", "path", "value"?, "from"?}` objects with JSON-Pointer
//! paths.

use serde_json::{json, Value};

use json_mend_pointer::{format_pointer, parse_pointer, Path};

use crate::patch::types::{Op, PatchError};

fn decode_path(operation: &Value, member: &str) -> Result<Path, PatchError> {
    let pointer = operation
        .get(member)
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOp(format!("'{member}' must be a string")))?;
    if !pointer.is_empty() && !pointer.starts_with('/') {
        return Err(PatchError::InvalidOp(format!(
            "'{member}' must be a JSON Pointer: {pointer:?}"
        )));
    }
    Ok(parse_pointer(pointer))
}

fn decode_value(operation: &Value, verb: &str) -> Result<Value, PatchError> {
    operation
        .get("value")
        .cloned()
        .ok_or_else(|| PatchError::InvalidOp(format!("'{verb}' requires 'value'")))
}

/// Decode a single operation object.
pub fn decode_op(operation: &Value) -> Result<Op, PatchError> {
    let verb = operation
        .get("op")
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOp("missing 'op' member".into()))?;
    let path = decode_path(operation, "path")?;
    match verb {
        "add" => Ok(Op::Add { path, value: decode_value(operation, "add")? }),
        "remove" => Ok(Op::Remove { path }),
        "replace" => Ok(Op::Replace { path, value: decode_value(operation, "replace")? }),
        "move" => Ok(Op::Move { path, from: decode_path(operation, "from")? }),
        "copy" => Ok(Op::Copy { path, from: decode_path(operation, "from")? }),
        "test" => Ok(Op::Test { path, value: decode_value(operation, "test")? }),
        other => Err(PatchError::InvalidOp(format!("unknown op: {other}"))),
    }
}

/// Decode a JSON Patch document (an array of operation objects).
pub fn decode_patch(patch: &Value) -> Result<Vec<Op>, PatchError> {
    let operations = patch
        .as_array()
        .ok_or_else(|| PatchError::InvalidOp("patch must be an array".into()))?;
    operations.iter().map(decode_op).collect()
}

/// Encode a single operation into its wire form.
pub fn encode_op(op: &Op) -> Value {
    match op {
        Op::Add { path, value } => json!({
            "op": "add",
            "path": format_pointer(path),
            "value": value
        }),
        Op::Remove { path } => json!({
            "op": "remove",
            "path": format_pointer(path)
        }),
        Op::Replace { path, value } => json!({
            "op": "replace",
            "path": format_pointer(path),
            "value": value
        }),
        Op::Move { path, from } => json!({
            "op": "move",
            "path": format_pointer(path),
            "from": format_pointer(from)
        }),
        Op::Copy { path, from } => json!({
            "op": "copy",
            "path": format_pointer(path),
            "from": format_pointer(from)
        }),
        Op::Test { path, value } => json!({
            "op": "test",
            "path": format_pointer(path),
            "value": value
        }),
    }
}

/// Encode an operation sequence as a JSON Patch document.
pub fn encode_patch(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(encode_op).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_rfc6902_patch() {
        let patch = json!([
            {"op": "add", "path": "/foo", "value": 1},
            {"op": "remove", "path": "/bar"},
            {"op": "replace", "path": "/baz", "value": "new"},
            {"op": "move", "path": "/a", "from": "/b"},
            {"op": "copy", "path": "/c", "from": "/d"},
            {"op": "test", "path": "/e", "value": null},
        ]);
        let ops = decode_patch(&patch).unwrap();
        let verbs: Vec<_> = ops.iter().map(Op::verb).collect();
        assert_eq!(verbs, ["add", "remove", "replace", "move", "copy", "test"]);
    }

    #[test]
    fn decode_unescapes_pointer_tokens() {
        let patch = json!([{"op": "remove", "path": "/a~0b/c~1d"}]);
        let ops = decode_patch(&patch).unwrap();
        assert_eq!(ops[0].path(), &vec!["a~b".to_string(), "c/d".to_string()]);
    }

    #[test]
    fn encode_escapes_pointer_tokens() {
        let op = Op::Remove { path: vec!["a~b".to_string(), "c/d".to_string()] };
        assert_eq!(encode_op(&op)["path"], json!("/a~0b/c~1d"));
    }

    #[test]
    fn roundtrip_each_verb() {
        let ops = vec![
            Op::Add { path: vec!["a".into()], value: json!({"x": 1}) },
            Op::Remove { path: vec!["a".into()] },
            Op::Replace { path: vec![], value: json!([1, 2]) },
            Op::Move { path: vec!["a".into()], from: vec!["b".into()] },
            Op::Copy { path: vec!["a".into()], from: vec!["b".into()] },
            Op::Test { path: vec!["a".into()], value: json!(null) },
        ];
        let decoded = decode_patch(&encode_patch(&ops)).unwrap();
        assert_eq!(decoded, ops);
    }

    #[test]
    fn decode_rejects_malformed_operations() {
        assert!(decode_patch(&json!({"op": "add"})).is_err());
        assert!(decode_patch(&json!([{"path": "/a"}])).is_err());
        assert!(decode_patch(&json!([{"op": "add", "path": "/a"}])).is_err());
        assert!(decode_patch(&json!([{"op": "move", "path": "/a"}])).is_err());
        assert!(decode_patch(&json!([{"op": "frobnicate", "path": "/a"}])).is_err());
        assert!(decode_patch(&json!([{"op": "add", "path": 3, "value": 1}])).is_err());
        assert!(decode_patch(&json!([{"op": "remove", "path": "no-slash"}])).is_err());
    }
}
