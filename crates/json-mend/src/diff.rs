//! Patch generation: structural diff of two documents.
//!
//! Both generators share the invariant that applying the generated patch to
//! `source` produces a document Compare-Equal to `target`, and both lean on
//! [`compare`](crate::compare::compare) to skip every branch that is
//! already equal, so the work is bounded by document size.

use serde_json::{Map, Value};
use thiserror::Error;

use json_mend_pointer::Path;

use crate::compare::compare;
use crate::patch::types::Op;

// ── JSON Patch generation ─────────────────────────────────────────────────

/// Generate a JSON Patch operation sequence transforming `source` into
/// `target`.
///
/// Objects diff key-wise (removed keys first, then added/changed keys),
/// arrays positionally: the common prefix recurses element-wise, surplus
/// source elements are removed tail-first so indices stay valid under
/// sequential application, surplus target elements are appended. There is
/// no edit-distance pass — a reordered array yields a correct but
/// non-minimal replace-based patch.
pub fn create_json_patch(source: &Value, target: &Value) -> Vec<Op> {
    let mut ops = Vec::new();
    let mut path = Vec::new();
    diff_values(&mut ops, &mut path, source, target);
    ops
}

fn diff_values(ops: &mut Vec<Op>, path: &mut Path, source: &Value, target: &Value) {
    if compare(source, target).is_equal() {
        return;
    }
    match (source, target) {
        (Value::Object(source), Value::Object(target)) => diff_objects(ops, path, source, target),
        (Value::Array(source), Value::Array(target)) => diff_arrays(ops, path, source, target),
        _ => ops.push(Op::Replace { path: path.clone(), value: target.clone() }),
    }
}

fn diff_objects(
    ops: &mut Vec<Op>,
    path: &mut Path,
    source: &Map<String, Value>,
    target: &Map<String, Value>,
) {
    for key in source.keys() {
        if !target.contains_key(key) {
            path.push(key.clone());
            ops.push(Op::Remove { path: path.clone() });
            path.pop();
        }
    }
    for (key, target_value) in target {
        path.push(key.clone());
        match source.get(key) {
            None => ops.push(Op::Add { path: path.clone(), value: target_value.clone() }),
            Some(source_value) => diff_values(ops, path, source_value, target_value),
        }
        path.pop();
    }
}

fn diff_arrays(ops: &mut Vec<Op>, path: &mut Path, source: &[Value], target: &[Value]) {
    let common = source.len().min(target.len());
    for index in 0..common {
        path.push(index.to_string());
        diff_values(ops, path, &source[index], &target[index]);
        path.pop();
    }
    // Surplus source elements, removed tail-first so that the indices of
    // the remaining removals stay valid.
    for index in (common..source.len()).rev() {
        path.push(index.to_string());
        ops.push(Op::Remove { path: path.clone() });
        path.pop();
    }
    // Surplus target elements. Each add lands at index == length of the
    // array at that point in the sequence, i.e. appends.
    for (index, element) in target.iter().enumerate().skip(common) {
        path.push(index.to_string());
        ops.push(Op::Add { path: path.clone(), value: element.clone() });
        path.pop();
    }
}

// ── Merge patch generation ────────────────────────────────────────────────

/// A target value that RFC 7386 cannot express.
///
/// A merge patch member with value `null` means "delete this key", so a
/// patch can never *set* a key to null. Raised when generation would have
/// to emit an explicit null inside an object.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("explicit null cannot be represented in a merge patch")]
pub struct UnrepresentableNull {
    /// Pointer path of the offending value.
    pub path: Path,
}

/// Generate a JSON Merge Patch transforming `source` into `target`.
///
/// Keys present in both documents recurse when both values are objects and
/// are omitted entirely when Compare-Equal; keys only in `source` emit
/// `null` (deletion); everything else emits the target value wholesale.
/// Compare-Equal object documents yield the empty object (a no-op patch).
/// An equal non-object root emits the target itself instead: under
/// RFC 7386 an empty-object patch would *replace* a non-object target
/// with `{}`, so `{}` is only a no-op for object targets.
pub fn create_merge_patch(source: &Value, target: &Value) -> Result<Value, UnrepresentableNull> {
    let mut path = Vec::new();
    match (source, target) {
        (Value::Object(source), Value::Object(target)) => {
            diff_merge_objects(&mut path, source, target)
        }
        _ => {
            if compare(source, target).is_equal() {
                return Ok(target.clone());
            }
            // Whole-document replacement. A null *root* is expressible: a
            // non-object patch replaces the entire target.
            emit_replacement(&mut path, target)
        }
    }
}

fn diff_merge_objects(
    path: &mut Path,
    source: &Map<String, Value>,
    target: &Map<String, Value>,
) -> Result<Value, UnrepresentableNull> {
    let mut patch = Map::new();
    for key in source.keys() {
        if !target.contains_key(key) {
            patch.insert(key.clone(), Value::Null);
        }
    }
    for (key, target_value) in target {
        path.push(key.clone());
        match source.get(key) {
            Some(source_value) if compare(source_value, target_value).is_equal() => {}
            Some(Value::Object(source_members)) => {
                if let Value::Object(target_members) = target_value {
                    let sub_patch = diff_merge_objects(path, source_members, target_members)?;
                    if !matches!(&sub_patch, Value::Object(members) if members.is_empty()) {
                        patch.insert(key.clone(), sub_patch);
                    }
                } else {
                    patch.insert(key.clone(), emit_member(path, target_value)?);
                }
            }
            _ => {
                patch.insert(key.clone(), emit_member(path, target_value)?);
            }
        }
        path.pop();
    }
    Ok(Value::Object(patch))
}

/// Emit a target value wholesale as a patch member. Nulls are
/// unrepresentable here: the applier would delete the key instead.
fn emit_member(path: &mut Path, value: &Value) -> Result<Value, UnrepresentableNull> {
    ensure_expressible(path, value)?;
    Ok(value.clone())
}

/// Emit the target as a whole-document replacement (non-object root).
fn emit_replacement(path: &mut Path, value: &Value) -> Result<Value, UnrepresentableNull> {
    if let Value::Object(members) = value {
        for (key, member) in members {
            path.push(key.clone());
            ensure_expressible(path, member)?;
            path.pop();
        }
    }
    Ok(value.clone())
}

/// Nulls are fine inside arrays (arrays replace wholesale), but an object
/// member that is null — at any depth the applier recurses through — would
/// be read back as a deletion.
fn ensure_expressible(path: &mut Path, value: &Value) -> Result<(), UnrepresentableNull> {
    match value {
        Value::Null => Err(UnrepresentableNull { path: path.clone() }),
        Value::Object(members) => {
            for (key, member) in members {
                path.push(key.clone());
                ensure_expressible(path, member)?;
                path.pop();
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge_patch::apply_merge_patch;
    use crate::patch::apply::apply_ops;
    use serde_json::json;

    fn json_patch_roundtrip(source: Value, target: Value) {
        let ops = create_json_patch(&source, &target);
        let mut doc = source;
        apply_ops(&mut doc, &ops).unwrap();
        assert!(compare(&doc, &target).is_equal(), "{doc} != {target}");
    }

    fn merge_patch_roundtrip(source: Value, target: Value) -> Value {
        let patch = create_merge_patch(&source, &target).unwrap();
        let mut doc = source;
        apply_merge_patch(&mut doc, &patch);
        assert!(compare(&doc, &target).is_equal(), "{doc} != {target}");
        patch
    }

    #[test]
    fn equal_documents_yield_empty_patch() {
        assert!(create_json_patch(&json!({"a": 1}), &json!({"a": 1})).is_empty());
        assert_eq!(
            create_merge_patch(&json!({"a": 1}), &json!({"a": 1})).unwrap(),
            json!({})
        );
    }

    #[test]
    fn scalar_change_yields_single_replace() {
        let ops = create_json_patch(&json!({"a": 1}), &json!({"a": 2}));
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].verb(), "replace");
    }

    #[test]
    fn added_and_removed_keys() {
        let ops = create_json_patch(&json!({"a": 1, "b": 2}), &json!({"b": 2, "c": 3}));
        let verbs: Vec<_> = ops.iter().map(Op::verb).collect();
        assert_eq!(verbs, ["remove", "add"]);
    }

    #[test]
    fn nested_change_targets_leaf() {
        let ops = create_json_patch(
            &json!({"user": {"name": "alice", "age": 30}}),
            &json!({"user": {"name": "alice", "age": 31}}),
        );
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].path(), &vec!["user".to_string(), "age".to_string()]);
    }

    #[test]
    fn type_divergence_falls_back_to_replace() {
        let ops = create_json_patch(&json!({"a": [1]}), &json!({"a": {"b": 1}}));
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].verb(), "replace");
    }

    #[test]
    fn json_patch_roundtrips() {
        json_patch_roundtrip(json!({"a": 1}), json!({"b": [1, 2, {"c": null}]}));
        json_patch_roundtrip(json!([1, 2, 3]), json!([1, 9, 3, 4]));
        json_patch_roundtrip(json!([1, 2, 3, 4]), json!([4, 3]));
        json_patch_roundtrip(json!({"a": {"b": {"c": 1}}}), json!({"a": {"b": {"c": 2}}}));
        json_patch_roundtrip(json!(1), json!({"a": 1}));
        json_patch_roundtrip(json!([]), json!([1, 2]));
    }

    #[test]
    fn merge_patch_emits_null_for_removed_key() {
        let patch = merge_patch_roundtrip(json!({"x": 5, "y": 6}), json!({"y": 6}));
        assert_eq!(patch, json!({"x": null}));
    }

    #[test]
    fn merge_patch_omits_unchanged_keys() {
        let patch = merge_patch_roundtrip(
            json!({"a": {"b": 1, "c": 2}, "d": 4}),
            json!({"a": {"b": 9, "c": 2}, "d": 4}),
        );
        assert_eq!(patch, json!({"a": {"b": 9}}));
    }

    #[test]
    fn merge_patch_replaces_arrays_wholesale() {
        let patch = merge_patch_roundtrip(json!({"a": [1, 2]}), json!({"a": [1, 2, 3]}));
        assert_eq!(patch, json!({"a": [1, 2, 3]}));
    }

    #[test]
    fn merge_patch_empty_subpatch_is_omitted() {
        // The nested objects differ only in insertion order.
        let patch = merge_patch_roundtrip(
            json!({"a": {"x": 1, "y": 2}, "b": 1}),
            json!({"a": {"y": 2, "x": 1}, "b": 2}),
        );
        assert_eq!(patch, json!({"b": 2}));
    }

    #[test]
    fn equal_scalar_roots_yield_identity_replacement() {
        // `{}` would replace a scalar root with an empty object, so the
        // no-op patch for an equal non-object root is the value itself.
        let patch = merge_patch_roundtrip(json!(5), json!(5));
        assert_eq!(patch, json!(5));
    }

    #[test]
    fn merge_patch_root_replacement() {
        let patch = merge_patch_roundtrip(json!({"a": 1}), json!([1, 2]));
        assert_eq!(patch, json!([1, 2]));

        let patch = merge_patch_roundtrip(json!({"a": 1}), json!(null));
        assert_eq!(patch, json!(null));
    }

    #[test]
    fn merge_patch_rejects_null_member_target() {
        // Setting a key to explicit null cannot be expressed: null means
        // delete on the apply side.
        let err = create_merge_patch(&json!({"a": 1}), &json!({"a": null, "b": 2})).unwrap_err();
        assert_eq!(err.path, vec!["a".to_string()]);
    }

    #[test]
    fn merge_patch_rejects_nested_null_in_emitted_object() {
        let err = create_merge_patch(&json!({}), &json!({"a": {"b": null}})).unwrap_err();
        assert_eq!(err.path, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn merge_patch_allows_null_inside_arrays() {
        merge_patch_roundtrip(json!({"a": [1]}), json!({"a": [1, null]}));
    }
}
