//! JSON Merge Patch (RFC 7386) application.

use serde_json::{Map, Value};

/// Merge `patch` into `target` in place.
///
/// Object patches merge key-wise: a `null` member deletes the target key,
/// an object member recurses, anything else replaces the target key
/// wholesale. A non-object patch replaces the entire target. A single pass
/// over the patch; untouched target branches are never visited.
pub fn apply_merge_patch(target: &mut Value, patch: &Value) {
    let Value::Object(patch_members) = patch else {
        *target = patch.clone();
        return;
    };
    if !matches!(target, Value::Object(_)) {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(target_members) = target {
        for (key, patch_value) in patch_members {
            if patch_value.is_null() {
                target_members.shift_remove(key);
            } else if patch_value.is_object() {
                let slot = target_members
                    .entry(key.clone())
                    .or_insert(Value::Null);
                apply_merge_patch(slot, patch_value);
            } else {
                target_members.insert(key.clone(), patch_value.clone());
            }
        }
    }
}
