//! Sequential application of JSON Patch operations.

use serde_json::Value;

use json_mend_pointer::{self as pointer, PathToken};

use crate::compare::compare;
use crate::patch::types::{Op, PatchError};

// ── Path navigation ───────────────────────────────────────────────────────

/// Split a non-root path into its parent path and final token.
fn split_last(path: &[PathToken]) -> (&[PathToken], &PathToken) {
    let (parent, last) = path.split_at(path.len() - 1);
    (parent, &last[0])
}

fn parent_mut<'a>(
    doc: &'a mut Value,
    parent_path: &[PathToken],
) -> Result<&'a mut Value, PatchError> {
    pointer::get_mut(doc, parent_path).ok_or(PatchError::NotFound)
}

fn parse_index(token: &str) -> Result<usize, PatchError> {
    if !pointer::is_valid_index(token) {
        return Err(PatchError::InvalidIndex);
    }
    token.parse().map_err(|_| PatchError::InvalidIndex)
}

// ── Individual operation applicators ─────────────────────────────────────

fn apply_add(doc: &mut Value, path: &[PathToken], value: Value) -> Result<(), PatchError> {
    if path.is_empty() {
        *doc = value;
        return Ok(());
    }
    let (parent_path, token) = split_last(path);
    let parent = parent_mut(doc, parent_path)?;
    match parent {
        Value::Object(members) => {
            members.insert(token.clone(), value);
            Ok(())
        }
        Value::Array(elements) => {
            if token == "-" {
                elements.push(value);
                return Ok(());
            }
            let index = parse_index(token)?;
            if index > elements.len() {
                return Err(PatchError::InvalidIndex);
            }
            elements.insert(index, value);
            Ok(())
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

fn apply_remove(doc: &mut Value, path: &[PathToken]) -> Result<Value, PatchError> {
    if path.is_empty() {
        return Err(PatchError::InvalidTarget);
    }
    let (parent_path, token) = split_last(path);
    let parent = parent_mut(doc, parent_path)?;
    match parent {
        Value::Object(members) => members.shift_remove(token).ok_or(PatchError::NotFound),
        Value::Array(elements) => {
            let index = parse_index(token)?;
            if index >= elements.len() {
                return Err(PatchError::NotFound);
            }
            Ok(elements.remove(index))
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

fn apply_replace(doc: &mut Value, path: &[PathToken], value: Value) -> Result<(), PatchError> {
    // Unlike add, the target location must already exist.
    let slot = pointer::get_mut(doc, path).ok_or(PatchError::NotFound)?;
    *slot = value;
    Ok(())
}

fn apply_move(doc: &mut Value, path: &[PathToken], from: &[PathToken]) -> Result<(), PatchError> {
    // A location cannot be moved into one of its own descendants.
    if from.len() < path.len() && pointer::starts_with(path, from) {
        return Err(PatchError::MoveIntoSelf);
    }
    let value = apply_remove(doc, from)?;
    apply_add(doc, path, value)
}

fn apply_copy(doc: &mut Value, path: &[PathToken], from: &[PathToken]) -> Result<(), PatchError> {
    let value = pointer::get(doc, from).ok_or(PatchError::NotFound)?.clone();
    apply_add(doc, path, value)
}

fn apply_test(doc: &Value, path: &[PathToken], expected: &Value) -> Result<(), PatchError> {
    let actual = pointer::get(doc, path).ok_or(PatchError::NotFound)?;
    if compare(actual, expected).is_equal() {
        Ok(())
    } else {
        Err(PatchError::TestFailed)
    }
}

// ── Sequential application ────────────────────────────────────────────────

/// Apply a single operation to the document in place.
pub fn apply_op(doc: &mut Value, op: &Op) -> Result<(), PatchError> {
    match op {
        Op::Add { path, value } => apply_add(doc, path, value.clone()),
        Op::Remove { path } => apply_remove(doc, path).map(|_| ()),
        Op::Replace { path, value } => apply_replace(doc, path, value.clone()),
        Op::Move { path, from } => apply_move(doc, path, from),
        Op::Copy { path, from } => apply_copy(doc, path, from),
        Op::Test { path, value } => apply_test(doc, path, value),
    }
}

/// The operation a sequence halted on.
#[derive(Debug, Clone, PartialEq)]
pub struct OpFailure {
    /// Index of the failed operation within the sequence.
    pub index: usize,
    pub error: PatchError,
}

/// Apply a sequence of operations in order, halting on the first failure.
///
/// On failure the document keeps every mutation made by the operations
/// that succeeded before the failing one; nothing is rolled back here.
pub fn apply_ops(doc: &mut Value, ops: &[Op]) -> Result<(), OpFailure> {
    for (index, op) in ops.iter().enumerate() {
        apply_op(doc, op).map_err(|error| OpFailure { index, error })?;
    }
    Ok(())
}
