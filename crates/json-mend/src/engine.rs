//! Public entry points tying the pieces together.
//!
//! Every operation returns a [`ResultCode`] and routes failures through the
//! configured [`Reporter`](crate::reporter::Reporter) before returning, so
//! nothing fails silently even when callers ignore the returned code.

use serde_json::{Map, Value};

use json_mend_pointer::format_pointer;

use crate::diff;
use crate::merge_patch::apply_merge_patch;
use crate::patch::apply::{apply_ops, OpFailure};
use crate::patch::codec;
use crate::patch::types::{Op, PatchError};
use crate::reporter::{LogReporter, Reporter};
use crate::result::{Outcome, ResultCode, Task};
use crate::settings::{ApplySettings, CreatePatchSettings};

/// Which patch format an operation consumes or produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeApproach {
    /// RFC 6902 operation sequences.
    JsonPatch,
    /// RFC 7386 recursive object merges.
    JsonMergePatch,
}

static DEFAULT_REPORTER: LogReporter = LogReporter;

fn reporter_or_default<'a>(reporting: Option<&'a dyn Reporter>) -> &'a dyn Reporter {
    reporting.unwrap_or(&DEFAULT_REPORTER)
}

fn outcome_for(error: &PatchError) -> Outcome {
    match error {
        PatchError::TestFailed => Outcome::TestFailed,
        PatchError::InvalidOp(_) => Outcome::Invalid,
        PatchError::NotFound
        | PatchError::InvalidIndex
        | PatchError::InvalidTarget
        | PatchError::MoveIntoSelf => Outcome::Catastrophic,
    }
}

// ── Apply ─────────────────────────────────────────────────────────────────

/// Apply `patch` to `target` in place.
///
/// With [`MergeApproach::JsonPatch`] the patch must be an RFC 6902
/// operation array; operations apply sequentially and the first failure
/// halts processing. By default the target keeps the mutations of the
/// operations that succeeded before the failure — set
/// [`ApplySettings::atomic`] to commit all-or-nothing instead. With
/// [`MergeApproach::JsonMergePatch`] the patch merges per RFC 7386, which
/// cannot fail.
pub fn apply_patch(
    target: &mut Value,
    patch: &Value,
    approach: MergeApproach,
    settings: &ApplySettings<'_>,
) -> ResultCode {
    let reporter = reporter_or_default(settings.reporting);
    match approach {
        MergeApproach::JsonPatch => apply_json_patch(target, patch, settings.atomic, reporter),
        MergeApproach::JsonMergePatch => {
            apply_merge_patch(target, patch);
            ResultCode::success(Task::Merge)
        }
    }
}

/// Clone `source` into `output`, then apply `patch` on top.
///
/// This entry point never exposes a half-merged document: on any failure
/// `output` is reset to an empty object. (`ApplySettings::atomic` is
/// redundant here.)
pub fn apply_patch_into(
    output: &mut Value,
    source: &Value,
    patch: &Value,
    approach: MergeApproach,
    settings: &ApplySettings<'_>,
) -> ResultCode {
    *output = source.clone();
    let code = apply_patch(output, patch, approach, settings);
    if code.halted() {
        *output = Value::Object(Map::new());
    }
    code
}

fn apply_json_patch(
    target: &mut Value,
    patch: &Value,
    atomic: bool,
    reporter: &dyn Reporter,
) -> ResultCode {
    let ops = match codec::decode_patch(patch) {
        Ok(ops) => ops,
        Err(error) => {
            // Decoding is the info-gathering phase; nothing was applied.
            let code = ResultCode::new(Task::RetrieveInfo, outcome_for(&error));
            return reporter.report(&format!("patch document is malformed: {error}"), code, "");
        }
    };
    if atomic {
        let mut working = target.clone();
        match apply_ops(&mut working, &ops) {
            Ok(()) => {
                *target = working;
                ResultCode::success(Task::Merge)
            }
            Err(failure) => report_op_failure(reporter, &ops, &failure),
        }
    } else {
        match apply_ops(target, &ops) {
            Ok(()) => ResultCode::success(Task::Merge),
            Err(failure) => report_op_failure(reporter, &ops, &failure),
        }
    }
}

fn report_op_failure(reporter: &dyn Reporter, ops: &[Op], failure: &OpFailure) -> ResultCode {
    let op = &ops[failure.index];
    let code = ResultCode::new(Task::Merge, outcome_for(&failure.error));
    let message = format!(
        "'{}' operation at index {} failed: {}",
        op.verb(),
        failure.index,
        failure.error
    );
    reporter.report(&message, code, &format_pointer(op.path()))
}

// ── Create ────────────────────────────────────────────────────────────────

/// Generate into `patch` a patch transforming `source` into `target`.
///
/// The generated patch satisfies `apply_patch(source, patch) == target`
/// under Compare-Equal. With [`MergeApproach::JsonMergePatch`], a target
/// value that RFC 7386 cannot express (an explicit null object member)
/// reports `(CreatePatch, Unsupported)` and leaves `patch` untouched.
pub fn create_patch(
    patch: &mut Value,
    source: &Value,
    target: &Value,
    approach: MergeApproach,
    settings: &CreatePatchSettings<'_>,
) -> ResultCode {
    let reporter = reporter_or_default(settings.reporting);
    match approach {
        MergeApproach::JsonPatch => {
            *patch = codec::encode_patch(&diff::create_json_patch(source, target));
            ResultCode::success(Task::CreatePatch)
        }
        MergeApproach::JsonMergePatch => match diff::create_merge_patch(source, target) {
            Ok(value) => {
                *patch = value;
                ResultCode::success(Task::CreatePatch)
            }
            Err(error) => {
                let code = ResultCode::new(Task::CreatePatch, Outcome::Unsupported);
                let message = format!("cannot create merge patch: {error}");
                reporter.report(&message, code, &format_pointer(&error.path))
            }
        },
    }
}
