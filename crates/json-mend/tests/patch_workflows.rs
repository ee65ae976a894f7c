//! End-to-end workflows through the public API: generate a patch, ship it
//! in wire form, apply it to a copy of the source, and compare.

use json_mend::{
    apply_patch, apply_patch_into, compare, create_patch, ApplySettings, CompareResult,
    CreatePatchSettings, MergeApproach, Outcome, Processing, RecordingReporter, ResultCode, Task,
};
use serde_json::{json, Value};

fn roundtrip(source: Value, target: Value, approach: MergeApproach) -> Value {
    let mut patch = json!(null);
    let code = create_patch(
        &mut patch,
        &source,
        &target,
        approach,
        &CreatePatchSettings::default(),
    );
    assert_eq!(code, ResultCode::success(Task::CreatePatch));

    let mut doc = source;
    let code = apply_patch(&mut doc, &patch, approach, &ApplySettings::default());
    assert_eq!(code, ResultCode::success(Task::Merge));
    assert!(
        compare(&doc, &target).is_equal(),
        "patched {doc} != target {target}"
    );
    patch
}

#[test]
fn merge_patch_roundtrip_for_document_pairs() {
    let pairs = [
        (json!({}), json!({"a": 1})),
        (json!({"a": 1}), json!({})),
        (json!({"a": {"b": [1, 2]}}), json!({"a": {"b": [2, 1]}, "c": "x"})),
        (json!({"deep": {"x": 1, "y": {"z": true}}}), json!({"deep": {"x": 2, "y": {"z": true}}})),
        (json!([1, 2, 3]), json!({"now": "object"})),
        (json!({"keep": 1, "drop": 2}), json!({"keep": 1})),
    ];
    for (source, target) in pairs {
        roundtrip(source, target, MergeApproach::JsonMergePatch);
    }
}

#[test]
fn json_patch_roundtrip_for_document_pairs() {
    let pairs = [
        (json!({"a": 1}), json!({"a": 1, "b": 2})),
        (json!({"a": [1, 2, 3, 4]}), json!({"a": [1, 9]})),
        (json!({"a": [1]}), json!({"a": [1, 2, 3]})),
        (json!({"a": {"b": 1}}), json!({"a": [1, 2]})),
        (json!("scalar"), json!({"a": null})),
        (json!({"x": null}), json!({"x": 0})),
    ];
    for (source, target) in pairs {
        roundtrip(source, target, MergeApproach::JsonPatch);
    }
}

#[test]
fn diffing_a_document_against_itself_is_a_no_op() {
    let doc = json!({"a": [1, {"b": null}], "c": "text"});

    let mut patch = json!(null);
    create_patch(
        &mut patch,
        &doc,
        &doc,
        MergeApproach::JsonMergePatch,
        &CreatePatchSettings::default(),
    );
    assert_eq!(patch, json!({}));

    let mut copy = doc.clone();
    apply_patch(
        &mut copy,
        &patch,
        MergeApproach::JsonMergePatch,
        &ApplySettings::default(),
    );
    assert!(compare(&copy, &doc).is_equal());
}

#[test]
fn object_comparison_ignores_insertion_order() {
    assert_eq!(
        compare(&json!({"a": 1, "b": 2}), &json!({"b": 2, "a": 1})),
        CompareResult::Equal
    );
}

#[test]
fn array_comparison_is_order_sensitive() {
    assert_eq!(compare(&json!([1, 2]), &json!([2, 1])), CompareResult::Less);
}

#[test]
fn merge_patch_deletion_leaves_siblings_untouched() {
    let mut doc = json!({"x": 5, "y": 6});
    let code = apply_patch(
        &mut doc,
        &json!({"x": null}),
        MergeApproach::JsonMergePatch,
        &ApplySettings::default(),
    );
    assert_eq!(code.outcome(), Outcome::Success);
    assert_eq!(doc, json!({"y": 6}));
}

#[test]
fn test_failure_halts_mid_sequence() {
    let mut doc = json!({"a": 0});
    let patch = json!([
        {"op": "replace", "path": "/a", "value": 1},
        {"op": "test", "path": "/a", "value": 99},
        {"op": "add", "path": "/b", "value": 2},
    ]);
    let code = apply_patch(
        &mut doc,
        &patch,
        MergeApproach::JsonPatch,
        &ApplySettings::default(),
    );
    assert_eq!(code.processing(), Processing::Halted);
    // The replace landed, the add after the failed test never ran.
    assert_eq!(doc, json!({"a": 1}));
}

#[test]
fn move_into_own_descendant_is_rejected() {
    let mut doc = json!({"a": {"b": 1}});
    let patch = json!([{"op": "move", "path": "/a/b", "from": "/a"}]);
    let code = apply_patch(
        &mut doc,
        &patch,
        MergeApproach::JsonPatch,
        &ApplySettings::default(),
    );
    assert_eq!(code.outcome(), Outcome::Catastrophic);
    assert_eq!(doc, json!({"a": {"b": 1}}));
}

#[test]
fn escaped_pointer_tokens_roundtrip_through_the_wire() {
    let source = json!({"a/b": 1, "c~d": {"e": 2}});
    let target = json!({"a/b": 9, "c~d": {"e": 2}});
    let patch = roundtrip(source, target, MergeApproach::JsonPatch);
    assert_eq!(patch, json!([{"op": "replace", "path": "/a~1b", "value": 9}]));
}

#[test]
fn atomic_apply_leaves_target_untouched_on_failure() {
    let mut doc = json!({"a": 0, "b": 0});
    let patch = json!([
        {"op": "replace", "path": "/a", "value": 1},
        {"op": "remove", "path": "/missing"},
    ]);
    let settings = ApplySettings { atomic: true, ..Default::default() };
    let code = apply_patch(&mut doc, &patch, MergeApproach::JsonPatch, &settings);
    assert!(code.halted());
    assert_eq!(doc, json!({"a": 0, "b": 0}));
}

#[test]
fn into_variant_never_exposes_partial_results() {
    let source = json!({"a": 0});
    let patch = json!([
        {"op": "replace", "path": "/a", "value": 1},
        {"op": "remove", "path": "/missing"},
    ]);
    let mut output = json!(null);
    let code = apply_patch_into(
        &mut output,
        &source,
        &patch,
        MergeApproach::JsonPatch,
        &ApplySettings::default(),
    );
    assert!(code.halted());
    assert_eq!(output, json!({}));
    assert_eq!(source, json!({"a": 0}));
}

#[test]
fn recorded_issues_carry_pointer_paths() {
    let reporter = RecordingReporter::new();
    let settings = ApplySettings { reporting: Some(&reporter), ..Default::default() };
    let mut doc = json!({"outer": {"inner": []}});
    let patch = json!([{"op": "add", "path": "/outer/inner/5", "value": 1}]);
    let code = apply_patch(&mut doc, &patch, MergeApproach::JsonPatch, &settings);
    assert_eq!(code.outcome(), Outcome::Catastrophic);

    let issues = reporter.take();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].path, "/outer/inner/5");
    assert!(issues[0].message.contains("add"));
}

#[test]
fn unsupported_merge_patch_target_reports_and_halts() {
    let reporter = RecordingReporter::new();
    let settings = CreatePatchSettings { reporting: Some(&reporter), ..Default::default() };
    let mut patch = json!(null);
    let code = create_patch(
        &mut patch,
        &json!({"a": 1}),
        &json!({"a": {"keep": null}}),
        MergeApproach::JsonMergePatch,
        &settings,
    );
    assert_eq!(code.outcome(), Outcome::Unsupported);
    assert!(code.halted());
    assert_eq!(reporter.take()[0].path, "/a/keep");
}
