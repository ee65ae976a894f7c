//! json-mend — JSON structural diff, patch, and merge.
//!
//! The engine computes minimal patches between two JSON documents, applies
//! patches in RFC 6902 (JSON Patch) and RFC 7386 (JSON Merge Patch) form,
//! and provides a deep structural comparator with a total ordering across
//! heterogeneous JSON types. Operations report through a `(Task, Outcome)`
//! [`ResultCode`] taxonomy and a [`Reporter`] callback so failures are
//! diagnosed but never swallowed.
//!
//! # Example
//!
//! ```
//! use json_mend::{
//!     apply_patch, create_patch, compare, ApplySettings, CreatePatchSettings,
//!     MergeApproach,
//! };
//! use serde_json::json;
//!
//! let source = json!({"name": "sensor", "rate": 50});
//! let target = json!({"name": "sensor", "rate": 90, "enabled": true});
//!
//! let mut patch = json!(null);
//! let code = create_patch(
//!     &mut patch,
//!     &source,
//!     &target,
//!     MergeApproach::JsonMergePatch,
//!     &CreatePatchSettings::default(),
//! );
//! assert!(!code.halted());
//! assert_eq!(patch, json!({"rate": 90, "enabled": true}));
//!
//! let mut doc = source;
//! apply_patch(&mut doc, &patch, MergeApproach::JsonMergePatch, &ApplySettings::default());
//! assert!(compare(&doc, &target).is_equal());
//! ```

pub mod compare;
pub mod diff;
pub mod merge_patch;
pub mod patch;
pub mod reporter;
pub mod result;
pub mod settings;

mod engine;

pub use compare::{compare, CompareResult};
pub use engine::{apply_patch, apply_patch_into, create_patch, MergeApproach};
pub use merge_patch::apply_merge_patch;
pub use reporter::{Issue, LogReporter, RecordingReporter, Reporter};
pub use result::{Outcome, Processing, ResultCode, Task};
pub use settings::{ApplySettings, CreatePatchSettings};
