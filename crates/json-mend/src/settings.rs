//! Configuration for the public engine entry points.

use crate::reporter::Reporter;

/// Settings for [`apply_patch`](crate::apply_patch) and
/// [`apply_patch_into`](crate::apply_patch_into).
#[derive(Default)]
pub struct ApplySettings<'a> {
    /// Where issues are reported. `None` uses the log-and-pass-through
    /// default ([`LogReporter`](crate::LogReporter)).
    pub reporting: Option<&'a dyn Reporter>,
    /// When `true`, a JSON Patch operation sequence is applied to a private
    /// clone and committed only if every operation succeeds, so a
    /// mid-sequence failure leaves the target untouched. The default
    /// (`false`) keeps the mutations of the operations that succeeded
    /// before the failure.
    pub atomic: bool,
}

/// Settings for [`create_patch`](crate::create_patch).
#[derive(Default)]
pub struct CreatePatchSettings<'a> {
    /// Where issues are reported. `None` uses the log-and-pass-through
    /// default.
    pub reporting: Option<&'a dyn Reporter>,
    /// Carried for object-serialization layers built on top of the engine
    /// (whether default-valued fields are kept in serialized output). Has
    /// no effect on patch generation itself.
    pub keep_defaults: bool,
}
