//! Issue reporting for engine operations.
//!
//! Failures are routed through a [`Reporter`] rather than being swallowed:
//! the engine hands the reporter a human-readable message, the
//! [`ResultCode`], and the pointer path where the issue occurred, and
//! returns whatever code the reporter hands back. The default reporter logs
//! and passes the code through unchanged; callers wanting to collect issues
//! supply a [`RecordingReporter`] (or their own implementation) instead.

use std::cell::RefCell;

use crate::result::ResultCode;

// ── Reporter trait ────────────────────────────────────────────────────────

/// Receives every issue an engine operation raises.
///
/// `report` may return the code unchanged (the usual case) or substitute a
/// different one; the engine propagates the returned code.
pub trait Reporter {
    fn report(&self, message: &str, result: ResultCode, path: &str) -> ResultCode;
}

// ── Default log-and-pass-through reporter ─────────────────────────────────

/// Stateless reporter that formats the issue and emits it through the
/// [`log`] facade. Halting codes log at error level, everything else at
/// warn. The code is returned unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, message: &str, result: ResultCode, path: &str) -> ResultCode {
        let location = if path.is_empty() { "(root)" } else { path };
        if result.halted() {
            log::error!("{message} ({result}) at {location}");
        } else {
            log::warn!("{message} ({result}) at {location}");
        }
        result
    }
}

// ── Recording reporter ────────────────────────────────────────────────────

/// A single issue captured by [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub message: String,
    pub result: ResultCode,
    pub path: String,
}

/// Caller-owned reporter that collects issues into a list.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    issues: RefCell<Vec<Issue>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the issues recorded so far.
    pub fn take(&self) -> Vec<Issue> {
        self.issues.take()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.borrow().is_empty()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, message: &str, result: ResultCode, path: &str) -> ResultCode {
        self.issues.borrow_mut().push(Issue {
            message: message.to_string(),
            result,
            path: path.to_string(),
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{Outcome, Task};

    #[test]
    fn log_reporter_passes_code_through() {
        let code = ResultCode::new(Task::Merge, Outcome::Catastrophic);
        assert_eq!(LogReporter.report("op failed", code, "/a/b"), code);
    }

    #[test]
    fn recording_reporter_collects_issues() {
        let reporter = RecordingReporter::new();
        let code = ResultCode::new(Task::CreatePatch, Outcome::Unsupported);
        reporter.report("cannot express null", code, "/x");
        let issues = reporter.take();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "/x");
        assert_eq!(issues[0].result, code);
        assert!(reporter.is_empty());
    }
}
