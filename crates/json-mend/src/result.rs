//! Result codes for engine operations.
//!
//! Every public operation returns a [`ResultCode`]: a `(Task, Outcome)` pair
//! identifying which phase produced the result and how severe it was.
//! Codes from sub-steps are folded together with [`ResultCode::combine`],
//! where the worse outcome always wins, so a sequence of sub-operations
//! yields one aggregate status that can never be silently downgraded.

use std::fmt;

// ── Task ──────────────────────────────────────────────────────────────────

/// The phase of processing that produced a result.
///
/// The engine itself reports `RetrieveInfo`, `Merge`, and `CreatePatch`;
/// the remaining tasks are part of the shared taxonomy so layers built on
/// top of the engine (object serialization, import resolution) can tag
/// their results uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Gathering information needed before processing can start.
    RetrieveInfo,
    /// Constructing a default value.
    CreateDefault,
    /// Converting a value from one type to another.
    Convert,
    /// Clearing a value or resetting it to defaults.
    Clear,
    /// Reading a field from a document.
    ReadField,
    /// Writing a value into a document.
    WriteValue,
    /// Applying a patch onto a document.
    Merge,
    /// Generating a patch from two documents.
    CreatePatch,
    /// Resolving imported/included documents.
    Import,
}

impl Task {
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::RetrieveInfo => "retrieving info",
            Task::CreateDefault => "creating default",
            Task::Convert => "converting",
            Task::Clear => "clearing",
            Task::ReadField => "reading field",
            Task::WriteValue => "writing value",
            Task::Merge => "merging",
            Task::CreatePatch => "creating patch",
            Task::Import => "importing",
        }
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────

/// How an operation concluded, ranked by severity.
///
/// The discriminants form an explicit severity table: combining two codes
/// keeps the one with the higher rank. Everything from `Unknown` up halts
/// processing (see [`Processing`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Outcome {
    /// Fully completed as requested.
    Success = 1,
    /// Nothing needed to be done.
    Skipped = 2,
    /// Part of the work was deliberately not done.
    PartialSkip = 3,
    /// A default value was used instead of explicit data.
    DefaultsUsed = 4,
    /// Some fields fell back to default values.
    PartialDefaults = 5,
    /// Failed for an unknown reason.
    Unknown = 6,
    /// A required value or path was missing.
    Missing = 7,
    /// The data was malformed.
    Invalid = 8,
    /// A required facility was not available.
    Unavailable = 9,
    /// The request cannot be expressed or fulfilled.
    Unsupported = 10,
    /// Values had incompatible types.
    TypeMismatch = 11,
    /// A `test` operation did not match.
    TestFailed = 12,
    /// An unrecoverable condition; processing stopped where it was.
    Catastrophic = 13,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Skipped => "skipped",
            Outcome::PartialSkip => "partially skipped",
            Outcome::DefaultsUsed => "defaults used",
            Outcome::PartialDefaults => "partial defaults used",
            Outcome::Unknown => "unknown failure",
            Outcome::Missing => "missing data",
            Outcome::Invalid => "invalid data",
            Outcome::Unavailable => "unavailable",
            Outcome::Unsupported => "unsupported",
            Outcome::TypeMismatch => "type mismatch",
            Outcome::TestFailed => "test failed",
            Outcome::Catastrophic => "catastrophic failure",
        }
    }
}

// ── Processing ────────────────────────────────────────────────────────────

/// Coarse processing tier derived from an [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Processing {
    /// The operation ran to completion exactly as requested.
    Completed,
    /// The operation ran to completion with substitutions (defaults).
    Altered,
    /// The operation ran to completion but left some work undone.
    PartialAlter,
    /// The operation stopped at the point of failure.
    Halted,
}

// ── ResultCode ────────────────────────────────────────────────────────────

/// A `(Task, Outcome)` pair describing the result of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultCode {
    task: Task,
    outcome: Outcome,
}

impl ResultCode {
    pub fn new(task: Task, outcome: Outcome) -> Self {
        Self { task, outcome }
    }

    pub fn success(task: Task) -> Self {
        Self::new(task, Outcome::Success)
    }

    pub fn task(&self) -> Task {
        self.task
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Fold another code into this one; the worse outcome wins.
    ///
    /// When `other` is worse, its task is kept as well so the aggregate
    /// points at the step that caused the failure.
    pub fn combine(self, other: ResultCode) -> ResultCode {
        if other.outcome > self.outcome {
            other
        } else {
            self
        }
    }

    /// The processing tier for this code's outcome.
    pub fn processing(&self) -> Processing {
        match self.outcome {
            Outcome::Success => Processing::Completed,
            Outcome::DefaultsUsed | Outcome::PartialDefaults => Processing::Altered,
            Outcome::Skipped | Outcome::PartialSkip => Processing::PartialAlter,
            _ => Processing::Halted,
        }
    }

    /// `true` if processing stopped before completing.
    pub fn halted(&self) -> bool {
        self.processing() == Processing::Halted
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} while {}", self.outcome.as_str(), self.task.as_str())
    }
}
