//! Error types shared by the diff engine and the unified diff parser

use thiserror::Error;

pub type DiffResult<T> = Result<T, DiffError>;

/// Failure modes of the differencing core
///
/// Every error is surfaced to the caller; nothing is logged and swallowed,
/// and the engine never degrades to an empty patch on failure.
#[derive(Error, Debug)]
pub enum DiffError {
    /// The Myers loop exhausted its budget without reaching the sink.
    ///
    /// Cannot happen for finite inputs under the algorithm's invariants,
    /// so seeing this is a bug signal rather than an input problem.
    #[error("could not find a diff path")]
    DifferentiationFailed,

    /// Internal state contradicted a structural invariant, e.g. path
    /// reconstruction met a snake node where a diff node was expected.
    #[error("bad diff path: {0}")]
    InvariantViolation(&'static str),

    /// A line appeared where the unified diff grammar does not allow it.
    /// Carries the offending line; the parser does not attempt recovery.
    #[error("{message}: {line:?}")]
    Parse { message: &'static str, line: String },

    /// A chunk failed verification against the document it is applied to.
    #[error("patch application failed: {0}")]
    PatchFailed(String),

    /// Propagated verbatim from the underlying character stream.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DiffError {
    pub(crate) fn parse(message: &'static str, line: impl Into<String>) -> Self {
        DiffError::Parse {
            message,
            line: line.into(),
        }
    }
}
