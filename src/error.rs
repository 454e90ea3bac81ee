//! Error taxonomy for the auditor.
//!
//! Every error here is fatal for a run: the dump is assumed to come straight
//! from the debug interface, so a line that does not fit the record shape
//! means the input is not what we think it is. Checksum mismatches are not
//! errors; they are reported through [`crate::report`].

use std::path::PathBuf;

/// Reason a 4-character flag field could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagError {
    #[error("expected 4 flag characters, found {0}")]
    Length(usize),
    #[error("unexpected {found:?} at position {position} (expected '.' or {expected:?})")]
    Character {
        position: usize,
        found: char,
        expected: char,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord { line: usize, reason: String },
    #[error("line {line}: VLAN id {value:?} out of range (expected -1 or 0..=32767)")]
    InvalidVid { line: usize, value: String },
    #[error("line {line}: invalid flag field {field:?}: {source}")]
    InvalidFlagField {
        line: usize,
        field: String,
        #[source]
        source: FlagError,
    },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AuditError {
    /// 1-based dump line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            AuditError::MalformedRecord { line, .. }
            | AuditError::InvalidVid { line, .. }
            | AuditError::InvalidFlagField { line, .. } => Some(*line),
            AuditError::Io { .. } => None,
        }
    }
}
