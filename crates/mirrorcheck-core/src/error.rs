use thiserror::Error;

use crate::types::ExtractorKind;

// ---------------------------------------------------------------------------
// ParseError
// ---------------------------------------------------------------------------

/// Failure to find a timestamp in fetched status text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no line starting with '{marker}'")]
    MissingMarker { marker: &'static str },

    #[error("{count} lines start with '{marker}', expected exactly one")]
    DuplicateMarker { marker: &'static str, count: usize },

    #[error("status text is empty")]
    EmptyInput,

    #[error("invalid epoch seconds '{0}'")]
    InvalidEpoch(String),

    #[error("unrecognized date-time '{0}'")]
    InvalidDate(String),

    #[error("no 8-field listing line with a parseable date")]
    NoListingCandidates,
}

// ---------------------------------------------------------------------------
// CheckError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("both endpoints are '{0}': a mirror cannot be compared with itself")]
    IdenticalEndpoints(String),

    #[error("unsupported format kind '{0}' (expected one of: {kinds})", kinds = ExtractorKind::names().join(", "))]
    UnknownKind(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to fetch {endpoint}: {reason}")]
    Fetch { endpoint: String, reason: String },

    #[error("{endpoint} returned HTTP {status}")]
    HttpStatus { endpoint: String, status: u16 },

    #[error("cannot read {kind} timestamp from {endpoint}: {reason}")]
    Parse {
        endpoint: String,
        kind: ExtractorKind,
        reason: ParseError,
    },
}

/// Coarse grouping of [`CheckError`] used for reporting and exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Fetch,
    Parse,
}

impl CheckError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CheckError::IdenticalEndpoints(_)
            | CheckError::UnknownKind(_)
            | CheckError::InvalidConfig(_) => ErrorCategory::Config,
            CheckError::Fetch { .. } | CheckError::HttpStatus { .. } => ErrorCategory::Fetch,
            CheckError::Parse { .. } => ErrorCategory::Parse,
        }
    }

    /// Process exit status for this error. Configuration errors share `1`
    /// with a stale verdict; fetch and parse failures use `2`.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Config => 1,
            ErrorCategory::Fetch | ErrorCategory::Parse => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
