use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// ProcessError – everything that can end a sampling run early
// ---------------------------------------------------------------------------

/// Failures surfaced by one read → filter → write run.
///
/// None of these escape [`crate::pipeline::run`]; they are logged there and
/// turned into [`crate::pipeline::RunOutcome::Failed`].
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Source missing or unreadable, or output path unwritable.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An experiment key or gene pool id that would not stay inside its
    /// directory once interpolated into a path.
    #[error("invalid identifier '{identifier}': {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    /// Raised only under [`crate::data::filter::UnparsablePolicy::Fail`].
    #[error("line {line}: generation index is not a number")]
    UnparsableGeneration { line: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("reading config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}

impl ProcessError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProcessError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProcessError>;
