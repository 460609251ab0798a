//! Pipeline error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.
//! Note the boundary: these errors only cover fact acquisition. The
//! calculation engines themselves degrade to sentinels and skip lists and
//! never return an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Failed to open '{path}': {source}")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error in '{path}' at line {line}: {reason}")]
    CsvParse {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("Baseline facts missing for scope '{0}'")]
    MissingBaseline(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for pipeline operations.
pub type PlanResult<T> = Result<T, PlanError>;
