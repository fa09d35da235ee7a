//! Error types for Mail Expense.
//!
//! Only the input-loading edge can fail with an error. The extraction
//! engine itself signals a heuristic miss or malformed message content
//! with `Option` — an unparseable message is an ordinary outcome, not an
//! error.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Input error: {0}")]
    Input(#[from] InputError),
}

/// Errors loading raw messages from disk or stdin.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse message JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
