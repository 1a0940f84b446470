use dbdoc_api::{ObjectId, SourceError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(String),

    /// A row lacks a column the builder cannot do without.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The row source failed; passed through as-is.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("object {object} is nested deeper than {limit} levels")]
    DepthExceeded { limit: usize, object: ObjectId },
}

impl EngineError {
    /// Add context to the error.
    ///
    /// `Source` errors are left untouched so that the host sees exactly
    /// what the row source reported.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            EngineError::Config(msg) => EngineError::Config(format!("{ctx}: {msg}")),
            EngineError::InvalidArgument(msg) => {
                EngineError::InvalidArgument(format!("{ctx}: {msg}"))
            }
            other => other,
        }
    }
}
