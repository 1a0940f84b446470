use std::fmt;

/// Error kind for row source errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source could not be reached or read.
    Io,
    /// The source answered, but with data that cannot be turned into rows.
    Format,
}

/// Error returned by every `RowSource` request.
///
/// The engine never recovers from it: a failing request aborts the whole
/// document build and the error reaches the host unchanged.
#[derive(Debug)]
pub struct SourceError {
    pub kind: ErrorKind,
    pub message: String,
}

impl SourceError {
    pub fn io(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Io, message: msg.into() }
    }

    pub fn format(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Format, message: msg.into() }
    }

    /// Add context to the error, preserving the original ErrorKind.
    ///
    /// Produces: `"context: original message"`.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        Self {
            kind: self.kind,
            message: format!("{ctx}: {}", self.message),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for SourceError {}

// ---------------------------------------------------------------------------
// From impls: decoding errors → SourceError::format
// ---------------------------------------------------------------------------

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        Self::format(e.to_string())
    }
}

impl From<chrono::ParseError> for SourceError {
    fn from(e: chrono::ParseError) -> Self {
        Self::format(format!("timestamp: {e}"))
    }
}

impl From<rust_decimal::Error> for SourceError {
    fn from(e: rust_decimal::Error) -> Self {
        Self::format(format!("decimal: {e}"))
    }
}

impl From<uuid::Error> for SourceError {
    fn from(e: uuid::Error) -> Self {
        Self::format(format!("uuid: {e}"))
    }
}
