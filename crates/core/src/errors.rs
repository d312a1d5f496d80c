use thiserror::Error;

/// Unified error type for the entire stock-portfolio-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Holdings ────────────────────────────────────────────────────
    #[error("Stock '{0}' not in price list.")]
    InvalidSymbol(String),

    #[error("Quantity must be a positive number.")]
    InvalidQuantity(String),

    #[error("Portfolio is empty!")]
    EmptyPortfolio,

    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Storage / File ──────────────────────────────────────────────
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Coarse classification of a [`CoreError`], for callers that branch on the
/// kind of failure rather than its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidSymbol,
    InvalidQuantity,
    EmptyPortfolio,
    Validation,
    MalformedDocument,
    Io,
    Serialization,
}

impl CoreError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InvalidSymbol(_) => ErrorKind::InvalidSymbol,
            CoreError::InvalidQuantity(_) => ErrorKind::InvalidQuantity,
            CoreError::EmptyPortfolio => ErrorKind::EmptyPortfolio,
            CoreError::ValidationError(_) => ErrorKind::Validation,
            CoreError::MalformedDocument(_) => ErrorKind::MalformedDocument,
            CoreError::FileIO(_) => ErrorKind::Io,
            CoreError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Short heading for a user-facing notice (the message is `to_string()`).
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            CoreError::InvalidSymbol(_) => "Invalid Stock",
            CoreError::InvalidQuantity(_) => "Invalid Quantity",
            CoreError::EmptyPortfolio => "Empty",
            _ => "Error",
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}
