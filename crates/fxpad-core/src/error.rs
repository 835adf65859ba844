use thiserror::Error;

/// Validation and contract errors exposed by `fxpad-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("currency code cannot be empty")]
    EmptyCurrencyCode,
    #[error("currency code length {len} exceeds max {max}")]
    CurrencyCodeTooLong { len: usize, max: usize },
    #[error("currency code contains invalid character '{ch}' at index {index}")]
    CurrencyCodeInvalidChar { ch: char, index: usize },

    #[error("date must be an ISO calendar date (YYYY-MM-DD): '{value}'")]
    InvalidDate { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("rate for '{code}' must be a finite number greater than zero, got {rate}")]
    InvalidRate { code: String, rate: f64 },
    #[error("currency '{code}' appears more than once in the rate table")]
    DuplicateRate { code: String },
}

/// A code that should have been present in a static or fetched table.
///
/// Only codes from the bundled currency table are expected to reach the
/// calculator, so this signals a defect in the caller rather than bad user
/// input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("currency '{code}' is not present in the rate table")]
    CurrencyNotInTable { code: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("dataset error: {0}")]
    Dataset(#[from] serde_json::Error),
}
