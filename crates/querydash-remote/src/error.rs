use thiserror::Error;

/// Why a model answer could not be decoded. Never shown to the user; the
/// resolver answers with a placeholder instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("answer was empty after removing code fences")]
    Empty,

    #[error("answer is not valid JSON: {0}")]
    Json(String),

    #[error("answer does not match a known result shape: {0}")]
    UnknownShape(String),

    #[error("invalid chart point: {0}")]
    InvalidPoint(String),
}
