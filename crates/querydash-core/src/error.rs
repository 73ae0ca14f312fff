//! Error types for query resolution

use thiserror::Error;

/// Failure of a single resolver call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Blank or whitespace-only query text
    #[error("Please enter a valid query")]
    InvalidQuery,

    /// The remote resolver has no credential
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP 401 from the remote endpoint
    #[error("Invalid API key. Please check your QUERYDASH_API_KEY configuration.")]
    Auth,

    /// HTTP 429 from the remote endpoint
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Any other transport or upstream failure
    #[error("{0}")]
    Upstream(String),
}

/// Failure of a dispatched submission.
///
/// Resolver errors are flattened to their message at this boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Please enter a valid query")]
    InvalidQuery,

    #[error("{0}")]
    Failed(String),
}

impl From<QueryError> for DispatchError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::InvalidQuery => DispatchError::InvalidQuery,
            other => DispatchError::Failed(other.to_string()),
        }
    }
}
