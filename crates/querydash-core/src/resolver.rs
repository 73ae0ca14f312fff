//! Resolver trait shared by local and remote modes

use crate::error::QueryError;
use crate::types::ResultPayload;
use async_trait::async_trait;
use querydash_storage::QueryMode;

/// Turns query text into a normalized [`ResultPayload`]
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Mode this resolver serves
    fn mode(&self) -> QueryMode;

    /// Resolve one query. Blank text must fail with [`QueryError::InvalidQuery`].
    async fn resolve(&self, text: &str) -> Result<ResultPayload, QueryError>;
}
