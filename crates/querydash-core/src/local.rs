//! Keyword-matching resolver over the canned catalog

use crate::catalog;
use crate::config::Config;
use crate::error::QueryError;
use crate::resolver::Resolver;
use crate::types::{ensure_not_blank, ResultPayload};
use async_trait::async_trait;
use querydash_storage::QueryMode;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct LocalResolver {
    delay: Duration,
}

impl LocalResolver {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.local_delay)
    }

    /// Resolve without the simulated delay
    pub fn resolve_now(&self, text: &str) -> Result<ResultPayload, QueryError> {
        ensure_not_blank(text)?;

        let lowered = text.trim().to_lowercase();
        match catalog::find(&lowered) {
            Some(group) => {
                tracing::debug!(group = group.name, "local query matched keyword group");
                Ok(group.payload())
            }
            None => {
                tracing::debug!("local query matched no keyword group, using default");
                Ok(catalog::default_payload())
            }
        }
    }
}

impl Default for LocalResolver {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[async_trait]
impl Resolver for LocalResolver {
    fn mode(&self) -> QueryMode {
        QueryMode::Local
    }

    async fn resolve(&self, text: &str) -> Result<ResultPayload, QueryError> {
        ensure_not_blank(text)?;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.resolve_now(text)
    }
}
