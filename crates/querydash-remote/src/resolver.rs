use crate::extract::decode;
use crate::transport::{HttpTransport, Transport};
use async_trait::async_trait;
use querydash_core::{normalize, Config, QueryError, QueryMode, Resolver, ResultPayload, ResultShape};
use std::sync::Arc;

const PARSE_FAILURE_MESSAGE: &str = "Failed to parse AI response. Please try again.";

/// Answers queries through the generative-language API.
///
/// Transport failures are returned as errors. Answers that cannot be
/// decoded are replaced by a placeholder payload instead.
pub struct RemoteResolver {
    transport: Option<Arc<dyn Transport>>,
}

impl RemoteResolver {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    /// Resolver with no credential; every call fails with a configuration error
    pub fn unconfigured() -> Self {
        Self { transport: None }
    }

    pub fn from_config(config: &Config) -> Self {
        match HttpTransport::from_config(config) {
            Some(transport) => Self::new(Arc::new(transport)),
            None => Self::unconfigured(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }
}

/// Decode `answer`, falling back to the error shape on any parse failure
pub(crate) fn interpret(answer: &str) -> ResultShape {
    decode(answer).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not decode AI response, using placeholder");
        ResultShape::Error {
            message: PARSE_FAILURE_MESSAGE.to_string(),
        }
    })
}

#[async_trait]
impl Resolver for RemoteResolver {
    fn mode(&self) -> QueryMode {
        QueryMode::Remote
    }

    async fn resolve(&self, text: &str) -> Result<ResultPayload, QueryError> {
        if text.trim().is_empty() {
            return Err(QueryError::InvalidQuery);
        }
        let transport = self.transport.as_ref().ok_or_else(|| {
            QueryError::Configuration(
                "API key not configured. Set QUERYDASH_API_KEY to use remote mode.".to_string(),
            )
        })?;

        let answer = transport.generate(text).await?;
        let shape = interpret(&answer);
        tracing::debug!(shape = shape.kind(), "decoded AI response");
        Ok(normalize(shape, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CannedTransport {
        answer: Result<String, QueryError>,
        calls: AtomicUsize,
    }

    impl CannedTransport {
        fn ok(answer: &str) -> Arc<Self> {
            Arc::new(Self {
                answer: Ok(answer.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn err(err: QueryError) -> Arc<Self> {
            Arc::new(Self {
                answer: Err(err),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn generate(&self, _query: &str) -> Result<String, QueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }
    }

    #[tokio::test]
    async fn test_decodes_chart_answer() {
        let transport = CannedTransport::ok(
            "```json\n{\"type\":\"chart\",\"data\":{\"chartType\":\"bar\",\"data\":[{\"name\":\"A\",\"value\":3}]}}\n```",
        );
        let resolver = RemoteResolver::new(transport.clone());
        let payload = resolver.resolve("product split").await.unwrap();

        assert_eq!(payload.title, "product split");
        assert_eq!(payload.categories(), ["A"]);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_answer_is_placeholder() {
        let resolver = RemoteResolver::new(CannedTransport::ok("```json\n{\"type\": \"chart\""));
        let payload = resolver.resolve("sales").await.unwrap();
        assert!(payload.is_placeholder());
    }

    #[tokio::test]
    async fn test_unconfigured() {
        let resolver = RemoteResolver::unconfigured();
        assert!(!resolver.is_configured());
        assert!(matches!(
            resolver.resolve("sales").await,
            Err(QueryError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_blank_checked_before_credential() {
        let resolver = RemoteResolver::unconfigured();
        assert_eq!(resolver.resolve("  ").await, Err(QueryError::InvalidQuery));
    }

    #[tokio::test]
    async fn test_transport_errors_propagate() {
        let transport = CannedTransport::err(QueryError::RateLimited);
        let resolver = RemoteResolver::new(transport.clone());
        assert_eq!(resolver.resolve("sales").await, Err(QueryError::RateLimited));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_interpret_falls_back() {
        assert_eq!(interpret("not json at all").kind(), "error");
        assert_eq!(
            interpret(r#"{"type":"summary","data":{"metrics":{},"insights":[]}}"#).kind(),
            "summary"
        );
    }
}
