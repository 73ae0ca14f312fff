//! Query dispatcher
//!
//! Routes each submission to exactly one resolver, records it in history and
//! publishes the outcome to the current-result slot. Submissions are tagged
//! with increasing request ids; only the most recently issued request may
//! write the slot, so a slow older query never replaces a newer answer.

use crate::error::DispatchError;
use crate::resolver::Resolver;
use crate::types::{Query, ResultPayload};
use chrono::{DateTime, Utc};
use querydash_storage::{EntryKey, HistoryEntry, HistoryStore, QueryMode, QueryStatus};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Outcome of a successful submission
#[derive(Debug, Clone)]
pub struct Submission {
    pub request_id: u64,
    pub payload: ResultPayload,
    /// History entry recorded for this submission
    pub entry_key: EntryKey,
    /// Whether this result now occupies the current-result slot
    pub became_current: bool,
}

#[derive(Debug, Default)]
struct CurrentSlot {
    request_id: u64,
    result: Option<ResultPayload>,
    error: Option<String>,
}

pub struct Dispatcher {
    local: Arc<dyn Resolver>,
    remote: Arc<dyn Resolver>,
    history: Mutex<HistoryStore>,
    current: Mutex<CurrentSlot>,
    last_issued: AtomicU64,
    last_stamp_ms: AtomicI64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Dispatcher {
    pub fn new(local: Arc<dyn Resolver>, remote: Arc<dyn Resolver>, history: HistoryStore) -> Self {
        let last_stamp_ms = history
            .list()
            .iter()
            .map(|e| e.submitted_at.timestamp_millis())
            .max()
            .unwrap_or(i64::MIN);

        Self {
            local,
            remote,
            history: Mutex::new(history),
            current: Mutex::new(CurrentSlot::default()),
            last_issued: AtomicU64::new(0),
            last_stamp_ms: AtomicI64::new(last_stamp_ms),
        }
    }

    /// Resolve `query` with the resolver for its mode.
    ///
    /// Blank text fails with [`DispatchError::InvalidQuery`] before any
    /// history entry is written. Resolver failures are reported as
    /// [`DispatchError::Failed`] with a readable message.
    pub async fn submit(&self, query: Query) -> Result<Submission, DispatchError> {
        query.validate()?;

        let request_id = self.last_issued.fetch_add(1, Ordering::SeqCst) + 1;
        let entry = HistoryEntry::pending(query.text.clone(), query.mode, self.next_stamp());
        let entry_key = entry.key();
        self.record(|history| history.append(entry).map(|_| ()));

        tracing::info!(request_id, mode = %query.mode, "submitting query");
        let outcome = self.resolver_for(query.mode).resolve(&query.text).await;

        match outcome {
            Ok(payload) => {
                self.record(|history| {
                    history
                        .update_status(&entry_key, QueryStatus::Completed)
                        .map(|_| ())
                });
                let became_current = self.publish(request_id, Ok(payload.clone()));
                tracing::info!(request_id, title = %payload.title, "query completed");
                Ok(Submission {
                    request_id,
                    payload,
                    entry_key,
                    became_current,
                })
            }
            Err(err) => {
                self.record(|history| {
                    history
                        .update_status(&entry_key, QueryStatus::Failed)
                        .map(|_| ())
                });
                let err = DispatchError::from(err);
                self.publish(request_id, Err(err.to_string()));
                tracing::warn!(request_id, error = %err, "query failed");
                Err(err)
            }
        }
    }

    pub fn resolver_for(&self, mode: QueryMode) -> &dyn Resolver {
        match mode {
            QueryMode::Local => self.local.as_ref(),
            QueryMode::Remote => self.remote.as_ref(),
        }
    }

    /// Result of the most recently issued request, if it succeeded
    pub fn current_result(&self) -> Option<ResultPayload> {
        lock(&self.current).result.clone()
    }

    /// Error message of the most recently issued request, if it failed
    pub fn last_error(&self) -> Option<String> {
        lock(&self.current).error.clone()
    }

    /// Snapshot of history, most recent first
    pub fn history(&self) -> Vec<HistoryEntry> {
        lock(&self.history).list().to_vec()
    }

    /// Run `f` with exclusive access to the history store
    pub fn with_history<R>(&self, f: impl FnOnce(&mut HistoryStore) -> R) -> R {
        f(&mut lock(&self.history))
    }

    fn publish(&self, request_id: u64, outcome: Result<ResultPayload, String>) -> bool {
        let mut slot = lock(&self.current);
        if request_id != self.last_issued.load(Ordering::SeqCst) || request_id < slot.request_id {
            tracing::debug!(request_id, "dropping stale result");
            return false;
        }

        slot.request_id = request_id;
        match outcome {
            Ok(payload) => {
                slot.result = Some(payload);
                slot.error = None;
            }
            Err(message) => {
                slot.result = None;
                slot.error = Some(message);
            }
        }
        true
    }

    fn record(&self, f: impl FnOnce(&mut HistoryStore) -> anyhow::Result<()>) {
        if let Err(e) = f(&mut lock(&self.history)) {
            tracing::warn!(error = %e, "failed to persist query history");
        }
    }

    /// Millisecond timestamp strictly after every previously issued one, so
    /// identical queries submitted back to back never collide in history
    fn next_stamp(&self) -> DateTime<Utc> {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last_stamp_ms
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
                Some(now.max(prev.saturating_add(1)))
            })
            .unwrap_or(now);
        let stamp = now.max(previous.saturating_add(1));
        DateTime::from_timestamp_millis(stamp).unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use crate::local::LocalResolver;
    use async_trait::async_trait;
    use querydash_storage::MemoryStore;
    use std::time::Duration;

    struct FailingRemote;

    #[async_trait]
    impl Resolver for FailingRemote {
        fn mode(&self) -> QueryMode {
            QueryMode::Remote
        }

        async fn resolve(&self, _text: &str) -> Result<ResultPayload, QueryError> {
            Err(QueryError::RateLimited)
        }
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(
            Arc::new(LocalResolver::new(Duration::ZERO)),
            Arc::new(FailingRemote),
            HistoryStore::load(Arc::new(MemoryStore::new())),
        )
    }

    #[tokio::test]
    async fn test_local_submission_completes() {
        let dispatcher = dispatcher();
        let submission = dispatcher.submit(Query::local("Show total sales")).await.unwrap();

        assert_eq!(submission.payload.title, "Sales Data Analysis");
        assert!(submission.became_current);
        assert_eq!(submission.request_id, 1);

        let history = dispatcher.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, QueryStatus::Completed);
        assert!(history[0].matches(&submission.entry_key));
    }

    #[tokio::test]
    async fn test_blank_query_leaves_no_trace() {
        let dispatcher = dispatcher();
        let err = dispatcher.submit(Query::local("   ")).await.unwrap_err();
        assert_eq!(err, DispatchError::InvalidQuery);
        assert!(dispatcher.history().is_empty());
        assert!(dispatcher.current_result().is_none());
    }

    #[tokio::test]
    async fn test_resolver_error_becomes_message() {
        let dispatcher = dispatcher();
        let err = dispatcher.submit(Query::remote("sales")).await.unwrap_err();
        match err {
            DispatchError::Failed(msg) => assert!(msg.contains("Rate limit")),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(dispatcher.history()[0].status, QueryStatus::Failed);
        assert!(dispatcher.last_error().is_some());
        assert!(dispatcher.current_result().is_none());
    }

    #[tokio::test]
    async fn test_identical_submissions_are_independent() {
        let dispatcher = dispatcher();
        let a = dispatcher.submit(Query::local("orders")).await.unwrap();
        let b = dispatcher.submit(Query::local("orders")).await.unwrap();

        assert_ne!(a.request_id, b.request_id);
        assert!(b.entry_key.submitted_at > a.entry_key.submitted_at);
        assert_eq!(dispatcher.history().len(), 2);
    }

    #[test]
    fn test_stale_publish_is_dropped() {
        let dispatcher = dispatcher();
        dispatcher.last_issued.store(2, Ordering::SeqCst);

        let newer = LocalResolver::new(Duration::ZERO).resolve_now("orders").unwrap();
        let older = LocalResolver::new(Duration::ZERO).resolve_now("sales").unwrap();

        assert!(dispatcher.publish(2, Ok(newer)));
        assert!(!dispatcher.publish(1, Ok(older)));
        assert_eq!(dispatcher.current_result().unwrap().title, "Order Analysis");
    }

    #[test]
    fn test_stamps_strictly_increase() {
        let dispatcher = dispatcher();
        let stamps: Vec<_> = (0..5).map(|_| dispatcher.next_stamp()).collect();
        assert!(stamps.windows(2).all(|w| w[1] > w[0]));
    }
}
