mod common;

use async_trait::async_trait;
use common::{canned_remote, dispatcher_with, memory_dispatcher, COMBINED_ANSWER};
use querydash_core::{
    DispatchError, Dispatcher, LocalResolver, Query, QueryError, QueryMode, QueryStatus, Resolver,
    ResultPayload,
};
use querydash_storage::{FileStore, HistoryStore, MemoryStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Local resolver that answers only after `release` is notified
struct GatedLocal {
    inner: LocalResolver,
    started: Notify,
    release: Notify,
}

impl GatedLocal {
    fn new() -> Self {
        Self {
            inner: LocalResolver::new(Duration::ZERO),
            started: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl Resolver for GatedLocal {
    fn mode(&self) -> QueryMode {
        QueryMode::Local
    }

    async fn resolve(&self, text: &str) -> Result<ResultPayload, QueryError> {
        self.started.notify_one();
        self.release.notified().await;
        self.inner.resolve_now(text)
    }
}

#[tokio::test]
async fn test_entry_is_pending_while_resolving() {
    let gate = Arc::new(GatedLocal::new());
    let dispatcher = Dispatcher::new(
        gate.clone(),
        canned_remote(COMBINED_ANSWER),
        HistoryStore::load(Arc::new(MemoryStore::new())),
    );

    let observe = async {
        gate.started.notified().await;

        let history = dispatcher.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text, "Show total sales");
        assert_eq!(history[0].status, QueryStatus::Pending);
        assert!(dispatcher.current_result().is_none());

        gate.release.notify_one();
    };
    let (submission, ()) = tokio::join!(dispatcher.submit(Query::local("Show total sales")), observe);

    assert_eq!(submission.unwrap().payload.title, "Sales Data Analysis");
    let history = dispatcher.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, QueryStatus::Completed);
}

#[tokio::test]
async fn test_show_total_sales_local() {
    let dispatcher = memory_dispatcher(COMBINED_ANSWER);

    let submission = dispatcher
        .submit(Query::local("Show total sales"))
        .await
        .unwrap();

    assert_eq!(submission.payload.title, "Sales Data Analysis");
    assert!(submission.payload.metrics.contains_key("Total Sales"));
    assert!(submission.became_current);
    assert_eq!(dispatcher.current_result(), Some(submission.payload));

    let history = dispatcher.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].text, "Show total sales");
    assert_eq!(history[0].mode, QueryMode::Local);
    assert_eq!(history[0].status, QueryStatus::Completed);
}

#[tokio::test]
async fn test_remote_combined_answer_normalized() {
    let dispatcher = memory_dispatcher(COMBINED_ANSWER);

    let payload = dispatcher
        .submit(Query::remote("revenue by region"))
        .await
        .unwrap()
        .payload;

    assert_eq!(payload.title, "Regional Revenue");
    assert_eq!(payload.categories(), ["North", "South"]);
    assert_eq!(payload.values(), [420.0, 310.0]);
    assert_eq!(payload.metrics["Regions"], "2");
    assert_eq!(payload.summary, "Revenue by region");
    assert_eq!(payload.insights[0], "North leads");
    assert_eq!(payload.table.rows.len(), 2);
}

#[tokio::test]
async fn test_remote_malformed_answer_is_placeholder() {
    let dispatcher = memory_dispatcher("```json\n{\"type\": \"combined\", \"data\": {");

    let submission = dispatcher
        .submit(Query::remote("revenue by region"))
        .await
        .unwrap();

    assert!(submission.payload.is_placeholder());
    assert_eq!(dispatcher.history()[0].status, QueryStatus::Completed);
    assert!(dispatcher.last_error().is_none());
}

#[tokio::test]
async fn test_blank_query_leaves_no_trace() {
    let dispatcher = memory_dispatcher(COMBINED_ANSWER);

    for mode in [QueryMode::Local, QueryMode::Remote] {
        let err = dispatcher.submit(Query::new(" \t ", mode)).await.unwrap_err();
        assert_eq!(err, DispatchError::InvalidQuery);
    }
    assert!(dispatcher.history().is_empty());
    assert!(dispatcher.current_result().is_none());
}

#[tokio::test]
async fn test_history_survives_restart() {
    let temp = tempfile::TempDir::new().unwrap();
    let backend = Arc::new(FileStore::new(temp.path()));

    let dispatcher = dispatcher_with(backend.clone(), COMBINED_ANSWER);
    dispatcher.submit(Query::local("check stock")).await.unwrap();
    dispatcher.submit(Query::remote("regional revenue")).await.unwrap();
    drop(dispatcher);

    let reloaded = HistoryStore::load(backend);
    let texts: Vec<&str> = reloaded.list().iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, ["regional revenue", "check stock"]);
    assert!(reloaded
        .list()
        .iter()
        .all(|e| e.status == QueryStatus::Completed));
}
