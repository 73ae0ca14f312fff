#![allow(dead_code)]

use async_trait::async_trait;
use querydash_core::{Dispatcher, LocalResolver, QueryError, Resolver};
use querydash_remote::{RemoteResolver, Transport};
use querydash_storage::{HistoryStore, KeyValueStore, MemoryStore};
use std::sync::Arc;
use std::time::Duration;

/// Transport that always returns the same answer text
pub struct CannedTransport(pub String);

#[async_trait]
impl Transport for CannedTransport {
    async fn generate(&self, _query: &str) -> Result<String, QueryError> {
        Ok(self.0.clone())
    }
}

pub fn local_resolver() -> Arc<dyn Resolver> {
    Arc::new(LocalResolver::new(Duration::ZERO))
}

pub fn canned_remote(answer: &str) -> Arc<dyn Resolver> {
    Arc::new(RemoteResolver::new(Arc::new(CannedTransport(
        answer.to_string(),
    ))))
}

pub fn dispatcher_with(backend: Arc<dyn KeyValueStore>, remote_answer: &str) -> Dispatcher {
    Dispatcher::new(
        local_resolver(),
        canned_remote(remote_answer),
        HistoryStore::load(backend),
    )
}

pub fn memory_dispatcher(remote_answer: &str) -> Dispatcher {
    dispatcher_with(Arc::new(MemoryStore::new()), remote_answer)
}

pub const COMBINED_ANSWER: &str = r#"```json
{
  "type": "combined",
  "data": {
    "charts": [
      {"chartType": "bar", "title": "Regional Revenue", "description": "Revenue by region", "data": [
        {"name": "North", "value": 420}, {"name": "South", "value": 310}
      ]},
      {"chartType": "line", "title": "Trend", "data": [{"name": "Q1", "value": 1}]}
    ],
    "content": {
      "metrics": {"Total Revenue": "$730", "Regions": 2},
      "insights": ["North leads", "South is growing"],
      "table": {"headers": ["Region", "Revenue"], "rows": [["North", 420], ["South", 310]]}
    }
  }
}
```"#;
