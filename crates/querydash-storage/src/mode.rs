//! Last-used query mode

use crate::kv::KeyValueStore;
use crate::types::QueryMode;

/// Storage key holding the last-used mode
pub const MODE_KEY: &str = "query_mode";

/// Last-used mode, `local` when unset or unreadable
pub fn load_mode(backend: &dyn KeyValueStore) -> QueryMode {
    match backend.get(MODE_KEY) {
        // bare `local`/`ai` strings are accepted as well as JSON
        Ok(Some(raw)) => serde_json::from_str(&raw)
            .or_else(|_| raw.parse::<QueryMode>())
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "stored query mode is unreadable, using local");
                QueryMode::Local
            }),
        Ok(None) => QueryMode::Local,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read stored query mode, using local");
            QueryMode::Local
        }
    }
}

pub fn save_mode(backend: &dyn KeyValueStore, mode: QueryMode) -> anyhow::Result<()> {
    backend.set(MODE_KEY, &serde_json::to_string(&mode)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    #[test]
    fn test_default_mode_is_local() {
        let store = MemoryStore::new();
        assert_eq!(load_mode(&store), QueryMode::Local);
    }

    #[test]
    fn test_mode_roundtrip() {
        let store = MemoryStore::new();
        save_mode(&store, QueryMode::Remote).unwrap();
        assert_eq!(load_mode(&store), QueryMode::Remote);
    }

    #[test]
    fn test_foreign_value_falls_back() {
        let store = MemoryStore::new();
        store.set(MODE_KEY, "\"quantum\"").unwrap();
        assert_eq!(load_mode(&store), QueryMode::Local);
    }

    #[test]
    fn test_bare_string_value() {
        let store = MemoryStore::new();
        store.set(MODE_KEY, "ai").unwrap();
        assert_eq!(load_mode(&store), QueryMode::Remote);
    }
}
