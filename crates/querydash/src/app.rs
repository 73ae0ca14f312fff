use anyhow::Context;
use querydash_core::{Config, Dispatcher, LocalResolver};
use querydash_remote::RemoteResolver;
use querydash_storage::{load_mode, FileStore, HistoryStore, KeyValueStore, Paths, QueryMode};
use std::sync::Arc;

/// Everything a command needs: where state lives and how to reach the API
pub struct App {
    pub paths: Paths,
    pub config: Config,
    store: Arc<dyn KeyValueStore>,
}

impl App {
    pub fn open() -> anyhow::Result<Self> {
        let paths = Paths::new().context("failed to resolve data directory")?;
        Ok(Self::with_parts(paths, Config::from_env()))
    }

    pub fn with_parts(paths: Paths, config: Config) -> Self {
        let store = Arc::new(FileStore::new(paths.store_dir()));
        Self {
            paths,
            config,
            store,
        }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn history(&self) -> HistoryStore {
        HistoryStore::load(self.store.clone())
    }

    pub fn mode(&self) -> QueryMode {
        load_mode(self.store())
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(
            Arc::new(LocalResolver::from_config(&self.config)),
            Arc::new(RemoteResolver::from_config(&self.config)),
            self.history(),
        )
    }
}

/// Single-threaded runtime for one command invocation
pub fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}

#[cfg(test)]
pub(crate) fn test_app(home: &std::path::Path) -> App {
    let mut config = Config::new();
    config.local_delay = std::time::Duration::ZERO;
    App::with_parts(Paths::with_home(home.to_path_buf()), config)
}
