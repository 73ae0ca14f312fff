//! Durable client-side state: data paths, key-value backends and query history

mod history;
mod io;
mod kv;
mod mode;
mod paths;
mod types;

pub use history::{HistoryStore, HISTORY_CAP, HISTORY_KEY};
pub use io::{atomic_write, read_optional};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use mode::{load_mode, save_mode, MODE_KEY};
pub use paths::Paths;
pub use types::{EntryKey, HistoryEntry, ParseModeError, QueryMode, QueryStatus};
