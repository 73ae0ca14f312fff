//! Path resolution for persisted state

use std::path::PathBuf;

/// Environment variable overriding the data directory
pub const HOME_ENV: &str = "QUERYDASH_HOME";

/// Resolves standard paths for querydash state
#[derive(Debug, Clone)]
pub struct Paths {
    pub home: PathBuf,
}

impl Paths {
    /// Resolve the data directory (`$QUERYDASH_HOME` or `~/.querydash`)
    pub fn new() -> std::io::Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_home(PathBuf::from(home)));
        }

        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;

        Ok(Self::with_home(home.join(".querydash")))
    }

    pub fn with_home(home: PathBuf) -> Self {
        Self { home }
    }

    /// Directory holding one file per persisted key
    pub fn store_dir(&self) -> PathBuf {
        self.home.join("store")
    }
}
