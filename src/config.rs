//! Runtime settings.
//!
//! Read from environment variables, then overridden by command-line flags:
//! - `TRIP_PLANNER_BACKEND` - `file` (default), `sqlite` or `memory`
//! - `TRIP_PLANNER_DATA_DIR` - Where file and SQLite storage live
//!   (default: the platform data directory)
//! - `TRIP_PLANNER_PORT` - HTTP port for `serve` (default: `17020`)

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::store::{
    FileStorage, MemoryStorage, SlotStorage, SqliteStorage, TripStore, UnavailableStorage,
};

pub const DEFAULT_PORT: u16 = 17020;
const SQLITE_FILE: &str = "trips.db";

/// Which storage adapter backs the trip store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    File,
    Sqlite,
    Memory,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        }
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown backend '{other}' (expected file, sqlite or memory)")),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub backend: Backend,
    /// `None` when no data directory could be determined.
    pub data_dir: Option<PathBuf>,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            data_dir: default_data_dir(),
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through `lookup`. Invalid values fall back to defaults
    /// with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(raw) = lookup("TRIP_PLANNER_BACKEND") {
            match raw.parse() {
                Ok(backend) => settings.backend = backend,
                Err(e) => tracing::warn!("Ignoring TRIP_PLANNER_BACKEND: {}", e),
            }
        }

        if let Some(dir) = lookup("TRIP_PLANNER_DATA_DIR").filter(|d| !d.trim().is_empty()) {
            settings.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(raw) = lookup("TRIP_PLANNER_PORT") {
            match raw.trim().parse() {
                Ok(port) => settings.port = port,
                Err(e) => tracing::warn!("Ignoring TRIP_PLANNER_PORT '{}': {}", raw, e),
            }
        }

        settings
    }

    /// Build the slot storage these settings describe.
    pub fn open_storage(&self) -> Result<Arc<dyn SlotStorage>> {
        let storage: Arc<dyn SlotStorage> = match self.backend {
            Backend::Memory => Arc::new(MemoryStorage::new()),
            Backend::File => {
                let dir = self.require_data_dir()?;
                Arc::new(
                    FileStorage::open(&dir)
                        .with_context(|| format!("Failed to open trip storage in {}", dir.display()))?,
                )
            }
            Backend::Sqlite => {
                let path = self.require_data_dir()?.join(SQLITE_FILE);
                Arc::new(
                    SqliteStorage::open(&path)
                        .with_context(|| format!("Failed to open trip database {}", path.display()))?,
                )
            }
        };
        tracing::debug!("Using {} trip storage", self.backend);
        Ok(storage)
    }

    pub fn open_store(&self) -> Result<TripStore> {
        Ok(TripStore::from_arc(self.open_storage()?))
    }

    /// Like [`Settings::open_store`], but a storage that cannot be opened is
    /// replaced by [`UnavailableStorage`] so every store call degrades to empty.
    pub fn open_store_or_unavailable(&self) -> TripStore {
        self.open_store().unwrap_or_else(|e| {
            tracing::warn!("Trip storage unavailable: {:#}", e);
            TripStore::new(UnavailableStorage)
        })
    }

    fn require_data_dir(&self) -> Result<PathBuf> {
        self.data_dir
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
    }
}

fn default_data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "trip-planner").map(|dirs| dirs.data_dir().to_path_buf())
}
