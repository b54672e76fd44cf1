//! Persistence for trip records.
//!
//! The whole list lives as one JSON array under [`STORAGE_KEY`] in a
//! [`SlotStorage`]. Every operation reads the full list, changes it in memory,
//! and writes it back. That is fine for one person's trip history and nothing
//! larger.
//!
//! Two flavours of each operation exist:
//!
//! - `list`, `save`, `update`, ... never fail. Unavailable storage and
//!   malformed content read as an empty list; write failures leave the list as
//!   it was. Errors are logged and swallowed.
//! - `try_list`, `try_save`, `try_update`, ... return [`StoreError`] so a
//!   caller can tell "no trips" from "storage broken".
//!
//! Writers sharing one `TripStore` (and its clones) are serialized, so
//! concurrent requests in one server never lose each other's changes. Two
//! processes writing the same slot at once can still lose one write. There is
//! no locking across processes.

mod file;
mod sqlite;
mod storage;

use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

pub use file::FileStorage;
pub use sqlite::SqliteStorage;
pub use storage::{MemoryStorage, SlotStorage, StorageError, UnavailableStorage};

use crate::models::TripRecord;

/// Slot holding the serialized trip list.
pub const STORAGE_KEY: &str = "go_saved_trips";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("stored trips are malformed: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("failed to serialize trips: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Trip not found: {0}")]
    NotFound(String),

    #[error("Trip already exists: {0}")]
    DuplicateId(String),

    #[error("rating must be between 0 and 5, got {0}")]
    InvalidRating(u8),
}

/// Trip record store over an injected slot storage.
#[derive(Clone)]
pub struct TripStore {
    storage: Arc<dyn SlotStorage>,
    write_lock: Arc<Mutex<()>>,
}

impl TripStore {
    pub fn new(storage: impl SlotStorage + 'static) -> Self {
        Self::from_arc(Arc::new(storage))
    }

    pub fn from_arc(storage: Arc<dyn SlotStorage>) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// A store backed by process memory.
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    // ============================================================
    // Fail-silent operations
    // ============================================================

    /// All trips, newest first. Empty when nothing is stored or storage is broken.
    pub fn list(&self) -> Vec<TripRecord> {
        self.try_list().unwrap_or_else(|e| {
            tracing::warn!("Reading trips failed, treating as empty: {}", e);
            Vec::new()
        })
    }

    /// First trip with `id`, if any.
    pub fn get_by_id(&self, id: &str) -> Option<TripRecord> {
        self.list().into_iter().find(|t| t.id == id)
    }

    /// Prepend `record` and persist. Returns the list as it now stands.
    pub fn save(&self, record: TripRecord) -> Vec<TripRecord> {
        self.silently(self.try_save(record))
    }

    /// Replace the trip with the same id, keeping its position.
    pub fn update(&self, record: TripRecord) -> Vec<TripRecord> {
        self.silently(self.try_update(record))
    }

    /// Remove every trip with `id`.
    pub fn delete(&self, id: &str) -> Vec<TripRecord> {
        self.silently(self.try_delete(id))
    }

    /// Drop the storage slot entirely.
    pub fn clear(&self) {
        if let Err(e) = self.try_clear() {
            tracing::warn!("Clearing trips failed: {}", e);
        }
    }

    /// Set or clear the trip-level note. `None` when the trip does not exist.
    pub fn set_notes(&self, id: &str, notes: Option<String>) -> Option<TripRecord> {
        self.try_set_notes(id, notes).map_err(log_annotation).ok()
    }

    pub fn set_place_note(&self, id: &str, place_id: &str, note: &str) -> Option<TripRecord> {
        self.try_set_place_note(id, place_id, note)
            .map_err(log_annotation)
            .ok()
    }

    pub fn set_place_rating(&self, id: &str, place_id: &str, rating: u8) -> Option<TripRecord> {
        self.try_set_place_rating(id, place_id, rating)
            .map_err(log_annotation)
            .ok()
    }

    fn silently(&self, result: Result<Vec<TripRecord>, StoreError>) -> Vec<TripRecord> {
        match result {
            Ok(trips) => trips,
            Err(e) => {
                tracing::warn!("Trip write skipped: {}", e);
                self.list()
            }
        }
    }

    // ============================================================
    // Strict operations
    // ============================================================

    /// All trips, with derived budget fields recomputed.
    pub fn try_list(&self) -> Result<Vec<TripRecord>, StoreError> {
        let Some(raw) = self.storage.get_item(STORAGE_KEY)? else {
            return Ok(Vec::new());
        };
        let mut trips: Vec<TripRecord> =
            serde_json::from_str(&raw).map_err(StoreError::Malformed)?;
        for trip in &mut trips {
            trip.refresh_totals();
        }
        Ok(trips)
    }

    pub fn try_get(&self, id: &str) -> Result<TripRecord, StoreError> {
        self.try_list()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Prepend `record`. Fails with [`StoreError::DuplicateId`] if its id is taken.
    pub fn try_save(&self, mut record: TripRecord) -> Result<Vec<TripRecord>, StoreError> {
        let _guard = self.lock_writes();
        let mut trips = self.load_for_write()?;
        if trips.iter().any(|t| t.id == record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }

        record.refresh_totals();
        tracing::debug!("Saving trip {} to {}", record.id, record.destination);
        trips.insert(0, record);
        self.write(&trips)?;
        Ok(trips)
    }

    /// Replace the trip with `record.id` in place. Fails with
    /// [`StoreError::NotFound`], writing nothing, when there is no such trip.
    pub fn try_update(&self, record: TripRecord) -> Result<Vec<TripRecord>, StoreError> {
        let _guard = self.lock_writes();
        self.replace(record)
    }

    /// Remove every trip with `id`. Removing nothing is not an error.
    pub fn try_delete(&self, id: &str) -> Result<Vec<TripRecord>, StoreError> {
        let _guard = self.lock_writes();
        let mut trips = self.load_for_write()?;
        let before = trips.len();
        trips.retain(|t| t.id != id);
        tracing::debug!("Deleted {} trip(s) with id {}", before - trips.len(), id);
        self.write(&trips)?;
        Ok(trips)
    }

    pub fn try_clear(&self) -> Result<(), StoreError> {
        let _guard = self.lock_writes();
        self.storage.remove_item(STORAGE_KEY)?;
        Ok(())
    }

    pub fn try_set_notes(&self, id: &str, notes: Option<String>) -> Result<TripRecord, StoreError> {
        self.modify(id, |trip| {
            trip.set_notes(notes);
            Ok(())
        })
    }

    pub fn try_set_place_note(
        &self,
        id: &str,
        place_id: &str,
        note: &str,
    ) -> Result<TripRecord, StoreError> {
        self.modify(id, |trip| {
            trip.set_place_note(place_id, note);
            Ok(())
        })
    }

    /// Rate one activity of a trip. 0 removes the rating.
    pub fn try_set_place_rating(
        &self,
        id: &str,
        place_id: &str,
        rating: u8,
    ) -> Result<TripRecord, StoreError> {
        self.modify(id, |trip| {
            if trip.set_place_rating(place_id, rating) {
                Ok(())
            } else {
                Err(StoreError::InvalidRating(rating))
            }
        })
    }

    fn modify(
        &self,
        id: &str,
        change: impl FnOnce(&mut TripRecord) -> Result<(), StoreError>,
    ) -> Result<TripRecord, StoreError> {
        let _guard = self.lock_writes();
        let mut trip = self.try_get(id)?;
        change(&mut trip)?;
        self.replace(trip.clone())?;
        Ok(trip)
    }

    /// Replace the trip with `record.id` in place. Callers hold the write lock.
    fn replace(&self, mut record: TripRecord) -> Result<Vec<TripRecord>, StoreError> {
        let mut trips = self.load_for_write()?;
        let slot = trips
            .iter_mut()
            .find(|t| t.id == record.id)
            .ok_or_else(|| StoreError::NotFound(record.id.clone()))?;

        record.refresh_totals();
        *slot = record;
        self.write(&trips)?;
        Ok(trips)
    }

    /// Serializes read-modify-write cycles across clones of this store.
    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().expect("store lock poisoned")
    }

    /// Current list for a read-modify-write. A malformed slot counts as empty
    /// so the write replaces it; it is the only readable data left.
    fn load_for_write(&self) -> Result<Vec<TripRecord>, StoreError> {
        match self.try_list() {
            Err(StoreError::Malformed(e)) => {
                tracing::warn!("Overwriting malformed trip list: {}", e);
                Ok(Vec::new())
            }
            other => other,
        }
    }

    fn write(&self, trips: &[TripRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string(trips).map_err(StoreError::Serialize)?;
        self.storage.set_item(STORAGE_KEY, &json)?;
        Ok(())
    }
}

fn log_annotation(e: StoreError) -> StoreError {
    match &e {
        StoreError::NotFound(id) => tracing::debug!("Trip {} not found", id),
        other => tracing::warn!("Trip annotation skipped: {}", other),
    }
    e
}
