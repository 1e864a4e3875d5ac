use chrono::NaiveDate;
use slotmap::{SlotMap, new_key_type};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::domain::id::{ReservationId, ResourceId};
use crate::domain::reservation::{Reservation, ReservationPatch};
use crate::error::{Error, Result};
use crate::loader::parser::parse_json_file;

/// Persistence collaborator for reservation records.
///
/// The scheduler and service only read via `list`/`get` and write via
/// `append`/`update`; the storage format is the store's own business.
/// Records are never physically deleted (soft-cancel via `update`).
pub trait ReservationStore: std::fmt::Debug + Send + Sync {
    /// Lists reservations, optionally filtered by resource and/or date.
    fn list(&self, resource_id: Option<&ResourceId>, date: Option<NaiveDate>) -> Result<Vec<Reservation>>;

    /// Fetches one reservation by id.
    fn get(&self, id: ReservationId) -> Result<Option<Reservation>>;

    /// Durably records a new reservation. Must not return before the record
    /// is recoverable; the service reports `Confirmed` only after this call.
    fn append(&self, reservation: Reservation) -> Result<()>;

    /// Applies a partial update to an existing reservation.
    fn update(&self, id: ReservationId, patch: ReservationPatch) -> Result<()>;
}

new_key_type! {
    pub struct StoreKey;
}

#[derive(Debug)]
struct StoreInner {
    /// Reservation storage.
    slots: SlotMap<StoreKey, Reservation>,

    /// Index lookup of the internal key (StoreKey) by reservation id.
    id_index: HashMap<ReservationId, StoreKey>,
}

impl StoreInner {
    fn empty() -> Self {
        StoreInner { slots: SlotMap::with_key(), id_index: HashMap::new() }
    }
}

/// In-memory reservation store.
///
/// Both maps are protected with a single lock, so every `list` observes a
/// complete snapshot and every write is atomic with its index update.
#[derive(Debug, Clone)]
pub struct InMemoryReservationStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(StoreInner::empty())) }
    }

    pub fn with_reservations(reservations: Vec<Reservation>) -> Self {
        let store = Self::new();

        {
            let mut guard = store.inner.write().expect("RwLock poisoned");
            for reservation in reservations {
                let id = reservation.id;
                let key = guard.slots.insert(reservation);
                guard.id_index.insert(id, key);
            }
        }

        store
    }

    fn snapshot(&self) -> Vec<Reservation> {
        let guard = self.inner.read().expect("RwLock poisoned");
        guard.slots.values().cloned().collect()
    }

    /// Drops a record again. Not part of the store trait (records are never
    /// deleted through the public API); used only to roll a cache back after
    /// a failed persist.
    fn remove(&self, id: ReservationId) -> Option<Reservation> {
        let mut guard = self.inner.write().expect("RwLock poisoned");
        let key = guard.id_index.remove(&id)?;
        guard.slots.remove(key)
    }
}

impl Default for InMemoryReservationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationStore for InMemoryReservationStore {
    fn list(&self, resource_id: Option<&ResourceId>, date: Option<NaiveDate>) -> Result<Vec<Reservation>> {
        let mut reservations: Vec<Reservation> = self
            .snapshot()
            .into_iter()
            .filter(|reservation| resource_id.map_or(true, |id| reservation.resource_id == *id))
            .filter(|reservation| date.map_or(true, |d| reservation.date == d))
            .collect();

        reservations.sort_by_key(|reservation| (reservation.date, reservation.start_minutes));

        Ok(reservations)
    }

    fn get(&self, id: ReservationId) -> Result<Option<Reservation>> {
        let guard = self.inner.read().expect("RwLock poisoned");
        let key = match guard.id_index.get(&id) {
            Some(key) => *key,
            None => return Ok(None),
        };

        Ok(guard.slots.get(key).cloned())
    }

    fn append(&self, reservation: Reservation) -> Result<()> {
        let mut guard = self.inner.write().expect("RwLock poisoned");

        if guard.id_index.contains_key(&reservation.id) {
            return Err(Error::StoreInconsistency(format!("Reservation id {} already exists.", reservation.id)));
        }

        let id = reservation.id;
        let key = guard.slots.insert(reservation);
        guard.id_index.insert(id, key);

        Ok(())
    }

    fn update(&self, id: ReservationId, patch: ReservationPatch) -> Result<()> {
        let mut guard = self.inner.write().expect("RwLock poisoned");

        let key = *guard.id_index.get(&id).ok_or_else(|| Error::StoreInconsistency(format!("Update of unknown reservation id {}.", id)))?;

        match guard.slots.get_mut(key) {
            Some(reservation) => {
                patch.apply(reservation);
                Ok(())
            }
            None => Err(Error::StoreInconsistency(format!("Index points at a vacated slot for reservation id {}.", id))),
        }
    }
}

/// Durable store backed by a single JSON file.
///
/// The full reservation list is loaded at startup and rewritten after every
/// mutation, before the mutating call returns. Write volume is tiny (one
/// record per user action), so rewriting the file keeps recovery trivial.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    cache: InMemoryReservationStore,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let reservations: Vec<Reservation> = if path.exists() {
            parse_json_file(path.to_str().ok_or_else(|| Error::ConfigError(format!("Store path {:?} is not valid UTF-8.", path)))?)?
        } else {
            Vec::new()
        };

        log::info!("Loaded {} reservation(s) from '{}'.", reservations.len(), path.display());

        Ok(JsonFileStore { path, cache: InMemoryReservationStore::with_reservations(reservations) })
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if parent != Path::new("") {
                fs::create_dir_all(parent)?;
            }
        }

        let reservations = self.cache.list(None, None)?;
        let json = serde_json::to_string_pretty(&reservations)?;

        // Write-then-rename: a crash mid-write must never leave a truncated
        // store file behind
        let scratch = self.path.with_extension("json.tmp");
        fs::write(&scratch, json)?;

        if let Err(err) = fs::rename(&scratch, &self.path) {
            let _ = fs::remove_file(&scratch);
            return Err(err.into());
        }

        Ok(())
    }
}

impl ReservationStore for JsonFileStore {
    fn list(&self, resource_id: Option<&ResourceId>, date: Option<NaiveDate>) -> Result<Vec<Reservation>> {
        self.cache.list(resource_id, date)
    }

    fn get(&self, id: ReservationId) -> Result<Option<Reservation>> {
        self.cache.get(id)
    }

    fn append(&self, reservation: Reservation) -> Result<()> {
        let id = reservation.id;
        self.cache.append(reservation)?;

        if let Err(err) = self.persist() {
            // The cache must not block a slot that never became durable
            self.cache.remove(id);
            return Err(err);
        }

        Ok(())
    }

    fn update(&self, id: ReservationId, patch: ReservationPatch) -> Result<()> {
        let previous = self.cache.get(id)?.ok_or_else(|| Error::StoreInconsistency(format!("Update of unknown reservation id {}.", id)))?;

        self.cache.update(id, patch)?;

        if let Err(err) = self.persist() {
            let _ = self.cache.update(id, ReservationPatch::set_status(previous.status));
            return Err(err);
        }

        Ok(())
    }
}
