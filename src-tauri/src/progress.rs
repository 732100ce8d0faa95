//! Persisted narrative progress.
//!
//! Three booleans describe how far the user has advanced through the
//! experience. They live in memory for the whole session and are written
//! back to the store on every change, so a restart resumes where the user
//! left off. Reads always come from memory; the store is only a mirror.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::marker::PhantomData;
use std::sync::Mutex;

/// Type-safe store key that associates a key name with its value type
#[derive(Debug, Clone, Copy)]
pub struct StoreKey<T> {
    name: &'static str,
    _phantom: PhantomData<T>,
}

impl<T> StoreKey<T> {
    const fn new(name: &'static str) -> Self {
        Self {
            name,
            _phantom: PhantomData,
        }
    }

    pub fn key_name(&self) -> &'static str {
        self.name
    }
}

/// The narrative milestones, persisted across launches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, specta::Type)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressRecord {
    /// The welcome screen has been passed at least once.
    pub has_started: bool,
    /// The candle was blown out.
    pub cake_completed: bool,
    /// The gift quiz was answered correctly.
    pub gift_unlocked: bool,
}

impl StoreKey<ProgressRecord> {
    pub const PROGRESS: Self = Self::new("birthdayProgress");
}

/// A single updatable field of [`ProgressRecord`], for IPC updates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, specta::Type, strum::Display,
)]
#[serde(rename_all = "camelCase")]
pub enum ProgressField {
    HasStarted,
    CakeCompleted,
    GiftUnlocked,
}

impl ProgressRecord {
    fn apply(&mut self, field: ProgressField, value: bool) {
        match field {
            ProgressField::HasStarted => self.has_started = value,
            ProgressField::CakeCompleted => self.cake_completed = value,
            ProgressField::GiftUnlocked => self.gift_unlocked = value,
        }
    }
}

// ===== Type-Safe Progress Store =====

pub trait ProgressStore {
    fn get<T: DeserializeOwned>(&self, key: &StoreKey<T>) -> Option<T>;
    fn set<T: Serialize>(&self, key: &StoreKey<T>, value: T) -> Result<(), String>;
}

/// Store backend that wraps the Tauri plugin store
#[derive(Clone)]
pub struct StoreBackend {
    store: std::sync::Arc<tauri_plugin_store::Store<tauri::Wry>>,
}

impl StoreBackend {
    pub fn new(store: std::sync::Arc<tauri_plugin_store::Store<tauri::Wry>>) -> Self {
        Self { store }
    }
}

impl ProgressStore for StoreBackend {
    fn get<T: DeserializeOwned>(&self, key: &StoreKey<T>) -> Option<T> {
        let value = self.store.get(key.key_name())?;
        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::warn!("Discarding malformed '{}' entry: {}", key.key_name(), e);
                None
            }
        }
    }

    fn set<T: Serialize>(&self, key: &StoreKey<T>, value: T) -> Result<(), String> {
        let val = serde_json::to_value(value).map_err(|e| e.to_string())?;
        self.store.set(key.key_name(), val);
        self.store.save().map_err(|e| e.to_string())?;
        Ok(())
    }
}

// ===== Progress Tracker =====

/// The single in-memory owner of the progress record.
///
/// Created once at startup and shared with every consumer; pages read
/// snapshots and request field updates, never the record itself. Every
/// update re-persists the whole record. A failed write is logged and
/// swallowed - the in-memory record stays authoritative for the session.
pub struct ProgressTracker<S: ProgressStore> {
    record: Mutex<ProgressRecord>,
    store: S,
}

impl<S: ProgressStore> ProgressTracker<S> {
    /// Load stored progress, falling back to all-false on a missing or
    /// malformed entry. Never fails.
    pub fn load(store: S) -> Self {
        let record = store.get(&StoreKey::PROGRESS).unwrap_or_else(|| {
            log::info!("No stored progress, starting fresh");
            ProgressRecord::default()
        });

        Self {
            record: Mutex::new(record),
            store,
        }
    }

    /// Current in-memory record.
    pub fn snapshot(&self) -> ProgressRecord {
        *self.record.lock().unwrap()
    }

    /// Update one field and persist the whole merged record.
    pub fn set(&self, field: ProgressField, value: bool) {
        let merged = {
            let mut record = self.record.lock().unwrap();
            record.apply(field, value);
            *record
        };

        if let Err(e) = self.store.set(&StoreKey::PROGRESS, merged) {
            log::error!("Failed to persist progress ({} = {}): {}", field, value, e);
        }
    }
}

/// The tracker over the real store backend, as managed app state.
pub type Progress = ProgressTracker<StoreBackend>;
