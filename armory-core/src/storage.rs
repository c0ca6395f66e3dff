//! Key-value persistence contract.
//!
//! The tracker only needs "read text for key" and "write text for key".
//! Values are JSON documents; [`load_or_default`] and [`save`] handle the
//! encoding so store implementations stay dumb.
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage error: {0}")]
    Backend(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Platform-specific key-value store.
pub trait KeyValueStore {
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode a value, falling back to `T::default()` when it is absent
/// or unreadable.
pub fn load_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    match store.read(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            log::warn!("ignoring unreadable value for '{key}': {err}");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(err) => {
            log::warn!("could not read '{key}': {err}");
            T::default()
        }
    }
}

/// Records read from a stored JSON array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedRecords<T> {
    pub records: Vec<T>,
    /// Entries that did not decode. The whole value counts as one when it is
    /// not an array at all.
    pub skipped: usize,
    /// Stored text, kept whenever something was skipped.
    pub raw: Option<String>,
}

impl<T> Default for LoadedRecords<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
            raw: None,
        }
    }
}

/// Read a JSON array and decode it record by record.
///
/// A record that fails to decode is skipped with a warning; the others are
/// still returned.
pub fn load_records<T, S>(store: &S, key: &str) -> LoadedRecords<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return LoadedRecords::default(),
        Err(err) => {
            log::warn!("could not read '{key}': {err}");
            return LoadedRecords::default();
        }
    };
    let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("ignoring unreadable value for '{key}': {err}");
            return LoadedRecords {
                records: Vec::new(),
                skipped: 1,
                raw: Some(raw),
            };
        }
    };

    let mut loaded = LoadedRecords::default();
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value(entry) {
            Ok(record) => loaded.records.push(record),
            Err(err) => {
                log::warn!("skipping record {index} of '{key}': {err}");
                loaded.skipped += 1;
            }
        }
    }
    if loaded.skipped > 0 {
        loaded.raw = Some(raw);
    }
    loaded
}

/// Encode and write a value.
///
/// # Errors
///
/// Returns an error if encoding fails or the store rejects the write.
pub fn save<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.write(key, &raw)
}

/// In-process store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw JSON values.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        store.entries.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
        store
    }

    /// Raw stored text for a key.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Make every subsequent write and removal fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            Err(StorageError::Backend("quota exceeded".to_owned()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn missing_and_garbage_values_fall_back_to_default() {
        let store = MemoryStore::with_entries([("broken", "{not json")]);
        let missing: BTreeMap<String, u32> = load_or_default(&store, "absent");
        let broken: BTreeMap<String, u32> = load_or_default(&store, "broken");
        assert!(missing.is_empty());
        assert!(broken.is_empty());
    }

    #[test]
    fn records_decode_independently() {
        let store = MemoryStore::with_entries([("list", r#"[1, "two", 3]"#), ("bad", "{")]);
        let loaded: LoadedRecords<u32> = load_records(&store, "list");
        assert_eq!(loaded.records, vec![1, 3]);
        assert_eq!(loaded.skipped, 1);
        assert_eq!(loaded.raw.as_deref(), Some(r#"[1, "two", 3]"#));

        let broken: LoadedRecords<u32> = load_records(&store, "bad");
        assert!(broken.records.is_empty());
        assert_eq!(broken.skipped, 1);

        let clean: LoadedRecords<u32> =
            load_records(&MemoryStore::with_entries([("ok", "[4]")]), "ok");
        assert_eq!(clean.records, vec![4]);
        assert_eq!(clean.raw, None);
        let absent: LoadedRecords<u32> = load_records(&store, "absent");
        assert_eq!(absent, LoadedRecords::default());
    }

    #[test]
    fn save_then_load_preserves_value() {
        let store = MemoryStore::new();
        let mut value = BTreeMap::new();
        value.insert("Seal".to_string(), 3_u32);
        save(&store, "k", &value).unwrap();
        assert_eq!(store.raw("k").as_deref(), Some(r#"{"Seal":3}"#));
        let loaded: BTreeMap<String, u32> = load_or_default(&store, "k");
        assert_eq!(loaded, value);
    }

    #[test]
    fn failing_writes_surface_backend_errors() {
        let store = MemoryStore::new();
        let shared = store.clone();
        shared.set_fail_writes(true);
        let err = save(&store, "k", &1_u32).unwrap_err();
        assert!(matches!(err, StorageError::Backend(_)));
        assert!(store.raw("k").is_none());
        shared.set_fail_writes(false);
        save(&store, "k", &1_u32).unwrap();
        store.remove("k").unwrap();
        assert!(store.raw("k").is_none());
    }
}
