//! Journal Store
//!
//! Owns the ordered (newest first) list of memory entries and keeps it in
//! lockstep with the key-value store: every create/delete rewrites the whole
//! serialized collection before returning.

use super::error::{JournalError, JournalResult};
use super::types::{MemoryEntry, NewMemory};
use crate::storage::KeyValueStore;
use chrono::Utc;

/// Storage key holding the serialized collection
pub const MEMORIES_KEY: &str = "memories";

type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

fn wall_clock_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// The memories journal
pub struct Journal<S: KeyValueStore> {
    store: S,
    entries: Vec<MemoryEntry>,
    clock: Clock,
}

impl<S: KeyValueStore> Journal<S> {
    /// Load the persisted collection
    ///
    /// A missing key or a stored JSON `null` yields an empty journal.
    /// Unparseable data is reported as [`JournalError::Corrupt`] rather than
    /// silently discarded.
    pub fn load(store: S) -> JournalResult<Self> {
        let entries = match store.get(MEMORIES_KEY)? {
            None => Vec::new(),
            Some(raw) => serde_json::from_str::<Option<Vec<MemoryEntry>>>(&raw)
                .map_err(|e| JournalError::Corrupt {
                    key: MEMORIES_KEY.to_string(),
                    reason: e.to_string(),
                })?
                .unwrap_or_default(),
        };

        tracing::debug!("Loaded {} memories", entries.len());

        Ok(Self {
            store,
            entries,
            clock: Box::new(wall_clock_millis),
        })
    }

    /// Replace the stored collection with an empty one
    pub fn reset(store: S) -> JournalResult<Self> {
        store.set(MEMORIES_KEY, "[]")?;
        tracing::info!("Journal reset to empty");
        Ok(Self {
            store,
            entries: Vec::new(),
            clock: Box::new(wall_clock_millis),
        })
    }

    /// Use a custom millisecond clock for id generation
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Entries, newest first
    pub fn entries(&self) -> &[MemoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&MemoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Create an entry, prepend it and persist
    pub fn create(&mut self, memory: NewMemory) -> JournalResult<MemoryEntry> {
        if let Some(field) = memory.missing_field() {
            return Err(JournalError::MissingField(field));
        }

        let id = self.next_id();
        let entry = memory.into_entry(id);

        self.entries.insert(0, entry.clone());
        if let Err(e) = self.persist() {
            self.entries.remove(0);
            return Err(e);
        }

        tracing::info!(id, title = %entry.title, "Created memory");
        Ok(entry)
    }

    /// Delete the entry with `id`
    ///
    /// Returns `false` (and writes nothing) when no entry matches.
    pub fn delete(&mut self, id: i64) -> JournalResult<bool> {
        let Some(pos) = self.entries.iter().position(|e| e.id == id) else {
            tracing::debug!(id, "Delete requested for unknown memory");
            return Ok(false);
        };

        let removed = self.entries.remove(pos);
        if let Err(e) = self.persist() {
            self.entries.insert(pos, removed);
            return Err(e);
        }

        tracing::info!(id, "Deleted memory");
        Ok(true)
    }

    /// Ids come from the clock, bumped past the newest id when the clock
    /// repeats or steps backwards
    fn next_id(&self) -> i64 {
        let now = (self.clock)();
        match self.entries.iter().map(|e| e.id).max() {
            Some(newest) if now <= newest => newest + 1,
            _ => now,
        }
    }

    fn persist(&self) -> JournalResult<()> {
        let json = serde_json::to_string(&self.entries)
            .map_err(|e| JournalError::Storage(e.into()))?;
        self.store.set(MEMORIES_KEY, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn ticking_clock(start: i64) -> impl Fn() -> i64 + Send + Sync + 'static {
        let next = Arc::new(AtomicI64::new(start));
        move || next.fetch_add(1, Ordering::SeqCst)
    }

    fn beach() -> NewMemory {
        NewMemory::new("Beach day", "2024-03-05", "Sunset swim with friends")
    }

    #[test]
    fn test_load_empty() {
        let store = MemoryStore::new();
        let journal = Journal::load(&store).unwrap();
        assert!(journal.is_empty());
    }

    #[test]
    fn test_load_null_is_empty() {
        let store = MemoryStore::new();
        store.set(MEMORIES_KEY, "null").unwrap();
        let journal = Journal::load(&store).unwrap();
        assert!(journal.is_empty());
    }

    #[test]
    fn test_load_corrupt() {
        let store = MemoryStore::new();
        store.set(MEMORIES_KEY, "{not json").unwrap();

        let err = Journal::load(&store).err().unwrap();
        assert!(matches!(err, JournalError::Corrupt { ref key, .. } if key == MEMORIES_KEY));
    }

    #[test]
    fn test_reset_recovers_corrupt_store() {
        let store = MemoryStore::new();
        store.set(MEMORIES_KEY, "{not json").unwrap();

        let journal = Journal::reset(&store).unwrap();
        assert!(journal.is_empty());
        assert!(Journal::load(&store).unwrap().is_empty());
    }

    #[test]
    fn test_create_survives_reload_newest_first() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        let mut journal = Journal::load(store.clone())
            .unwrap()
            .with_clock(ticking_clock(1_000));
        journal
            .create(NewMemory::new("First", "2024-01-01", "one"))
            .unwrap();
        let created = journal.create(beach()).unwrap();

        let reloaded = Journal::load(FileStore::open(dir.path()).unwrap()).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.entries()[0], created);
        assert_eq!(reloaded.entries()[1].title, "First");
    }

    #[test]
    fn test_create_rejects_blank_fields() {
        let store = MemoryStore::new();
        let mut journal = Journal::load(&store).unwrap();

        let err = journal
            .create(NewMemory::new("Title", "", "content"))
            .unwrap_err();
        assert!(matches!(err, JournalError::MissingField("date")));
        assert!(journal.is_empty());
        assert_eq!(store.get(MEMORIES_KEY).unwrap(), None);
    }

    #[test]
    fn test_ids_unique_when_clock_repeats() {
        let store = MemoryStore::new();
        let mut journal = Journal::load(&store).unwrap().with_clock(|| 42);

        let a = journal.create(beach()).unwrap();
        let b = journal.create(beach()).unwrap();
        let c = journal.create(beach()).unwrap();

        assert_eq!(a.id, 42);
        assert_eq!(b.id, 43);
        assert_eq!(c.id, 44);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let store = MemoryStore::new();
        let mut journal = Journal::load(&store)
            .unwrap()
            .with_clock(ticking_clock(10));

        let a = journal.create(NewMemory::new("A", "2024-01-01", "a")).unwrap();
        let b = journal.create(NewMemory::new("B", "2024-01-02", "b")).unwrap();
        let c = journal.create(NewMemory::new("C", "2024-01-03", "c")).unwrap();

        assert!(journal.delete(b.id).unwrap());

        let ids: Vec<i64> = journal.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![c.id, a.id]);

        let reloaded = Journal::load(&store).unwrap();
        assert_eq!(reloaded.entries(), journal.entries());
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let store = MemoryStore::new();
        let mut journal = Journal::load(&store).unwrap();
        journal.create(beach()).unwrap();
        let before = store.get(MEMORIES_KEY).unwrap();

        assert!(!journal.delete(-1).unwrap());
        assert_eq!(journal.len(), 1);
        assert_eq!(store.get(MEMORIES_KEY).unwrap(), before);
    }

    #[test]
    fn test_persisted_blob_matches_memory() {
        let store = MemoryStore::new();
        let mut journal = Journal::load(&store)
            .unwrap()
            .with_clock(ticking_clock(5));
        journal.create(beach()).unwrap();

        let raw = store.get(MEMORIES_KEY).unwrap().unwrap();
        assert_eq!(raw, serde_json::to_string(journal.entries()).unwrap());
    }

    #[test]
    fn test_loads_browser_dump() {
        let store = MemoryStore::new();
        store
            .set(
                MEMORIES_KEY,
                r#"[{"id":1709600000000,"title":"Hike","date":"2024-03-05","content":"Ngong hills"}]"#,
            )
            .unwrap();

        let journal = Journal::load(&store).unwrap();
        assert_eq!(journal.get(1709600000000).unwrap().title, "Hike");
    }
}
