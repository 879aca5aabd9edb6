//! Event store persisted as a JSON file.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use super::store::{EventStore, InMemoryEventStore, StoreError};
use crate::models::event::{Event, EventId};

const EVENTS_FILE: &str = "events.json";

/// [`InMemoryEventStore`] that rewrites its file after every accepted change.
pub struct JsonEventStore {
    path: PathBuf,
    inner: InMemoryEventStore,
}

impl JsonEventStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let events: Vec<Event> = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read events file {:?}", path))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse events file {:?}", path))?
        } else {
            Vec::new()
        };

        log::info!("Opened event store {:?} with {} events", path, events.len());
        Ok(Self {
            path,
            inner: InMemoryEventStore::with_events(events),
        })
    }

    /// Path in the platform data directory
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "chronos", "chronos-calendar")
            .context("Could not determine data directory")?;
        Ok(dirs.data_dir().join(EVENTS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn events(&self) -> Vec<Event> {
        self.inner.events()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.events().is_empty()
    }

    /// Replace the contents with `events` and write them out.
    pub fn seed(&mut self, events: Vec<Event>) -> Result<()> {
        let previous = std::mem::replace(&mut self.inner, InMemoryEventStore::with_events(events));
        if let Err(err) = self.save() {
            self.inner = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Run `change` against the in-memory copy and write it out.
    ///
    /// A failed write restores the previous contents so memory and file agree.
    fn apply<T>(
        &mut self,
        change: impl FnOnce(&mut InMemoryEventStore) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let snapshot = self.inner.clone();
        let value = change(&mut self.inner)?;

        if let Err(err) = self.save() {
            log::error!("Reverting unsaved change: {:#}", err);
            self.inner = snapshot;
            return Err(err.into());
        }
        Ok(value)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(&self.inner.events()).context("Failed to serialize events")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write events file {:?}", self.path))?;

        log::debug!("Saved events to {:?}", self.path);
        Ok(())
    }
}

impl EventStore for JsonEventStore {
    fn create_event(&mut self, draft: &Event) -> Result<Option<Event>, StoreError> {
        self.apply(|store| store.create_event(draft))
    }

    fn update_event(&mut self, event: &Event) -> Result<Option<Event>, StoreError> {
        self.apply(|store| store.update_event(event))
    }

    fn delete_event(&mut self, id: EventId) -> Result<(), StoreError> {
        self.apply(|store| store.delete_event(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::event::EventCollection;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn lunch() -> Event {
        let start = NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Event::new("Lunch", start, start + chrono::Duration::hours(1)).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = JsonEventStore::open(dir.path().join("events.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_changes_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("events.json");

        let mut store = JsonEventStore::open(&path).unwrap();
        let created = store.create_event(&lunch()).unwrap().unwrap();
        let moved = created.shifted_by_days(1);
        store.update_event(&moved).unwrap();

        let reopened = JsonEventStore::open(&path).unwrap();
        assert_eq!(reopened.events(), vec![moved.clone()]);

        let mut reopened = reopened;
        reopened.delete_event(moved.id).unwrap();
        assert!(JsonEventStore::open(&path).unwrap().is_empty());
    }

    #[test]
    fn test_rejected_change_is_not_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.json");
        let mut store = JsonEventStore::open(&path).unwrap();

        let err = store.update_event(&lunch()).unwrap_err();
        assert!(matches!(err, StoreError::NotPersisted(EventId::Draft)));
        assert!(!path.exists());
    }

    /// Store whose data directory cannot be created because a file is in the way
    fn unwritable_store(dir: &TempDir) -> JsonEventStore {
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        JsonEventStore::open(blocker.join("events.json")).unwrap()
    }

    #[test]
    fn test_failed_write_reverts_store() {
        let dir = TempDir::new().unwrap();
        let mut store = unwritable_store(&dir);

        let err = store.create_event(&lunch()).unwrap_err();
        assert!(matches!(err, StoreError::Other(_)));
        assert!(store.is_empty());

        assert!(store.seed(vec![lunch()]).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_write_rolls_back_collection_and_store() {
        let dir = TempDir::new().unwrap();
        let mut store = unwritable_store(&dir);
        let mut collection = EventCollection::new(Vec::new());

        assert!(collection.create(&lunch(), &mut store).is_err());

        assert!(collection.events().is_empty());
        assert_eq!(store.events().len(), 0);
    }

    #[test]
    fn test_failed_update_keeps_previous_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.json");
        let mut store = JsonEventStore::open(&path).unwrap();
        let created = store.create_event(&lunch()).unwrap().unwrap();

        // Replace the file with a directory so the next write fails
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(store.update_event(&created.shifted_by_days(1)).is_err());
        assert_eq!(store.events(), vec![created]);
    }

    #[test]
    fn test_seed_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.json");
        let mut store = JsonEventStore::open(&path).unwrap();

        store.seed(vec![lunch()]).unwrap();
        let reopened = JsonEventStore::open(&path).unwrap();
        assert_eq!(reopened.events().len(), 1);
        assert_eq!(reopened.events()[0].id, EventId::Persisted(1));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.json");
        fs::write(&path, "not json").unwrap();

        assert!(JsonEventStore::open(&path).is_err());
    }
}
