//! Persistence boundary for events.
//!
//! The calendar core never talks to a backend directly. Callers inject an
//! [`EventStore`]; [`super::collection::EventCollection`] applies changes
//! optimistically and reverts them when the store rejects.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::event::{Event, EventId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("event {0} not found")]
    NotFound(EventId),
    #[error("event {0} has not been persisted")]
    NotPersisted(EventId),
    #[error("store rejected the change: {0}")]
    Rejected(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Backend that owns the canonical copy of events.
///
/// Returning `Ok(None)` from create or update means the store accepted the
/// change without returning a canonical copy.
#[cfg_attr(test, mockall::automock)]
pub trait EventStore {
    fn create_event(&mut self, draft: &Event) -> Result<Option<Event>, StoreError>;
    fn update_event(&mut self, event: &Event) -> Result<Option<Event>, StoreError>;
    fn delete_event(&mut self, id: EventId) -> Result<(), StoreError>;
}

/// Event store kept in memory, assigning sequential ids.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    events: BTreeMap<i64, Event>,
    next_id: i64,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with events; events without a persisted id receive one.
    ///
    /// When two events share a persisted id the first one is kept.
    pub fn with_events(events: impl IntoIterator<Item = Event>) -> Self {
        let mut store = Self::new();
        for mut event in events {
            let id = match event.id {
                EventId::Persisted(id) => id,
                _ => store.allocate_id(),
            };
            if store.events.contains_key(&id) {
                log::warn!("Skipping \"{}\": event id {} is already taken", event.title, id);
                continue;
            }
            store.next_id = store.next_id.max(id);
            event.id = EventId::Persisted(id);
            store.events.insert(id, event);
        }
        store
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.values().cloned().collect()
    }

    pub fn get(&self, id: i64) -> Option<&Event> {
        self.events.get(&id)
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

impl EventStore for InMemoryEventStore {
    fn create_event(&mut self, draft: &Event) -> Result<Option<Event>, StoreError> {
        draft
            .validate()
            .map_err(|e| StoreError::Rejected(e.to_string()))?;

        let id = self.allocate_id();
        let mut event = draft.clone();
        event.id = EventId::Persisted(id);
        self.events.insert(id, event.clone());

        log::debug!("Created event {} \"{}\"", id, event.title);
        Ok(Some(event))
    }

    fn update_event(&mut self, event: &Event) -> Result<Option<Event>, StoreError> {
        let id = event.id.persisted().ok_or(StoreError::NotPersisted(event.id))?;
        event
            .validate()
            .map_err(|e| StoreError::Rejected(e.to_string()))?;

        let slot = self
            .events
            .get_mut(&id)
            .ok_or(StoreError::NotFound(event.id))?;
        *slot = event.clone();

        Ok(Some(event.clone()))
    }

    fn delete_event(&mut self, id: EventId) -> Result<(), StoreError> {
        let key = id.persisted().ok_or(StoreError::NotPersisted(id))?;
        self.events
            .remove(&key)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
