//! Locally owned event list with optimistic mutations.
//!
//! Every change is described by a [`Mutation`] and applied with the pure
//! reducer [`apply_mutation`]: once speculatively before the store is asked,
//! and the store's answer then either confirms the change or restores the
//! snapshot taken beforehand.

use chrono::{NaiveDate, NaiveDateTime};

use super::queries::{events_for_day, events_for_range};
use super::store::{EventStore, StoreError};
use crate::models::event::{Event, EventId};
use crate::services::layout::PositionedEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create(Event),
    Update(Event),
    Delete(EventId),
}

impl Mutation {
    fn describe(&self) -> String {
        match self {
            Mutation::Create(event) => format!("create event \"{}\"", event.title),
            Mutation::Update(event) => format!("update event {}", event.id),
            Mutation::Delete(id) => format!("delete event {}", id),
        }
    }
}

/// Apply `mutation` to `events`, returning the new list.
///
/// Updates and deletes of unknown ids leave the list unchanged.
pub fn apply_mutation(events: &[Event], mutation: &Mutation) -> Vec<Event> {
    match mutation {
        Mutation::Create(event) => {
            let mut next = events.to_vec();
            next.push(event.clone());
            next
        }
        Mutation::Update(updated) => events
            .iter()
            .map(|event| {
                if event.id == updated.id {
                    updated.clone()
                } else {
                    event.clone()
                }
            })
            .collect(),
        Mutation::Delete(id) => events.iter().filter(|e| e.id != *id).cloned().collect(),
    }
}

/// The canonical event list of a calendar view.
#[derive(Debug, Default)]
pub struct EventCollection {
    events: Vec<Event>,
    next_pending: u64,
}

impl EventCollection {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events,
            next_pending: 0,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn day(&self, day: NaiveDate, preview: Option<&Event>) -> Vec<PositionedEvent> {
        events_for_day(&self.events, day, preview)
    }

    pub fn range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<PositionedEvent> {
        events_for_range(&self.events, start, end)
    }

    /// Create `draft`, showing it immediately under a pending id.
    pub fn create(
        &mut self,
        draft: &Event,
        store: &mut dyn EventStore,
    ) -> Result<Event, StoreError> {
        self.next_pending += 1;
        let mut pending = draft.clone();
        pending.id = EventId::Pending(self.next_pending);

        let created = self.commit(Mutation::Create(pending.clone()), store, |store| {
            store.create_event(draft)
        })?;

        // Swap the pending placeholder for the store's copy
        let confirmed = created.unwrap_or(pending.clone());
        if confirmed.id != pending.id {
            self.events = apply_mutation(&self.events, &Mutation::Delete(pending.id));
            self.events = apply_mutation(&self.events, &Mutation::Create(confirmed.clone()));
        }
        Ok(confirmed)
    }

    pub fn update(&mut self, event: &Event, store: &mut dyn EventStore) -> Result<Event, StoreError> {
        let canonical = self.commit(Mutation::Update(event.clone()), store, |store| {
            store.update_event(event)
        })?;

        match canonical {
            Some(canonical) if canonical != *event => {
                self.events = apply_mutation(&self.events, &Mutation::Update(canonical.clone()));
                Ok(canonical)
            }
            _ => Ok(event.clone()),
        }
    }

    pub fn delete(&mut self, id: EventId, store: &mut dyn EventStore) -> Result<(), StoreError> {
        self.commit(Mutation::Delete(id), store, |store| store.delete_event(id))
    }

    /// Speculatively apply `mutation`, then confirm or revert based on `call`.
    fn commit<T>(
        &mut self,
        mutation: Mutation,
        store: &mut dyn EventStore,
        call: impl FnOnce(&mut dyn EventStore) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let snapshot = self.events.clone();
        self.events = apply_mutation(&snapshot, &mutation);

        match call(store) {
            Ok(value) => Ok(value),
            Err(err) => {
                log::error!("Failed to {}: {}", mutation.describe(), err);
                self.events = snapshot;
                Err(err)
            }
        }
    }
}
