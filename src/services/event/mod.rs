//! Calendar event services: selection queries, the persistence boundary and
//! the optimistic local collection.

pub mod collection;
pub mod json_store;
pub mod queries;
pub mod store;

pub use collection::{apply_mutation, EventCollection, Mutation};
pub use queries::{day_range, events_for_day, events_for_range};
pub use json_store::JsonEventStore;
pub use store::{EventStore, InMemoryEventStore, StoreError};
