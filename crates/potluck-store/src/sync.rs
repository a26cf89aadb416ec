//! Snapshot Ingestion
//!
//! Routes pushes from the realtime database subscription into the store
//! for the one event that is open.

use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;

use crate::error::SnapshotError;
use crate::models::Event;
use crate::patch::EventPatch;
use crate::store::EventStore;

/// A push from the gateway subscription
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    /// Complete event. `null` means the event no longer exists.
    Full(Value),
    /// Any subset of the event's top-level fields
    Partial(Value),
}

#[derive(Clone, Debug)]
pub struct EventSync {
    store: EventStore,
    active: Arc<RwLock<Option<String>>>,
}

impl EventSync {
    pub fn new(store: EventStore) -> Self {
        Self {
            store,
            active: Arc::new(RwLock::new(None)),
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn active_event(&self) -> Option<String> {
        self.active.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Switch to `event_id`. The previous event is dropped before anything
    /// from the new one can arrive.
    pub fn open(&self, event_id: impl Into<String>) {
        let event_id = event_id.into();
        log::info!("Opening event {}", event_id);
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = Some(event_id);
        self.store.clear_current_event();
        self.store.set_loading(true);
    }

    pub fn close(&self) {
        if let Some(event_id) = self.active.write().unwrap_or_else(PoisonError::into_inner).take() {
            log::info!("Closing event {}", event_id);
        }
        self.store.clear_current_event();
        self.store.set_loading(false);
    }

    /// Apply a push for `event_id`. Pushes for any event other than the
    /// open one are stale and ignored. Decode failures leave the store
    /// untouched.
    pub fn apply(&self, event_id: &str, snapshot: Snapshot) -> Result<(), SnapshotError> {
        if self.active_event().as_deref() != Some(event_id) {
            log::debug!("Ignoring snapshot for event {} (not open)", event_id);
            return Ok(());
        }

        let decode_error = |source: serde_json::Error| {
            log::warn!("Dropping malformed snapshot for event {}: {}", event_id, source);
            SnapshotError::Decode {
                event_id: event_id.to_string(),
                source,
            }
        };

        match snapshot {
            Snapshot::Full(Value::Null) => {
                log::info!("Event {} no longer exists", event_id);
                self.store.set_current_event(None);
            }
            Snapshot::Full(value) => {
                let mut event: Event = serde_json::from_value(value).map_err(decode_error)?;
                if event.id.is_empty() {
                    event.id = event_id.to_string();
                }
                self.store.set_current_event(Some(event));
            }
            Snapshot::Partial(value) => {
                let mut patch: EventPatch = serde_json::from_value(value).map_err(decode_error)?;
                if patch.id.is_none() {
                    patch.id = Some(event_id.to_string());
                }
                self.store.update_current_event_partial(patch);
            }
        }
        Ok(())
    }
}
