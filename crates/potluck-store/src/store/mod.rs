//! Event State Store
//!
//! Holds at most one event mirrored from the realtime database, plus the
//! signed-in user and a few UI flags. Every applied mutation publishes a new
//! immutable snapshot to subscribers. Mutations against a missing event or
//! record are silent no-ops: they publish nothing and keep the old snapshot.

mod subscription;

#[cfg(test)]
mod tests;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{Assignment, AssignmentUpdate, Event, MenuItem, MenuItemUpdate, Participant, User};
use crate::patch::EventPatch;

pub use subscription::Subscription;
use subscription::Observer;

/// Snapshot of everything the store holds
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub user: Option<User>,
    /// The one event held in memory
    pub current_event: Option<Event>,
    /// Gates rendering until the first snapshot arrives
    pub is_loading: bool,
    pub show_delete_account_modal: bool,
}

pub(crate) struct Inner {
    state: Arc<AppState>,
    observers: Vec<(u64, Observer)>,
    next_observer_id: u64,
}

/// Shared handle to the state container. Clones point at the same state.
///
/// Observers run on the mutating thread after the lock is released. With
/// one mutating thread they see every snapshot in mutation order. The
/// handle is `Send + Sync` only so it can live in framework context;
/// concurrent mutation from several threads may deliver snapshots to
/// observers out of order.
#[derive(Clone)]
pub struct EventStore {
    inner: Arc<RwLock<Inner>>,
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStore")
            .field("state", &self.snapshot())
            .finish()
    }
}

impl EventStore {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                state: Arc::new(state),
                observers: Vec::new(),
                next_observer_id: 0,
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current immutable snapshot
    pub fn snapshot(&self) -> Arc<AppState> {
        Arc::clone(&self.read().state)
    }

    /// Call `observer` with every snapshot published after this point.
    ///
    /// Notifications stop when the returned guard is dropped.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Arc<AppState>) + Send + Sync + 'static,
    {
        let mut inner = self.write();
        let id = inner.next_observer_id;
        inner.next_observer_id += 1;
        inner.observers.push((id, Arc::new(observer)));
        Subscription::new(Arc::downgrade(&self.inner), id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.read().observers.len()
    }

    /// Run `op` against a copy of the state. When it reports a change the
    /// copy becomes the new snapshot and observers are notified after the
    /// lock is released.
    fn update<F>(&self, op: &'static str, f: F)
    where
        F: FnOnce(&mut AppState) -> bool,
    {
        let (snapshot, observers) = {
            let mut inner = self.write();
            let mut next = AppState::clone(&inner.state);
            if !f(&mut next) {
                log::trace!("store: {} skipped, nothing to change", op);
                return;
            }
            inner.state = Arc::new(next);
            let observers: Vec<Observer> = inner
                .observers
                .iter()
                .map(|(_, observer)| Arc::clone(observer))
                .collect();
            (Arc::clone(&inner.state), observers)
        };

        log::debug!("store: {} applied, notifying {} observer(s)", op, observers.len());
        for observer in observers {
            observer(&snapshot);
        }
    }

    // ========================
    // Session and UI flags
    // ========================

    /// Replace the cached user. No validation.
    pub fn set_user(&self, user: Option<User>) {
        self.update("set_user", |state| {
            state.user = user;
            true
        });
    }

    pub fn set_loading(&self, is_loading: bool) {
        self.update("set_loading", |state| {
            state.is_loading = is_loading;
            true
        });
    }

    pub fn toggle_delete_account_modal(&self) {
        self.update("toggle_delete_account_modal", |state| {
            state.show_delete_account_modal = !state.show_delete_account_modal;
            true
        });
    }

    // ========================
    // Whole-event ingestion
    // ========================

    /// Full replace with a complete snapshot. Clears the loading flag.
    pub fn set_current_event(&self, event: Option<Event>) {
        self.update("set_current_event", |state| {
            state.current_event = event;
            state.is_loading = false;
            true
        });
    }

    /// Merge a partial snapshot into the current event.
    ///
    /// With no event yet, a skeleton (id from the patch or empty, empty
    /// collections) is created first. Each top-level field the patch
    /// carries replaces the old value whole; absent fields stay. Clears the
    /// loading flag.
    pub fn update_current_event_partial(&self, patch: EventPatch) {
        self.update("update_current_event_partial", |state| {
            match state.current_event.as_mut() {
                Some(event) => patch.apply_to(event),
                None => state.current_event = Some(patch.into_event()),
            }
            state.is_loading = false;
            true
        });
    }

    /// Drop the current event. The cached user stays.
    pub fn clear_current_event(&self) {
        self.update("clear_current_event", |state| {
            state.current_event = None;
            true
        });
    }

    // ========================
    // Menu items
    // ========================

    pub fn update_menu_item(&self, item_id: &str, update: MenuItemUpdate) {
        self.update("update_menu_item", |state| {
            let Some(item) = state
                .current_event
                .as_mut()
                .and_then(|event| event.menu_items.get_mut(item_id))
            else {
                return false;
            };
            item.apply(update);
            true
        });
    }

    /// Insert under `item_id`, keeping only the insertable field set
    pub fn add_menu_item(&self, item_id: impl Into<String>, item: MenuItem) {
        let item_id = item_id.into();
        self.update("add_menu_item", |state| {
            let Some(event) = state.current_event.as_mut() else {
                return false;
            };
            event.menu_items.insert(item_id, item.whitelisted());
            true
        });
    }

    /// Remove the item and every assignment that references it
    pub fn delete_menu_item(&self, item_id: &str) {
        self.update("delete_menu_item", |state| {
            let Some(event) = state.current_event.as_mut() else {
                return false;
            };
            let removed = event.menu_items.remove(item_id).is_some();
            let before = event.assignments.len();
            event
                .assignments
                .retain(|_, assignment| assignment.menu_item_id != item_id);
            let cascaded = before - event.assignments.len();
            if cascaded > 0 {
                log::debug!("store: removed {} assignment(s) of item {}", cascaded, item_id);
            }
            removed || cascaded > 0
        });
    }

    // ========================
    // Assignments
    // ========================

    pub fn update_assignment(&self, assignment_id: &str, update: AssignmentUpdate) {
        self.update("update_assignment", |state| {
            let Some(assignment) = state
                .current_event
                .as_mut()
                .and_then(|event| event.assignments.get_mut(assignment_id))
            else {
                return false;
            };
            assignment.apply(update);
            true
        });
    }

    /// Insert under `assignment_id`. The referenced item is not checked.
    pub fn add_assignment(&self, assignment_id: impl Into<String>, assignment: Assignment) {
        let assignment_id = assignment_id.into();
        self.update("add_assignment", |state| {
            let Some(event) = state.current_event.as_mut() else {
                return false;
            };
            event.assignments.insert(assignment_id, assignment);
            true
        });
    }

    pub fn delete_assignment(&self, assignment_id: &str) {
        self.update("delete_assignment", |state| {
            state
                .current_event
                .as_mut()
                .and_then(|event| event.assignments.remove(assignment_id))
                .is_some()
        });
    }

    // ========================
    // Participants
    // ========================

    pub fn add_participant(&self, participant_id: impl Into<String>, participant: Participant) {
        let participant_id = participant_id.into();
        self.update("add_participant", |state| {
            let Some(event) = state.current_event.as_mut() else {
                return false;
            };
            event.participants.insert(participant_id, participant);
            true
        });
    }

    pub fn remove_participant(&self, participant_id: &str) {
        self.update("remove_participant", |state| {
            state
                .current_event
                .as_mut()
                .and_then(|event| event.participants.remove(participant_id))
                .is_some()
        });
    }
}
