//! View State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The
//! `EventStore` stays authoritative; this store mirrors its snapshots so
//! components re-render per field.

use std::sync::{Arc, Mutex, PoisonError};

use leptos::prelude::*;
use reactive_stores::Store;

use potluck_store::models::{Event, User};
use potluck_store::{AppState, EventStore, Subscription};

/// Snapshot of `AppState` with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct ViewState {
    pub user: Option<User>,
    pub current_event: Option<Event>,
    pub is_loading: bool,
    pub show_delete_account_modal: bool,
}

impl From<&AppState> for ViewState {
    fn from(state: &AppState) -> Self {
        Self {
            user: state.user.clone(),
            current_event: state.current_event.clone(),
            is_loading: state.is_loading,
            show_delete_account_modal: state.show_delete_account_modal,
        }
    }
}

/// Type alias for the store
pub type ViewStore = Store<ViewState>;

/// Get the view store from context
pub fn use_view_store() -> ViewStore {
    expect_context::<ViewStore>()
}

/// Copy every change from `events` into `view`. Only fields that differ
/// from the previous snapshot are written.
pub fn mirror(events: &EventStore, view: ViewStore) -> Subscription {
    let last = Mutex::new(events.snapshot());
    events.subscribe(move |next: &Arc<AppState>| {
        let mut last = last.lock().unwrap_or_else(PoisonError::into_inner);
        if last.user != next.user {
            *view.user().write() = next.user.clone();
        }
        if last.current_event != next.current_event {
            *view.current_event().write() = next.current_event.clone();
        }
        if last.is_loading != next.is_loading {
            *view.is_loading().write() = next.is_loading;
        }
        if last.show_delete_account_modal != next.show_delete_account_modal {
            *view.show_delete_account_modal().write() = next.show_delete_account_modal;
        }
        *last = Arc::clone(next);
    })
}
