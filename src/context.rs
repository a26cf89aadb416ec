//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;

use potluck_store::models::User;
use potluck_store::{EventActions, EventStore, EventSync, UserCache};

use crate::config::AppConfig;
use crate::gateway::{self, JsGateway};
use crate::storage::BrowserStorage;

/// App-wide handles provided via context
#[derive(Clone)]
pub struct AppContext {
    pub store: EventStore,
    pub sync: EventSync,
    pub gateway: JsGateway,
    config: AppConfig,
}

impl AppContext {
    pub fn new(store: EventStore, config: AppConfig) -> Self {
        Self {
            sync: EventSync::new(store.clone()),
            store,
            gateway: JsGateway,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn user_cache(&self) -> Option<UserCache<BrowserStorage>> {
        match BrowserStorage::local() {
            Ok(storage) => Some(UserCache::with_prefix(storage, self.config.storage_prefix.as_str())),
            Err(e) => {
                log::warn!("Profile cache unavailable: {}", e);
                None
            }
        }
    }

    /// Subscribe to `event_id`, replacing whatever event was open
    pub fn open_event(&self, event_id: impl Into<String>) {
        gateway::watch_event(self.sync.clone(), event_id.into());
    }

    pub fn close_event(&self) {
        gateway::unwatch_event(&self.sync);
    }

    /// Remote actions against the open event, if any
    pub fn actions(&self) -> Option<EventActions<'_, JsGateway>> {
        let event_id = self.sync.active_event()?;
        Some(EventActions::new(&self.store, &self.gateway, event_id))
    }

    /// Auth reported a user. Profile fields the auth provider lacks are
    /// filled from the cached copy.
    pub fn sign_in(&self, mut user: User) {
        if let Some(cache) = self.user_cache() {
            if let Some(cached) = cache.load(&user.id) {
                if user.name.is_empty() {
                    user.name = cached.name;
                }
                if user.phone.is_none() {
                    user.phone = cached.phone;
                }
                if user.created_at == 0 {
                    user.created_at = cached.created_at;
                }
            }
            cache.save(&user);
        }
        log::info!("Signed in as {}", user.id);
        self.store.set_user(Some(user));
    }

    pub fn sign_out(&self) {
        self.close_event();
        self.store.set_user(None);
    }

    /// Change the signed-in user's name and phone
    pub fn update_profile(&self, name: String, phone: Option<String>) {
        let Some(mut user) = self.store.snapshot().user.clone() else {
            return;
        };
        user.name = name;
        user.phone = phone;
        if let Some(cache) = self.user_cache() {
            cache.save(&user);
        }
        self.store.set_user(Some(user));
    }

    /// Drop the cached profile and sign out locally
    pub fn forget_account(&self) {
        if let Some(user) = self.store.snapshot().user.as_ref() {
            if let Some(cache) = self.user_cache() {
                cache.remove(&user.id);
            }
        }
        if self.store.snapshot().show_delete_account_modal {
            self.store.toggle_delete_account_modal();
        }
        self.sign_out();
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
