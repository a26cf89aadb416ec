//! Optimistic Actions
//!
//! User actions that update the local store right away and then write to
//! the gateway. A failed write is logged and returned; the optimistic state
//! stays until the next gateway snapshot reconciles it.

use crate::error::GatewayResult;
use crate::gateway::{paths, EventGateway};
use crate::models::{Assignment, MenuItem, MenuItemUpdate, Participant, User};
use crate::store::EventStore;

pub struct EventActions<'a, G: ?Sized> {
    store: &'a EventStore,
    gateway: &'a G,
    event_id: String,
}

impl<'a, G: EventGateway + ?Sized> EventActions<'a, G> {
    pub fn new(store: &'a EventStore, gateway: &'a G, event_id: impl Into<String>) -> Self {
        Self {
            store,
            gateway,
            event_id: event_id.into(),
        }
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    fn report<T>(&self, path: String, result: GatewayResult<T>) -> GatewayResult<T> {
        if let Err(e) = &result {
            log::error!("Gateway write to {} failed: {}", path, e);
        }
        result
    }

    pub async fn add_menu_item(&self, item_id: &str, item: MenuItem) -> GatewayResult<()> {
        self.store.add_menu_item(item_id, item.clone());
        let result = self.gateway.put_menu_item(&self.event_id, item_id, &item).await;
        self.report(paths::menu_item(&self.event_id, item_id), result)
    }

    /// Applies `update` locally, then writes only the fields it sets.
    /// The local copy is never sent back, so fields another client changed
    /// in the meantime are left alone.
    pub async fn update_menu_item(&self, item_id: &str, update: MenuItemUpdate) -> GatewayResult<()> {
        let loaded = self
            .store
            .snapshot()
            .current_event
            .as_ref()
            .is_some_and(|event| event.menu_items.contains_key(item_id));
        if !loaded || update.is_empty() {
            log::debug!("Menu item {} not loaded or update empty, skipping write", item_id);
            return Ok(());
        }

        self.store.update_menu_item(item_id, update.clone());
        let result = self.gateway.update_menu_item(&self.event_id, item_id, &update).await;
        self.report(paths::menu_item(&self.event_id, item_id), result)
    }

    /// Deletes the item and, remotely as well as locally, every assignment
    /// that references it. Every remote delete is attempted, the item's
    /// last; the first failure is returned.
    pub async fn delete_menu_item(&self, item_id: &str) -> GatewayResult<()> {
        let dependents: Vec<String> = self
            .store
            .snapshot()
            .current_event
            .as_ref()
            .map(|event| event.assignments_for_item(item_id).map(|(id, _)| id.clone()).collect())
            .unwrap_or_default();

        self.store.delete_menu_item(item_id);

        let mut first_error = None;
        for assignment_id in &dependents {
            let result = self.gateway.remove_assignment(&self.event_id, assignment_id).await;
            if let Err(e) = self.report(paths::assignment(&self.event_id, assignment_id), result) {
                first_error.get_or_insert(e);
            }
        }
        let result = self.gateway.remove_menu_item(&self.event_id, item_id).await;
        let result = self.report(paths::menu_item(&self.event_id, item_id), result);
        match first_error {
            Some(e) => Err(e),
            None => result,
        }
    }

    /// Commit `quantity` of an item on behalf of `user`
    pub async fn claim_item(
        &self,
        assignment_id: &str,
        item_id: &str,
        user: &User,
        quantity: u32,
        notes: Option<String>,
    ) -> GatewayResult<()> {
        let mut assignment = Assignment::new(item_id, user.id.clone(), user.name.clone(), quantity);
        assignment.notes = notes;
        self.store.add_assignment(assignment_id, assignment.clone());
        let result = self
            .gateway
            .put_assignment(&self.event_id, assignment_id, &assignment)
            .await;
        self.report(paths::assignment(&self.event_id, assignment_id), result)
    }

    pub async fn release_claim(&self, assignment_id: &str) -> GatewayResult<()> {
        self.store.delete_assignment(assignment_id);
        let result = self.gateway.remove_assignment(&self.event_id, assignment_id).await;
        self.report(paths::assignment(&self.event_id, assignment_id), result)
    }

    pub async fn join(&self, user: &User) -> GatewayResult<()> {
        let participant = Participant::new(user.name.clone());
        self.store.add_participant(user.id.clone(), participant.clone());
        let result = self
            .gateway
            .put_participant(&self.event_id, &user.id, &participant)
            .await;
        self.report(paths::participant(&self.event_id, &user.id), result)
    }

    pub async fn leave(&self, user_id: &str) -> GatewayResult<()> {
        self.store.remove_participant(user_id);
        let result = self.gateway.remove_participant(&self.event_id, user_id).await;
        self.report(paths::participant(&self.event_id, user_id), result)
    }
}
