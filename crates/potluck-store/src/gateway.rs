//! Remote Gateway Contract
//!
//! Authoritative writes to the realtime database. Implementations live at
//! the edge (browser bindings, test doubles); the store never calls them.

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::models::{Assignment, MenuItem, MenuItemUpdate, Participant};

/// Database paths used by the gateway
pub mod paths {
    pub fn event(event_id: &str) -> String {
        format!("events/{}", event_id)
    }

    pub fn menu_item(event_id: &str, item_id: &str) -> String {
        format!("{}/menuItems/{}", event(event_id), item_id)
    }

    pub fn assignment(event_id: &str, assignment_id: &str) -> String {
        format!("{}/assignments/{}", event(event_id), assignment_id)
    }

    pub fn participant(event_id: &str, participant_id: &str) -> String {
        format!("{}/participants/{}", event(event_id), participant_id)
    }
}

/// Write side of the realtime database.
///
/// Futures are not required to be `Send` so browser bindings can
/// implement it directly.
#[async_trait(?Send)]
pub trait EventGateway {
    async fn put_menu_item(&self, event_id: &str, item_id: &str, item: &MenuItem) -> GatewayResult<()>;

    /// Field-level write: only the fields `update` sets are touched
    async fn update_menu_item(&self, event_id: &str, item_id: &str, update: &MenuItemUpdate) -> GatewayResult<()>;

    async fn remove_menu_item(&self, event_id: &str, item_id: &str) -> GatewayResult<()>;

    async fn put_assignment(&self, event_id: &str, assignment_id: &str, assignment: &Assignment) -> GatewayResult<()>;

    async fn remove_assignment(&self, event_id: &str, assignment_id: &str) -> GatewayResult<()>;

    async fn put_participant(&self, event_id: &str, participant_id: &str, participant: &Participant) -> GatewayResult<()>;

    async fn remove_participant(&self, event_id: &str, participant_id: &str) -> GatewayResult<()>;
}

#[cfg(test)]
mod tests {
    use super::paths;

    #[test]
    fn test_paths() {
        assert_eq!(paths::event("e1"), "events/e1");
        assert_eq!(paths::menu_item("e1", "i1"), "events/e1/menuItems/i1");
        assert_eq!(paths::assignment("e1", "a1"), "events/e1/assignments/a1");
        assert_eq!(paths::participant("e1", "u1"), "events/e1/participants/u1");
    }
}
