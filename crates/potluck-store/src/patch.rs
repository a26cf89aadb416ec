//! Event Patch
//!
//! A partial snapshot of an event. Every field that is set replaces the
//! whole top-level field of the current event: `menu_items` swaps the entire
//! mapping, it is never merged key by key. There is no deep merge.

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{Assignment, Collection, Event, EventDetails, MenuItem, Participant};

/// Present-but-null collections decode as empty; absent ones stay `None`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Option<Collection<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value: Option<Collection<T>> = Option::deserialize(deserializer)?;
    Ok(Some(value.unwrap_or_default()))
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<EventDetails>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "null_as_empty")]
    pub menu_items: Option<Collection<MenuItem>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "null_as_empty")]
    pub assignments: Option<Collection<Assignment>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "null_as_empty")]
    pub participants: Option<Collection<Participant>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "null_as_empty")]
    pub user_item_counts: Option<Collection<u32>>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self == &EventPatch::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_details(mut self, details: EventDetails) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_menu_items(mut self, menu_items: Collection<MenuItem>) -> Self {
        self.menu_items = Some(menu_items);
        self
    }

    pub fn with_assignments(mut self, assignments: Collection<Assignment>) -> Self {
        self.assignments = Some(assignments);
        self
    }

    pub fn with_participants(mut self, participants: Collection<Participant>) -> Self {
        self.participants = Some(participants);
        self
    }

    /// Replace each top-level field this patch carries; leave the rest
    pub fn apply_to(self, event: &mut Event) {
        if let Some(id) = self.id {
            event.id = id;
        }
        if let Some(organizer_id) = self.organizer_id {
            event.organizer_id = organizer_id;
        }
        if let Some(organizer_name) = self.organizer_name {
            event.organizer_name = organizer_name;
        }
        if let Some(created_at) = self.created_at {
            event.created_at = created_at;
        }
        if let Some(details) = self.details {
            event.details = details;
        }
        if let Some(menu_items) = self.menu_items {
            event.menu_items = menu_items;
        }
        if let Some(assignments) = self.assignments {
            event.assignments = assignments;
        }
        if let Some(participants) = self.participants {
            event.participants = participants;
        }
        if let Some(user_item_counts) = self.user_item_counts {
            event.user_item_counts = user_item_counts;
        }
    }

    /// Skeleton event (id from the patch or empty) with the patch on top
    pub fn into_event(self) -> Event {
        let mut event = Event::skeleton(self.id.clone().unwrap_or_default());
        self.apply_to(&mut event);
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_absent_and_null_collections() {
        let patch: EventPatch =
            serde_json::from_str(r#"{"id":"e1","assignments":null,"somethingNew":3}"#).unwrap();
        assert_eq!(patch.id.as_deref(), Some("e1"));
        assert_eq!(patch.assignments, Some(Collection::new()));
        assert_eq!(patch.menu_items, None);
        assert_eq!(patch.participants, None);
    }

    #[test]
    fn test_collection_replaces_whole_mapping() {
        let mut event = Event::skeleton("e1");
        event
            .menu_items
            .insert("a".to_string(), MenuItem::new("Bread", Category::Main, 1));
        event
            .menu_items
            .insert("b".to_string(), MenuItem::new("Wine", Category::Drink, 1));

        let mut replacement = Collection::new();
        replacement.insert("c".to_string(), MenuItem::new("Soup", Category::Starter, 1));
        EventPatch::default()
            .with_menu_items(replacement.clone())
            .apply_to(&mut event);

        assert_eq!(event.menu_items, replacement);
        assert_eq!(event.id, "e1");
    }

    #[test]
    fn test_into_event_defaults_id_to_empty() {
        let event = EventPatch::default().into_event();
        assert_eq!(event.id, "");
        assert!(event.menu_items.is_empty());
        assert!(EventPatch::default().is_empty());
    }

    #[test]
    fn test_serialize_only_carried_fields() {
        let json = serde_json::to_value(EventPatch::default().with_id("e9")).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "e9" }));
    }
}
