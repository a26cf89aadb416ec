//! Event
//!
//! One potluck gathering with its items, assignments and participants.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Assignment, Category, Collection, MenuItem, Participant};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventSettings {
    /// Participants may add their own items
    pub allow_user_items: bool,
    /// Per-user item limit, checked against `Event::user_item_counts`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_user_items: Option<u32>,
    pub carpool_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    #[serde(default)]
    pub title: String,
    /// Calendar date as sent by the gateway (`YYYY-MM-DD`)
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub settings: EventSettings,
}

impl Default for EventDetails {
    fn default() -> Self {
        Self {
            title: String::new(),
            date: String::new(),
            time: None,
            location: None,
            description: None,
            is_active: true,
            settings: EventSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    pub id: String,
    pub organizer_id: String,
    pub organizer_name: String,
    pub created_at: i64,
    pub details: EventDetails,
    pub menu_items: Collection<MenuItem>,
    pub assignments: Collection<Assignment>,
    pub participants: Collection<Participant>,
    /// Items added per user, used to throttle user-added items
    pub user_item_counts: Collection<u32>,
}

impl Event {
    /// Empty event carrying only an id
    pub fn skeleton(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    // ========================
    // Read helpers
    // ========================

    /// Assignments pointing at `item_id`
    pub fn assignments_for_item<'a>(&'a self, item_id: &'a str) -> impl Iterator<Item = (&'a String, &'a Assignment)> + 'a {
        self.assignments
            .iter()
            .filter(move |(_, assignment)| assignment.menu_item_id == item_id)
    }

    pub fn assignments_for_user<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = (&'a String, &'a Assignment)> + 'a {
        self.assignments
            .iter()
            .filter(move |(_, assignment)| assignment.user_id == user_id)
    }

    /// Sum of committed quantities across all assignments for the item
    pub fn committed_quantity(&self, item_id: &str) -> u32 {
        self.assignments_for_item(item_id)
            .map(|(_, assignment)| assignment.quantity)
            .sum()
    }

    /// Quantity still needed, `None` if the item does not exist
    pub fn remaining_quantity(&self, item_id: &str) -> Option<u32> {
        let item = self.menu_items.get(item_id)?;
        Some(item.quantity.saturating_sub(self.committed_quantity(item_id)))
    }

    pub fn is_fully_covered(&self, item_id: &str) -> bool {
        self.remaining_quantity(item_id) == Some(0)
    }

    /// Item ids grouped by category, sorted by item name within each group
    pub fn items_by_category(&self) -> HashMap<Category, Vec<&str>> {
        let mut groups: HashMap<Category, Vec<(&str, &str)>> = HashMap::new();
        for (id, item) in &self.menu_items {
            groups
                .entry(item.category)
                .or_default()
                .push((item.name.as_str(), id.as_str()));
        }
        groups
            .into_iter()
            .map(|(category, mut entries)| {
                entries.sort();
                (category, entries.into_iter().map(|(_, id)| id).collect())
            })
            .collect()
    }

    pub fn is_participant(&self, user_id: &str) -> bool {
        self.participants.contains_key(user_id)
    }

    pub fn user_item_count(&self, user_id: &str) -> u32 {
        self.user_item_counts.get(user_id).copied().unwrap_or(0)
    }

    /// Whether `user_id` may add another item of their own
    pub fn can_add_user_item(&self, user_id: &str) -> bool {
        if user_id == self.organizer_id {
            return true;
        }
        let settings = &self.details.settings;
        if !settings.allow_user_items {
            return false;
        }
        match settings.max_user_items {
            Some(limit) => self.user_item_count(user_id) < limit,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Assignment;

    fn sample_event() -> Event {
        let mut event = Event::skeleton("e1");
        event.organizer_id = "org".to_string();
        event
            .menu_items
            .insert("bread".to_string(), MenuItem::new("Bread", Category::Main, 4));
        event
            .menu_items
            .insert("cake".to_string(), MenuItem::new("Cake", Category::Dessert, 1));
        event
            .menu_items
            .insert("apples".to_string(), MenuItem::new("Apples", Category::Dessert, 2));
        event
            .assignments
            .insert("x".to_string(), Assignment::new("bread", "u1", "Dana", 1));
        event
            .assignments
            .insert("y".to_string(), Assignment::new("bread", "u2", "Avi", 2));
        event
            .assignments
            .insert("z".to_string(), Assignment::new("cake", "u1", "Dana", 1));
        event
    }

    #[test]
    fn test_committed_and_remaining() {
        let event = sample_event();
        assert_eq!(event.committed_quantity("bread"), 3);
        assert_eq!(event.remaining_quantity("bread"), Some(1));
        assert!(event.is_fully_covered("cake"));
        assert_eq!(event.remaining_quantity("missing"), None);
        assert_eq!(event.assignments_for_user("u1").count(), 2);
    }

    #[test]
    fn test_items_by_category_sorted_by_name() {
        let event = sample_event();
        let groups = event.items_by_category();
        assert_eq!(groups[&Category::Dessert], vec!["apples", "cake"]);
        assert_eq!(groups[&Category::Main], vec!["bread"]);
        assert!(!groups.contains_key(&Category::Drink));
    }

    #[test]
    fn test_user_item_limit() {
        let mut event = sample_event();
        assert!(!event.can_add_user_item("u1"));
        assert!(event.can_add_user_item("org"));

        event.details.settings.allow_user_items = true;
        event.details.settings.max_user_items = Some(2);
        event.user_item_counts.insert("u1".to_string(), 2);
        assert!(!event.can_add_user_item("u1"));
        assert!(event.can_add_user_item("u2"));
    }

    #[test]
    fn test_decode_sparse_gateway_event() {
        let event: Event = serde_json::from_str(
            r#"{"organizerName":"Noa","details":{"title":"Picnic","date":"2026-06-01"}}"#,
        )
        .unwrap();
        assert_eq!(event.id, "");
        assert_eq!(event.details.title, "Picnic");
        assert!(event.details.is_active);
        assert!(event.menu_items.is_empty());
        assert!(event.user_item_counts.is_empty());
    }
}
