//! Assignment
//!
//! A participant's commitment to bring some quantity of a menu item.
//! Several assignments may point at the same item (partial fulfillment).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Pending,
    #[default]
    Confirmed,
    Completed,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::Confirmed => "confirmed",
            AssignmentStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Assignment {
    pub menu_item_id: String,
    pub user_id: String,
    pub user_name: String,
    /// Quantity actually committed
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: AssignmentStatus,
    pub assigned_at: i64,
}

impl Assignment {
    pub fn new(
        menu_item_id: impl Into<String>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            menu_item_id: menu_item_id.into(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            quantity,
            notes: None,
            status: AssignmentStatus::default(),
            assigned_at: super::now_millis(),
        }
    }

    /// Shallow merge of the fields set in `update`
    pub fn apply(&mut self, update: AssignmentUpdate) {
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// Partial assignment. The item and user references are fixed once created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentUpdate {
    pub quantity: Option<u32>,
    pub notes: Option<Option<String>>,
    pub status: Option<AssignmentStatus>,
}
