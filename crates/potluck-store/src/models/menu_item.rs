//! Menu Item
//!
//! A requested item that participants can commit to bringing.

use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Menu category. Unknown values from the gateway decode as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Starter,
    Main,
    Dessert,
    Drink,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Starter,
        Category::Main,
        Category::Dessert,
        Category::Drink,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Starter => "starter",
            Category::Main => "main",
            Category::Dessert => "dessert",
            Category::Drink => "drink",
            Category::Other => "other",
        }
    }

    /// Never fails; unknown names map to `Other`
    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "starter" => Category::Starter,
            "main" => Category::Main,
            "dessert" => Category::Dessert,
            "drink" => Category::Drink,
            _ => Category::Other,
        }
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::parse_lossy(s))
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Category::parse_lossy(&raw))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuItem {
    pub name: String,
    pub category: Category,
    /// Requested quantity
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_required: bool,
    /// Set by the item form as `quantity > 1`; never recomputed here
    pub is_splittable: bool,
    pub creator_id: String,
    pub creator_name: String,
    pub created_at: i64,

    // Assignment back-reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<i64>,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, category: Category, quantity: u32) -> Self {
        Self {
            name: name.into(),
            category,
            quantity,
            is_splittable: quantity > 1,
            created_at: super::now_millis(),
            ..Default::default()
        }
    }

    pub fn created_by(mut self, creator_id: impl Into<String>, creator_name: impl Into<String>) -> Self {
        self.creator_id = creator_id.into();
        self.creator_name = creator_name.into();
        self
    }

    pub fn required(mut self, is_required: bool) -> Self {
        self.is_required = is_required;
        self
    }

    /// Copy of the fields kept when inserting through the store.
    ///
    /// `is_splittable` is not part of the insert field set and is stored
    /// as `false`; the next gateway snapshot carries the real value.
    pub(crate) fn whitelisted(self) -> Self {
        Self {
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            notes: self.notes,
            is_required: self.is_required,
            is_splittable: false,
            creator_id: self.creator_id,
            creator_name: self.creator_name,
            created_at: self.created_at,
            assigned_to: self.assigned_to,
            assigned_to_name: self.assigned_to_name,
            assigned_at: self.assigned_at,
        }
    }

    /// Shallow merge: every field set in `update` replaces the stored one
    pub fn apply(&mut self, update: MenuItemUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        if let Some(is_required) = update.is_required {
            self.is_required = is_required;
        }
        if let Some(is_splittable) = update.is_splittable {
            self.is_splittable = is_splittable;
        }
        if let Some(assigned_to) = update.assigned_to {
            self.assigned_to = assigned_to;
        }
        if let Some(assigned_to_name) = update.assigned_to_name {
            self.assigned_to_name = assigned_to_name;
        }
        if let Some(assigned_at) = update.assigned_at {
            self.assigned_at = assigned_at;
        }
    }
}

/// Partial menu item. `Some(None)` clears an optional field.
///
/// Serializes to only the fields it sets, with cleared fields as `null`,
/// which is the shape of a field-level database update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_splittable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_name: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<Option<i64>>,
}

impl MenuItemUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Default::default() }
    }

    /// Sets the quantity and keeps the splittable flag in step with it
    pub fn quantity(quantity: u32) -> Self {
        Self {
            quantity: Some(quantity),
            is_splittable: Some(quantity > 1),
            ..Default::default()
        }
    }

    /// Clears the assignment back-reference
    pub fn unassign() -> Self {
        Self {
            assigned_to: Some(None),
            assigned_to_name: Some(None),
            assigned_at: Some(None),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
