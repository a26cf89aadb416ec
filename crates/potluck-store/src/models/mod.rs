//! Data Model
//!
//! Records mirrored from the realtime database. Field names serialize in
//! camelCase to match the gateway JSON; record ids live in the map keys.

mod assignment;
mod event;
mod menu_item;
mod participant;
mod user;

use std::collections::HashMap;

pub use assignment::{Assignment, AssignmentStatus, AssignmentUpdate};
pub use event::{Event, EventDetails, EventSettings};
pub use menu_item::{Category, MenuItem, MenuItemUpdate};
pub use participant::Participant;
pub use user::User;

/// Identifier-keyed collection. Iteration order carries no meaning.
pub type Collection<T> = HashMap<String, T>;

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
