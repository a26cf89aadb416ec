//! Potluck Event Store
//!
//! Client-side state for the potluck app:
//! - models: events, menu items, assignments, participants, users
//! - patch: partial event snapshots with replace-whole-field semantics
//! - store: the one-event state container and its subscriptions
//! - sync: routing gateway pushes into the store
//! - actions: optimistic mutations paired with gateway writes
//! - cache: best-effort user profile persistence

mod actions;
mod cache;
mod error;
mod gateway;
pub mod models;
mod patch;
mod store;
mod sync;

pub use actions::EventActions;
pub use cache::{KeyValueStorage, MemoryStorage, UserCache, DEFAULT_KEY_PREFIX};
pub use error::{GatewayError, GatewayResult, SnapshotError, StorageError};
pub use gateway::{paths, EventGateway};
pub use patch::EventPatch;
pub use store::{AppState, EventStore, Subscription};
pub use sync::{EventSync, Snapshot};
