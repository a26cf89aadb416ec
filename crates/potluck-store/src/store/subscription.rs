//! Store Subscriptions

use std::sync::{Arc, PoisonError, RwLock, Weak};

use super::{AppState, Inner};

pub(crate) type Observer = Arc<dyn Fn(&Arc<AppState>) + Send + Sync>;

/// Keeps an observer registered while alive
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    inner: Weak<RwLock<Inner>>,
    id: u64,
}

impl Subscription {
    pub(crate) fn new(inner: Weak<RwLock<Inner>>, id: u64) -> Self {
        Self { inner, id }
    }

    /// Leave the observer registered for the lifetime of the store
    pub fn detach(mut self) {
        self.inner = Weak::new();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let mut inner = inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.observers.retain(|(id, _)| *id != self.id);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
