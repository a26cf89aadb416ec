//! Realtime Database Bindings
//!
//! Frontend bindings to the hosted database and auth SDK the page exposes
//! as `window.__POTLUCK__`.

use std::cell::RefCell;

use async_trait::async_trait;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use potluck_store::models::{Assignment, MenuItem, MenuItemUpdate, Participant, User};
use potluck_store::{paths, EventGateway, EventSync, GatewayError, GatewayResult, Snapshot};

#[wasm_bindgen]
extern "C" {
    /// Calls `on_snapshot(value, isPartial)` for every change under the
    /// event. Returns the unsubscribe function.
    #[wasm_bindgen(js_namespace = ["window", "__POTLUCK__", "gateway"], js_name = subscribeEvent)]
    fn subscribe_event(event_id: &str, on_snapshot: &Closure<dyn FnMut(JsValue, bool)>) -> js_sys::Function;

    #[wasm_bindgen(catch, js_namespace = ["window", "__POTLUCK__", "gateway"], js_name = set)]
    async fn set_path(path: &str, value: JsValue) -> Result<JsValue, JsValue>;

    /// Merges the given fields into the record at `path`
    #[wasm_bindgen(catch, js_namespace = ["window", "__POTLUCK__", "gateway"], js_name = update)]
    async fn update_path(path: &str, fields: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["window", "__POTLUCK__", "gateway"], js_name = remove)]
    async fn remove_path(path: &str) -> Result<JsValue, JsValue>;

    /// Calls `on_change(user | null)` on sign-in and sign-out
    #[wasm_bindgen(js_namespace = ["window", "__POTLUCK__", "auth"], js_name = onAuthStateChanged)]
    fn on_auth_state_changed(on_change: &Closure<dyn FnMut(JsValue)>) -> js_sys::Function;
}

/// Best-effort text for a thrown JS value
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn write_error(path: String, err: JsValue) -> GatewayError {
    let message = js_message(&err);
    if message.contains("PERMISSION_DENIED") {
        GatewayError::PermissionDenied { path }
    } else {
        GatewayError::Write { path, message }
    }
}

/// Writes through the page's database SDK
#[derive(Clone, Copy, Debug, Default)]
pub struct JsGateway;

fn to_js<T: Serialize>(path: &str, value: &T) -> GatewayResult<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| GatewayError::Write {
            path: path.to_string(),
            message: e.to_string(),
        })
}

impl JsGateway {
    async fn put<T: Serialize>(&self, path: String, value: &T) -> GatewayResult<()> {
        let js_value = to_js(&path, value)?;
        set_path(&path, js_value).await.map_err(|e| write_error(path, e))?;
        Ok(())
    }

    async fn merge<T: Serialize>(&self, path: String, fields: &T) -> GatewayResult<()> {
        let js_value = to_js(&path, fields)?;
        update_path(&path, js_value).await.map_err(|e| write_error(path, e))?;
        Ok(())
    }

    async fn delete(&self, path: String) -> GatewayResult<()> {
        remove_path(&path).await.map_err(|e| write_error(path, e))?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl EventGateway for JsGateway {
    async fn put_menu_item(&self, event_id: &str, item_id: &str, item: &MenuItem) -> GatewayResult<()> {
        self.put(paths::menu_item(event_id, item_id), item).await
    }

    async fn update_menu_item(&self, event_id: &str, item_id: &str, update: &MenuItemUpdate) -> GatewayResult<()> {
        self.merge(paths::menu_item(event_id, item_id), update).await
    }

    async fn remove_menu_item(&self, event_id: &str, item_id: &str) -> GatewayResult<()> {
        self.delete(paths::menu_item(event_id, item_id)).await
    }

    async fn put_assignment(&self, event_id: &str, assignment_id: &str, assignment: &Assignment) -> GatewayResult<()> {
        self.put(paths::assignment(event_id, assignment_id), assignment).await
    }

    async fn remove_assignment(&self, event_id: &str, assignment_id: &str) -> GatewayResult<()> {
        self.delete(paths::assignment(event_id, assignment_id)).await
    }

    async fn put_participant(&self, event_id: &str, participant_id: &str, participant: &Participant) -> GatewayResult<()> {
        self.put(paths::participant(event_id, participant_id), participant).await
    }

    async fn remove_participant(&self, event_id: &str, participant_id: &str) -> GatewayResult<()> {
        self.delete(paths::participant(event_id, participant_id)).await
    }
}

// ========================
// Event Subscription
// ========================

struct ActiveSubscription {
    unsubscribe: js_sys::Function,
    _on_snapshot: Closure<dyn FnMut(JsValue, bool)>,
}

impl Drop for ActiveSubscription {
    fn drop(&mut self) {
        if let Err(e) = self.unsubscribe.call0(&JsValue::NULL) {
            log::warn!("Unsubscribe failed: {}", js_message(&e));
        }
    }
}

thread_local! {
    static ACTIVE: RefCell<Option<ActiveSubscription>> = const { RefCell::new(None) };
}

/// Open `event_id` and feed its pushes into `sync`. Any earlier
/// subscription is cancelled first.
pub fn watch_event(sync: EventSync, event_id: String) {
    ACTIVE.with(|active| active.borrow_mut().take());
    sync.open(event_id.clone());

    let target = event_id.clone();
    let on_snapshot = Closure::<dyn FnMut(JsValue, bool)>::new(move |value: JsValue, is_partial: bool| {
        let value: serde_json::Value = match serde_wasm_bindgen::from_value(value) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Unreadable snapshot for event {}: {}", target, e);
                return;
            }
        };
        let snapshot = if is_partial {
            Snapshot::Partial(value)
        } else {
            Snapshot::Full(value)
        };
        // Failures are logged by the sync layer
        let _ = sync.apply(&target, snapshot);
    });

    let unsubscribe = subscribe_event(&event_id, &on_snapshot);
    ACTIVE.with(|active| {
        *active.borrow_mut() = Some(ActiveSubscription {
            unsubscribe,
            _on_snapshot: on_snapshot,
        })
    });
}

pub fn unwatch_event(sync: &EventSync) {
    ACTIVE.with(|active| active.borrow_mut().take());
    sync.close();
}

// ========================
// Auth
// ========================

/// Forward auth changes for the lifetime of the page
pub fn watch_auth<F>(mut on_change: F)
where
    F: FnMut(Option<User>) + 'static,
{
    let callback = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
        if value.is_null() || value.is_undefined() {
            on_change(None);
            return;
        }
        match serde_wasm_bindgen::from_value::<User>(value) {
            Ok(user) => on_change(Some(user)),
            Err(e) => log::warn!("Unreadable auth user: {}", e),
        }
    });
    let _unsubscribe = on_auth_state_changed(&callback);
    callback.forget();
}
