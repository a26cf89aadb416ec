//! Main App Component
//!
//! Root component that wires the state store, the realtime subscription
//! and translations.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use potluck_store::models::Event;
use potluck_store::EventStore;

use crate::config::AppConfig;
use crate::context::{use_app_context, AppContext};
use crate::gateway;
use crate::i18n::{use_i18n, I18n};
use crate::store::{self, use_view_store, ViewState, ViewStateStoreFields};

/// Value of `name` in the page's query string
fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name).filter(|value| !value.is_empty())
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let events = EventStore::new();
    let view_store = Store::new(ViewState::from(events.snapshot().as_ref()));
    let mirror = store::mirror(&events, view_store);
    on_cleanup(move || drop(mirror));

    let i18n = I18n::new(&config);
    let ctx = AppContext::new(events, config);

    provide_context(view_store);
    provide_context(i18n);
    provide_context(ctx.clone());

    let auth_ctx = ctx.clone();
    gateway::watch_auth(move |user| match user {
        Some(user) => auth_ctx.sign_in(user),
        None => auth_ctx.sign_out(),
    });

    match query_param("event") {
        Some(event_id) => ctx.open_event(event_id),
        None => log::info!("No event in URL"),
    }

    view! {
        <main class="app-layout">
            <LanguageSwitch />
            <AccountPanel />
            {move || {
                if view_store.is_loading().get() {
                    return view! { <p class="loading">{i18n.t("common.loading")}</p> }.into_any();
                }
                match view_store.current_event().get() {
                    Some(event) => view! { <EventSummary event=event /> }.into_any(),
                    None => view! { <p class="empty">{i18n.t("event.notFound")}</p> }.into_any(),
                }
            }}
            <DeleteAccountModal />
        </main>
    }
}

#[component]
fn LanguageSwitch() -> impl IntoView {
    let i18n = use_i18n();
    let next = move || if i18n.language() == "he" { "en" } else { "he" };

    view! {
        <button class="language-switch" on:click=move |_| { i18n.set_language(next()); }>
            {move || next().to_uppercase()}
        </button>
    }
}

#[component]
fn EventSummary(event: Event) -> impl IntoView {
    let i18n = use_i18n();
    let ctx = use_app_context();
    let view_store = use_view_store();

    let items = event.menu_items.len().to_string();
    let people = event.participants.len().to_string();
    let summary = move || {
        i18n.t_with(
            "event.summary",
            &[("items", items.as_str()), ("people", people.as_str())],
        )
    };

    let joined = move || {
        let user_id = view_store.user().get().map(|user| user.id);
        let event = view_store.current_event().get();
        matches!((user_id, event), (Some(id), Some(event)) if event.is_participant(&id))
    };

    let toggle_join = move |_| {
        let Some(user) = view_store.user().get_untracked() else {
            return;
        };
        let is_member = joined();
        let ctx = ctx.clone();
        spawn_local(async move {
            let Some(actions) = ctx.actions() else {
                return;
            };
            // Failures are logged by the actions layer
            let _ = if is_member {
                actions.leave(&user.id).await
            } else {
                actions.join(&user).await
            };
        });
    };

    view! {
        <section class="event">
            <h1>{event.details.title.clone()}</h1>
            <p class="event-date">{event.details.date.clone()}</p>
            <p class="event-summary">{summary}</p>
            <button class="join-toggle" on:click=toggle_join>
                {move || if joined() { i18n.t("event.leave") } else { i18n.t("event.join") }}
            </button>
        </section>
    }
}

#[component]
fn AccountPanel() -> impl IntoView {
    let i18n = use_i18n();
    let ctx = use_app_context();
    let view_store = use_view_store();

    let name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    Effect::new(move |_| {
        if let Some(user) = view_store.user().get() {
            name.set(user.name);
            phone.set(user.phone.unwrap_or_default());
        }
    });

    let save_ctx = ctx.clone();
    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let phone = phone.get_untracked();
        let phone = (!phone.trim().is_empty()).then(|| phone.trim().to_string());
        save_ctx.update_profile(name.get_untracked().trim().to_string(), phone);
    };

    view! {
        <Show when=move || view_store.user().get().is_some()>
            <form class="account" on:submit=on_save.clone()>
                <label>
                    {move || i18n.t("account.name")}
                    <input type="text" bind:value=name />
                </label>
                <label>
                    {move || i18n.t("account.phone")}
                    <input type="tel" bind:value=phone />
                </label>
                <button type="submit">{move || i18n.t("common.save")}</button>
                <button type="button" class="danger" on:click={
                    let ctx = ctx.clone();
                    move |_| ctx.store.toggle_delete_account_modal()
                }>
                    {move || i18n.t("account.delete")}
                </button>
            </form>
        </Show>
    }
}

#[component]
fn DeleteAccountModal() -> impl IntoView {
    let i18n = use_i18n();
    let ctx = use_app_context();
    let view_store = use_view_store();
    let toggle_ctx = ctx.clone();

    view! {
        <Show when=move || view_store.show_delete_account_modal().get()>
            <div class="modal">
                <p>{move || i18n.t("account.deleteConfirm")}</p>
                <button class="danger" on:click={
                    let ctx = ctx.clone();
                    move |_| ctx.forget_account()
                }>
                    {move || i18n.t("account.delete")}
                </button>
                <button on:click={
                    let ctx = toggle_ctx.clone();
                    move |_| ctx.store.toggle_delete_account_modal()
                }>
                    {move || i18n.t("common.cancel")}
                </button>
            </div>
        </Show>
    }
}
