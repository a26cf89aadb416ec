//! Potluck Frontend Entry Point

mod app;
mod config;
mod context;
mod gateway;
mod i18n;
mod logger;
mod storage;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = config::load_config();
    logger::init(config.log_level());
    mount_to_body(move || view! { <App config=config /> });
}
