#![allow(warnings)]
//! Cat Clicker Frontend Entry Point

mod app;
mod bootstrap;
mod config;
mod controller;
mod error;
mod models;
mod store;
mod views;

#[cfg(test)]
mod tests;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    let _ = rolling_logger::init_logger("CatClicker", config.log_capacity);
    if let Err(e) = &loaded {
        log::error!("[APP] {}; falling back to built-in defaults", e);
    }

    let ids = config.elements.clone();
    let hidden_class = config.hidden_class.clone();
    mount_to_body(move || view! { <App ids=ids hidden_class=hidden_class/> });

    if let Err(e) = bootstrap::start(&config) {
        log::error!("[APP] bootstrap failed: {}", e);
    }
}
