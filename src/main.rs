//! Objective Dashboard Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod pages;
mod session;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_env();
    let log = match console_logger::init_logger("ObjectiveDashboard", &config.log_level) {
        Ok(handle) => Some(handle),
        Err(e) => {
            web_sys::console::error_1(&format!("Logger init failed: {e}").into());
            None
        }
    };

    mount_to_body(move || view! { <App log=log /> });
}
