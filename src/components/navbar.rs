//! Top bar: sidebar toggle, greeting, and the user menu

use chrono::{Local, Timelike};
use console_logger::LogHandle;
use dashboard_domain::model::User;
use dashboard_domain::util::{get_initials, greeting};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::download_text;
use crate::context::use_app_context;
use crate::pages::Page;
use crate::session::SessionHandle;
use crate::store::{toggle_sidebar, use_app_store};

#[component]
pub fn UserAvatar(#[prop(into)] name: String, #[prop(default = None)] picture: Option<String>) -> impl IntoView {
    match picture.filter(|url| !url.is_empty()) {
        Some(url) => view! { <img class="avatar" src=url alt=name /> }.into_any(),
        None => view! { <span class="avatar avatar-initials">{get_initials(&name)}</span> }.into_any(),
    }
}

#[component]
pub fn Navbar(session: SessionHandle) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (menu_open, set_menu_open) = signal(false);
    let log = StoredValue::new(use_context::<LogHandle>());

    let logout = move |_| {
        set_menu_open.set(false);
        let client = session.client();
        spawn_local(async move {
            if let Err(e) = api::auth::logout(&client).await {
                tracing::warn!(error = %e, "Logout request failed");
            }
            session.sign_out();
            ctx.navigate(Page::Dashboard);
        });
    };

    let download_log = move |_| {
        set_menu_open.set(false);
        let Some(lines) = log.with_value(|l| l.as_ref().map(LogHandle::recent_lines)) else {
            return;
        };
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        if let Err(e) = download_text(&format!("Dashboard_Log_{stamp}.txt"), &lines.join("\n")) {
            tracing::warn!(error = ?e, "Log download failed");
        }
    };

    view! {
        <header class="navbar">
            <button class="navbar-toggle" on:click=move |_| toggle_sidebar(&store)>"☰"</button>
            <div class="navbar-title">{move || ctx.page.get().title()}</div>
            {move || session.user().map(|user| {
                let hello = format!("{}, {}", greeting(Local::now().hour()), user.name);
                let User { name, title, profile_picture_url, .. } = user;
                let menu_name = name.clone();
                view! {
                    <div class="navbar-user">
                        <span class="navbar-greeting">{hello}</span>
                        <button class="avatar-button" on:click=move |_| set_menu_open.update(|v| *v = !*v)>
                            <UserAvatar name=name picture=profile_picture_url />
                        </button>
                        <Show when=move || menu_open.get()>
                            <div class="user-menu">
                                <div class="user-menu-name">{menu_name.clone()}</div>
                                <div class="user-menu-title">{title.clone()}</div>
                                <Show when=move || log.with_value(Option::is_some)>
                                    <button class="user-menu-item" on:click=download_log>"Download log"</button>
                                </Show>
                                <button class="user-menu-item" on:click=logout>"Logout"</button>
                            </div>
                        </Show>
                    </div>
                }
            })}
        </header>
    }
}
