//! Objective Dashboard App
//!
//! Root component: provides the store and context, restores the session,
//! and switches between the login screen and the sidebar/navbar layout.

use console_logger::LogHandle;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::components::{BranchProgressModal, Navbar, Sidebar, Toaster};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::pages::{
    read_location, BranchDetailPage, DashboardPage, LoginPage, OrganizationPage, OverviewPage, Page, TaskDetailPage,
    TasksPage, TrashPage, UsersPage,
};
use crate::session::SessionHandle;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App(
    /// Recorded log lines, offered for download from the user menu
    log: Option<LogHandle>,
) -> impl IntoView {
    let config = AppConfig::from_env();
    if let Some(log) = log {
        provide_context(log);
    }
    tracing::info!(api = %config.api_base_url, bucket = %config.storage_bucket, "Starting dashboard");

    let store = Store::new(AppState::new());
    provide_context(store);

    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (page, set_page) = signal(read_location());
    let ctx = AppContext::new((reload_trigger, set_reload_trigger), (page, set_page), config);
    provide_context(ctx);

    let session = SessionHandle::new(store, ctx.config);
    session.restore();

    // Back/forward and hand-typed hashes
    let hash_listener = window_event_listener(ev::hashchange, move |_| ctx.follow_location());
    on_cleanup(move || hash_listener.remove());

    // Forms and tables resolve branch names from the shared list
    Effect::new(move |_| {
        let _ = reload_trigger.get();
        if !session.is_authenticated() {
            return;
        }
        let client = session.client();
        spawn_local(async move {
            match api::branch::list(&client).await {
                Ok(branches) => store.branches().set(branches),
                Err(e) => ctx.report(session, &e),
            }
        });
    });

    let current_page = move || {
        let page = ctx.page.get();
        if !session.permits(page.gate()) {
            tracing::debug!(path = %page.path(), "Page not permitted");
            return view! { <p class="empty-state">"You do not have access to this page."</p> }.into_any();
        }
        match page {
            Page::Overview => view! { <OverviewPage session=session /> }.into_any(),
            Page::Dashboard => view! { <DashboardPage session=session /> }.into_any(),
            Page::Tasks(stage) => view! { <TasksPage session=session stage=stage /> }.into_any(),
            Page::TaskDetail(id) => view! { <TaskDetailPage session=session id=id /> }.into_any(),
            Page::Team => view! { <UsersPage session=session /> }.into_any(),
            Page::Trash => view! { <TrashPage session=session /> }.into_any(),
            Page::Organization => view! { <OrganizationPage session=session /> }.into_any(),
            Page::BranchDetail(id) => view! { <BranchDetailPage session=session id=id /> }.into_any(),
        }
    };

    view! {
        <Show
            when=move || session.is_authenticated()
            fallback=move || view! { <LoginPage session=session /> }
        >
            <div class="app-layout">
                <Sidebar session=session />
                <div class="main-column">
                    <Navbar session=session />
                    <main class="main-content">{current_page}</main>
                </div>
                <Show when=move || ctx.progress_open.get()>
                    <BranchProgressModal session=session />
                </Show>
            </div>
        </Show>
        <Toaster />
    }
}
