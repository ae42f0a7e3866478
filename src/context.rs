//! Application Context
//!
//! Shared state provided via Leptos Context API: reload trigger, current
//! page, toast queue and the branch progress modal flag.

use std::time::Duration;

use gloo_timers::future::sleep;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiError, Message};
use crate::config::AppConfig;
use crate::pages::Page;
use crate::session::SessionHandle;

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload data from the backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload data from the backend - write
    set_reload_trigger: WriteSignal<u32>,
    pub page: ReadSignal<Page>,
    set_page: WriteSignal<Page>,
    pub toasts: RwSignal<Vec<Toast>>,
    next_toast: StoredValue<u32>,
    /// Branch progress modal, opened from the sidebar
    pub progress_open: RwSignal<bool>,
    pub config: StoredValue<AppConfig>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        page: (ReadSignal<Page>, WriteSignal<Page>),
        config: AppConfig,
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            page: page.0,
            set_page: page.1,
            toasts: RwSignal::new(Vec::new()),
            next_toast: StoredValue::new(0),
            progress_open: RwSignal::new(false),
            config: StoredValue::new(config),
        }
    }

    /// Trigger a reload of page data
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn navigate(&self, page: Page) {
        tracing::debug!(path = %page.path(), "Navigate");
        crate::pages::write_location(&page);
        self.set_page.set(page);
    }

    /// Adopt the page named by the location hash, e.g. after back/forward
    pub fn follow_location(&self) {
        let page = crate::pages::read_location();
        if self.page.get_untracked() != page {
            self.set_page.set(page);
        }
    }

    pub fn toast_success(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Success, message.into());
    }

    pub fn toast_error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "Error toast");
        self.push_toast(ToastKind::Error, message);
    }

    /// Success toast with the server's message, or `fallback` when it sent none
    pub fn toast_reply(&self, reply: Message, fallback: &str) {
        if reply.message.trim().is_empty() {
            self.toast_success(fallback);
        } else {
            self.toast_success(reply.message);
        }
    }

    /// Toast a failed call; a 401 also ends the session
    pub fn report(&self, session: SessionHandle, err: &ApiError) {
        session.expire_on_unauthorized(err);
        self.toast_error(err.user_message());
    }

    pub fn dismiss_toast(&self, id: u32) {
        let _ = self.toasts.try_update(|list| list.retain(|t| t.id != id));
    }

    fn push_toast(&self, kind: ToastKind, message: String) {
        let id = self.next_toast.get_value();
        self.next_toast.set_value(id.wrapping_add(1));
        self.toasts.update(|list| list.push(Toast { id, kind, message }));

        let ctx = *self;
        spawn_local(async move {
            sleep(TOAST_TTL).await;
            ctx.dismiss_toast(id);
        });
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
