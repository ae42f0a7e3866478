//! Login Page

use dashboard_domain::forms::{validate_form, LoginForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::TextField;
use crate::context::use_app_context;
use crate::session::SessionHandle;

#[component]
pub fn LoginPage(session: SessionHandle) -> impl IntoView {
    let ctx = use_app_context();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let form = LoginForm {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        if let Err(e) = validate_form(&form) {
            ctx.toast_error(e.to_string());
            return;
        }

        set_submitting.set(true);
        let client = session.client();
        spawn_local(async move {
            let signed_in = match api::auth::login(&client, &form).await {
                Ok(user) => session.sign_in(user).map_err(|e| e.to_string()),
                Err(e) => Err(e.user_message()),
            };
            match signed_in {
                // The login screen unmounts once the session is set
                Ok(()) => {
                    ctx.navigate(super::read_location());
                    ctx.reload();
                }
                Err(message) => {
                    ctx.toast_error(message);
                    set_submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-intro">
                <p class="login-tagline">"Manage all your objectives in one place!"</p>
                <h1>"Objective Dashboard"</h1>
            </div>
            <form class="login-card" on:submit=on_submit>
                <h2>"Welcome back!"</h2>
                <p class="login-hint">"Keep all your credentials safe."</p>
                <TextField label="Email Address" value=email input_type="email" placeholder="email@example.com" />
                <TextField label="Password" value=password input_type="password" placeholder="your password" />
                <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in..." } else { "Log in" }}
                </button>
            </form>
        </div>
    }
}
