//! Performance evaluation for one team member

use dashboard_domain::model::User;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, task::Performance};
use crate::components::{Modal, UserAvatar};
use crate::context::use_app_context;
use crate::session::SessionHandle;

#[component]
pub fn UserDetailsModal(session: SessionHandle, user: User, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let performance = RwSignal::new(None::<Performance>);
    let (loading, set_loading) = signal(true);

    let client = session.client();
    let user_id = user.id.clone();
    spawn_local(async move {
        match api::task::performance(&client, &user_id).await {
            Ok(found) => performance.set(found),
            Err(e) => ctx.report(session, &e),
        }
        set_loading.set(false);
    });

    view! {
        <Modal title="Performance Evaluation" on_close=on_close>
            <div class="user-details">
                <UserAvatar name=user.name.clone() picture=user.profile_picture_url.clone() />
                <div>
                    <h3>{user.name.clone()}</h3>
                    <p>{user.title.clone()}</p>
                    <p>{user.email.clone()}</p>
                    <p>{format!("{} · {}", user.department, user.gender)}</p>
                </div>
            </div>
            {move || {
                if loading.get() {
                    return view! { <p class="loading">"Loading..."</p> }.into_any();
                }
                match performance.get() {
                    Some(p) => view! {
                        <dl class="performance-grid">
                            <dt>"Days present"</dt>
                            <dd>{p.days_present}</dd>
                            <dt>"Days absent"</dt>
                            <dd>{p.days_absent}</dd>
                            <dt>"Hours worked"</dt>
                            <dd>{format!("{:.1}", p.hours_worked)}</dd>
                        </dl>
                    }
                    .into_any(),
                    None => view! { <p class="empty-state">"No attendance recorded yet."</p> }.into_any(),
                }
            }}
        </Modal>
    }
}
