//! Team Members Page
//!
//! Everyone on the team with their role, branch and status. Admins can add,
//! edit, (de)activate and remove members.

use dashboard_domain::catalog::names;
use dashboard_domain::model::User;
use dashboard_domain::util::get_initials;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{DeleteConfirmButton, UserAvatar, UserDetailsModal, UserFormModal};
use crate::context::use_app_context;
use crate::session::SessionHandle;
use crate::store::{use_app_store, AppStateStoreFields};

#[derive(Debug, Clone, PartialEq)]
enum Dialog {
    Closed,
    Add,
    Edit(User),
    Details(User),
}

fn status_label(is_active: bool) -> &'static str {
    if is_active {
        "Active"
    } else {
        "Disabled"
    }
}

#[component]
pub fn UsersPage(session: SessionHandle) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let team = RwSignal::new(Vec::<User>::new());
    let dialog = RwSignal::new(Dialog::Closed);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let client = session.client();
        spawn_local(async move {
            match api::auth::team(&client).await {
                Ok(loaded) => team.set(loaded),
                Err(e) => ctx.report(session, &e),
            }
        });
    });

    let branch_name = move |id: Option<&str>| -> String {
        let Some(id) = id else {
            return String::new();
        };
        store.branches().with_untracked(|all| {
            all.iter()
                .find(|b| b.id == id)
                .map(|b| b.name.clone())
                .unwrap_or_else(|| id.to_string())
        })
    };

    let toggle_active = move |user: User| {
        let client = session.client();
        let activate = !user.is_active;
        spawn_local(async move {
            match api::auth::set_active(&client, &user.id, activate).await {
                Ok(reply) => {
                    tracing::info!(user = %user.id, activate, "User status changed");
                    ctx.toast_reply(reply, if activate { "User activated" } else { "User disabled" });
                    ctx.reload();
                }
                Err(e) => ctx.report(session, &e),
            }
        });
    };

    let remove = move |id: String| {
        let client = session.client();
        spawn_local(async move {
            match api::auth::delete_user(&client, &id).await {
                Ok(reply) => {
                    team.update(|all| all.retain(|u| u.id != id));
                    ctx.toast_reply(reply, "User deleted");
                }
                Err(e) => ctx.report(session, &e),
            }
        });
    };

    let close = move |_: ()| dialog.set(Dialog::Closed);

    view! {
        <div class="users-page">
            <div class="page-toolbar">
                <h2>"Team Members"</h2>
                <Show when=move || session.is_admin()>
                    <button class="primary-btn" on:click=move |_| dialog.set(Dialog::Add)>
                        "Add New User"
                    </button>
                </Show>
            </div>
            <table class="user-table">
                <thead>
                    <tr>
                        <th>"Full Name"</th>
                        <th>"Title"</th>
                        <th>"Email"</th>
                        <th>"Role"</th>
                        <th>"Branch"</th>
                        <th>"Active"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || team.get()
                        key=|user| (user.id.clone(), user.is_active, user.name.clone())
                        children=move |user| {
                            let details_user = user.clone();
                            let edit_user = user.clone();
                            let toggle_user = user.clone();
                            let delete_id = user.id.clone();
                            let initials = get_initials(&user.name);
                            view! {
                                <tr>
                                    <td class="user-cell">
                                        {match user.profile_picture_url.clone() {
                                            Some(url) => view! { <UserAvatar name=user.name.clone() picture=Some(url) /> }.into_any(),
                                            None => view! { <span class="avatar">{initials}</span> }.into_any(),
                                        }}
                                        <span>{user.name.clone()}</span>
                                    </td>
                                    <td>{user.title.clone()}</td>
                                    <td>{user.email.clone()}</td>
                                    <td>{user.role.as_ref().and_then(|r| r.name()).unwrap_or_default().to_string()}</td>
                                    <td>{branch_name(user.branch.as_deref())}</td>
                                    <td>
                                        <span class=if user.is_active { "status active" } else { "status disabled" }>
                                            {status_label(user.is_active)}
                                        </span>
                                    </td>
                                    <td class="row-actions">
                                        <Show when=move || session.can(names::EVALUATE_PERFORMANCE)>
                                            {
                                                let details_user = details_user.clone();
                                                view! {
                                                    <button
                                                        class="icon-btn"
                                                        on:click=move |_| dialog.set(Dialog::Details(details_user.clone()))
                                                    >
                                                        "Details"
                                                    </button>
                                                }
                                            }
                                        </Show>
                                        <Show when=move || session.is_admin()>
                                            {
                                                let edit_user = edit_user.clone();
                                                let toggle_user = toggle_user.clone();
                                                let delete_id = delete_id.clone();
                                                let toggle_label = if toggle_user.is_active { "Disable" } else { "Activate" };
                                                view! {
                                                    <button
                                                        class="icon-btn"
                                                        on:click=move |_| dialog.set(Dialog::Edit(edit_user.clone()))
                                                    >
                                                        "Edit"
                                                    </button>
                                                    <button
                                                        class="icon-btn"
                                                        on:click=move |_| toggle_active(toggle_user.clone())
                                                    >
                                                        {toggle_label}
                                                    </button>
                                                    <DeleteConfirmButton
                                                        button_class="icon-btn danger"
                                                        on_confirm=move |_| remove(delete_id.clone())
                                                    />
                                                }
                                            }
                                        </Show>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            {move || match dialog.get() {
                Dialog::Closed => None,
                Dialog::Add => Some(view! {
                    <UserFormModal session=session existing=None on_close=close />
                }.into_any()),
                Dialog::Edit(user) => Some(view! {
                    <UserFormModal session=session existing=Some(user) on_close=close />
                }.into_any()),
                Dialog::Details(user) => Some(view! {
                    <UserDetailsModal session=session user=user on_close=close />
                }.into_any()),
            }}
        </div>
    }
}
