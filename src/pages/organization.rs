//! Organization Page
//!
//! Branch list with create, edit and delete. Users without the all-branches
//! grant only see their own branch.

use dashboard_domain::catalog::names;
use dashboard_domain::model::Branch;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{BranchFormModal, DeleteConfirmButton};
use crate::context::use_app_context;
use crate::pages::Page;
use crate::session::SessionHandle;
use crate::store::{store_remove_branch, use_app_store, AppStateStoreFields};

#[derive(Debug, Clone, PartialEq)]
enum Editing {
    Closed,
    New,
    Existing(Branch),
}

#[component]
pub fn OrganizationPage(session: SessionHandle) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let editing = RwSignal::new(Editing::Closed);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let client = session.client();
        spawn_local(async move {
            match api::branch::list(&client).await {
                Ok(branches) => {
                    tracing::debug!(count = branches.len(), "Loaded branches");
                    store.branches().set(branches);
                }
                Err(e) => ctx.report(session, &e),
            }
        });
    });

    let listed = Memo::new(move |_| {
        let sees_all = session.is_admin() || session.can(names::VIEW_ALL_BRANCHES);
        let own = session.branch_id();
        store.branches().with(|all| {
            all.iter()
                .filter(|b| sees_all || own.as_deref() == Some(b.id.as_str()))
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    let remove = move |id: String| {
        let client = session.client();
        spawn_local(async move {
            match api::branch::delete(&client, &id).await {
                Ok(reply) => {
                    store_remove_branch(&store, &id);
                    ctx.toast_reply(reply, "Branch deleted");
                }
                Err(e) => ctx.report(session, &e),
            }
        });
    };

    view! {
        <div class="organization-page">
            <div class="page-toolbar">
                <h2>"Branches"</h2>
                <Show when=move || session.can(names::CREATE_BRANCHES)>
                    <button class="primary-btn" on:click=move |_| editing.set(Editing::New)>
                        "Add Branch"
                    </button>
                </Show>
            </div>
            <Show
                when=move || session.can(names::VIEW_BRANCHES)
                fallback=|| view! { <p class="empty-state">"You cannot view branches."</p> }
            >
                <table class="branch-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Description"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || listed.get()
                            key=|b| (b.id.clone(), b.name.clone(), b.description.clone())
                            children=move |branch| {
                                let open_id = branch.id.clone();
                                let edit_branch = branch.clone();
                                let delete_id = branch.id.clone();
                                view! {
                                    <tr
                                        class="branch-row"
                                        on:click=move |_| {
                                            if session.can(names::VIEW_BRANCH_DETAILS) {
                                                ctx.navigate(Page::BranchDetail(open_id.clone()));
                                            }
                                        }
                                    >
                                        <td>{branch.name.clone()}</td>
                                        <td>{branch.description.clone()}</td>
                                        <td class="row-actions" on:click=|ev| ev.stop_propagation()>
                                            <Show when=move || session.can(names::UPDATE_BRANCHES)>
                                                {
                                                    let edit_branch = edit_branch.clone();
                                                    view! {
                                                        <button
                                                            class="icon-btn"
                                                            on:click=move |_| editing.set(Editing::Existing(edit_branch.clone()))
                                                        >
                                                            "Edit"
                                                        </button>
                                                    }
                                                }
                                            </Show>
                                            <Show when=move || session.can(names::DELETE_BRANCHES)>
                                                {
                                                    let delete_id = delete_id.clone();
                                                    view! {
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
            </Show>

            {move || match editing.get() {
                Editing::Closed => None,
                Editing::New => Some(view! {
                    <BranchFormModal session=session existing=None on_close=move |_| editing.set(Editing::Closed) />
                }),
                Editing::Existing(branch) => Some(view! {
                    <BranchFormModal
                        session=session
                        existing=Some(branch)
                        on_close=move |_| editing.set(Editing::Closed)
                    />
                }),
            }}
        </div>
    }
}
