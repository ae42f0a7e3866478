//! Role Form Modal
//!
//! Checkboxes are generated from the bundled permission catalog, one
//! fieldset per group. Only checked permissions are sent.

use dashboard_domain::catalog::{selected_grants, PermissionCatalog, PermissionToggle};
use dashboard_domain::forms::{validate_form, RoleForm};
use dashboard_domain::model::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{Modal, TextField};
use crate::context::use_app_context;
use crate::session::SessionHandle;

fn set_toggle(toggles: &mut [PermissionToggle], name: &str, checked: bool) {
    if let Some(toggle) = toggles.iter_mut().find(|t| t.name == name) {
        toggle.checked = checked;
    }
}

#[component]
pub fn RoleFormModal(
    session: SessionHandle,
    branch_id: String,
    existing: Option<Role>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let catalog = match PermissionCatalog::bundled() {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!(error = %e, "Permission catalog unavailable");
            ctx.toast_error(e.to_string());
            PermissionCatalog::default()
        }
    };

    let name = RwSignal::new(existing.as_ref().map(|r| r.name.clone()).unwrap_or_default());
    let description = RwSignal::new(existing.as_ref().map(|r| r.description.clone()).unwrap_or_default());
    let toggles = RwSignal::new(match &existing {
        Some(role) => catalog.toggles_for(role),
        None => catalog.blank_toggles(),
    });
    let editing_id = StoredValue::new(existing.map(|r| r.id));
    let branch_id = StoredValue::new(branch_id);
    let is_edit = editing_id.with_value(Option::is_some);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = RoleForm {
            name: name.get_untracked().trim().to_string(),
            description: description.get_untracked().trim().to_string(),
            permissions: toggles.with_untracked(|t| selected_grants(t)),
            branch_id: branch_id.get_value(),
        };
        if let Err(e) = validate_form(&form) {
            ctx.toast_error(e.to_string());
            return;
        }
        let client = session.client();
        spawn_local(async move {
            let result = match editing_id.get_value() {
                Some(id) => api::role::update(&client, &id, &form).await,
                None => api::role::create(&client, &form).await,
            };
            match result {
                Ok(reply) => {
                    ctx.toast_reply(reply, if is_edit { "Role updated" } else { "Role created" });
                    ctx.reload();
                    on_close.run(());
                }
                Err(e) => ctx.report(session, &e),
            }
        });
    };

    let groups = catalog
        .groups()
        .iter()
        .map(|group| {
            let boxes = group
                .permissions
                .iter()
                .map(|permission| {
                    let checked_name = permission.clone();
                    let toggle_name = permission.clone();
                    view! {
                        <label class="checkbox">
                            <input
                                type="checkbox"
                                prop:checked=move || {
                                    toggles.with(|t| t.iter().any(|p| p.name == checked_name && p.checked))
                                }
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    toggles.update(|t| set_toggle(t, &toggle_name, checked));
                                }
                            />
                            <span>{permission.clone()}</span>
                        </label>
                    }
                })
                .collect_view();
            view! {
                <fieldset class="permission-group">
                    <legend>{group.title.clone()}</legend>
                    {boxes}
                </fieldset>
            }
        })
        .collect_view();

    view! {
        <Modal title=if is_edit { "Edit Role" } else { "New Role" } on_close=on_close wide=true>
            <form class="role-form" on:submit=on_submit>
                <TextField label="Name" value=name />
                <TextField label="Description" value=description />
                <div class="permission-groups">{groups}</div>
                <button type="submit" class="primary-btn">{if is_edit { "Save" } else { "Create" }}</button>
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_toggle_only_touches_named_permission() {
        let mut toggles = PermissionCatalog::bundled().unwrap().blank_toggles();
        set_toggle(&mut toggles, "can view tasks", true);
        set_toggle(&mut toggles, "not a permission", true);
        let grants = selected_grants(&toggles);
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].name, "can view tasks");
    }
}
