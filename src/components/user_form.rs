//! User Form Modal
//!
//! Adds a team member or edits one. New accounts get their email as the
//! initial password, and the credentials are offered as a text download.

use dashboard_domain::forms::{credentials_text, validate_form, UserForm};
use dashboard_domain::model::{Department, Role, User};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, upload::PickedFile, ApiClient, ApiResult};
use crate::components::{download_text, FileField, Modal, SelectField, TextField};
use crate::context::use_app_context;
use crate::session::SessionHandle;
use crate::store::{use_app_store, AppStateStoreFields};

const CREDENTIALS_FILE: &str = "User_Credentials.txt";
const GENDERS: [&str; 2] = ["Male", "Female"];

async fn load_branch_options(client: &ApiClient, branch_id: &str) -> ApiResult<(Vec<Department>, Vec<Role>)> {
    // No branch picked yet: offer everything the organization has
    if branch_id.is_empty() {
        return Ok((api::department::all(client).await?, api::role::all(client).await?));
    }
    let departments = api::department::for_branch(client, branch_id).await?;
    let roles = api::role::for_branch(client, branch_id).await?;
    Ok((departments, roles))
}

#[component]
pub fn UserFormModal(
    session: SessionHandle,
    existing: Option<User>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let is_admin = session.is_admin();

    let field = |get: fn(&User) -> String| RwSignal::new(existing.as_ref().map(get).unwrap_or_default());
    let name = field(|u| u.name.clone());
    let title = field(|u| u.title.clone());
    let email = field(|u| u.email.clone());
    let department = field(|u| u.department.clone());
    let gender = field(|u| u.gender.clone());
    let role = field(|u| u.role.as_ref().map(|r| r.id().to_string()).unwrap_or_default());
    let branch = RwSignal::new(
        existing
            .as_ref()
            .and_then(|u| u.branch.clone())
            .or_else(|| session.branch_id())
            .unwrap_or_default(),
    );
    let make_admin = RwSignal::new(existing.as_ref().is_some_and(|u| u.is_admin));
    let picture = RwSignal::new(Vec::<PickedFile>::new());
    let departments = RwSignal::new(Vec::<Department>::new());
    let roles = RwSignal::new(Vec::<Role>::new());
    let (submitting, set_submitting) = signal(false);

    let existing = StoredValue::new(existing);
    let is_edit = existing.with_value(Option::is_some);

    // Department and role lists follow the chosen branch
    Effect::new(move |_| {
        let branch_id = branch.get();
        let client = session.client();
        spawn_local(async move {
            match load_branch_options(&client, &branch_id).await {
                Ok((loaded_departments, loaded_roles)) => {
                    departments.set(loaded_departments);
                    roles.set(loaded_roles);
                }
                Err(e) => ctx.report(session, &e),
            }
        });
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let branch_id = branch.get_untracked();
        let mut form = UserForm {
            name: name.get_untracked().trim().to_string(),
            title: title.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            department: department.get_untracked(),
            gender: gender.get_untracked(),
            role: role.get_untracked(),
            branch: (!branch_id.is_empty()).then_some(branch_id),
            is_admin: make_admin.get_untracked(),
            profile_picture_url: existing.with_value(|u| u.as_ref().and_then(|u| u.profile_picture_url.clone())),
            password: None,
        };
        if let Err(e) = validate_form(&form) {
            ctx.toast_error(e.to_string());
            return;
        }

        set_submitting.set(true);
        let client = session.client();
        let storage = session.storage();
        let picked = picture.get_untracked().into_iter().next();
        let editing = existing.get_value();
        spawn_local(async move {
            let result: ApiResult<()> = async {
                if let Some(file) = picked {
                    form.profile_picture_url = Some(storage.upload(file).await?);
                }
                match editing {
                    Some(user) => {
                        let reply = api::auth::update_profile(&client, &user.id, &form).await?;
                        if let Some(updated) = reply.user {
                            if session.user_id().as_deref() == Some(updated.id.as_str()) {
                                session.update_user(updated);
                            }
                        }
                        ctx.toast_success(if reply.message.is_empty() {
                            "Profile updated".to_string()
                        } else {
                            reply.message
                        });
                    }
                    None => {
                        let registered = api::auth::register(&client, &form.into_registration()).await?;
                        ctx.toast_success("User created");
                        let text = credentials_text(&registered.email, &registered.password);
                        if let Err(e) = download_text(CREDENTIALS_FILE, &text) {
                            tracing::warn!(error = ?e, "Credentials download failed");
                        }
                    }
                }
                Ok(())
            }
            .await;

            match result {
                Ok(()) => {
                    ctx.reload();
                    on_close.run(());
                }
                Err(e) => ctx.report(session, &e),
            }
            set_submitting.set(false);
        });
    };

    let branch_options = Signal::derive(move || {
        store
            .branches()
            .with(|all| all.iter().map(|b| (b.id.clone(), b.name.clone())).collect())
    });
    let department_options = Signal::derive(move || {
        departments.with(|all| all.iter().map(|d| (d.name.clone(), d.name.clone())).collect())
    });
    let role_options = Signal::derive(move || roles.with(|all| all.iter().map(|r| (r.id.clone(), r.name.clone())).collect()));
    let gender_options: Vec<(String, String)> = GENDERS.iter().map(|g| (g.to_string(), g.to_string())).collect();

    view! {
        <Modal title=if is_edit { "Update Profile" } else { "Add New User" } on_close=on_close wide=true>
            <form class="user-form" on:submit=on_submit>
                <TextField label="Full name" value=name />
                <TextField label="Title" value=title />
                <TextField label="Email address" value=email input_type="email" />
                <SelectField label="Gender" value=gender options=gender_options />
                <Show when=move || is_admin>
                    <SelectField label="Branch" value=branch options=branch_options />
                </Show>
                <SelectField label="Department" value=department options=department_options />
                <SelectField label="Role" value=role options=role_options />
                <Show when=move || is_admin>
                    <label class="checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || make_admin.get()
                            on:change=move |ev| make_admin.set(event_target_checked(&ev))
                        />
                        <span>"Administrator"</span>
                    </label>
                </Show>
                <FileField label="Profile picture" files=picture />
                <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Saving..." } else { "Submit" }}
                </button>
            </form>
        </Modal>
    }
}
