//! Session Handle
//!
//! The app builds one [`SessionHandle`] and hands it to every page as a prop.
//! It reads the session out of the store, persists it under `userInfo`, and
//! builds API clients carrying the bearer token.

use chrono::Utc;
use dashboard_domain::model::{AuthUser, User};
use dashboard_domain::permissions::{Gate, GrantedPermissions};
use dashboard_domain::session::Session;
use dashboard_domain::DomainResult;
use leptos::prelude::*;

use crate::api::upload::ObjectStorage;
use crate::api::{ApiClient, ApiError, ApiResult};
use crate::config::AppConfig;
use crate::store::{AppStateStoreFields, AppStore};

pub const USER_INFO_KEY: &str = "userInfo";

/// `window.localStorage`, limited to the session key
pub struct LocalStore;

impl LocalStore {
    fn storage() -> ApiResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| ApiError::Storage("no window".into()))?
            .local_storage()
            .map_err(|e| ApiError::Storage(format!("{e:?}")))?
            .ok_or_else(|| ApiError::Storage("localStorage is disabled".into()))
    }

    pub fn load() -> ApiResult<Option<String>> {
        Self::storage()?
            .get_item(USER_INFO_KEY)
            .map_err(|e| ApiError::Storage(format!("{e:?}")))
    }

    pub fn save(json: &str) -> ApiResult<()> {
        Self::storage()?
            .set_item(USER_INFO_KEY, json)
            .map_err(|e| ApiError::Storage(format!("{e:?}")))
    }

    pub fn clear() -> ApiResult<()> {
        Self::storage()?
            .remove_item(USER_INFO_KEY)
            .map_err(|e| ApiError::Storage(format!("{e:?}")))
    }
}

fn persist(session: &Session) {
    let saved = session
        .to_json()
        .map_err(|e| ApiError::Storage(e.to_string()))
        .and_then(|json| LocalStore::save(&json));
    if let Err(e) = saved {
        tracing::warn!(error = %e, "Session not persisted");
    }
}

#[derive(Clone, Copy)]
pub struct SessionHandle {
    store: AppStore,
    config: StoredValue<AppConfig>,
}

impl SessionHandle {
    pub fn new(store: AppStore, config: StoredValue<AppConfig>) -> Self {
        Self { store, config }
    }

    /// Load the persisted session. Expired or unreadable entries are removed.
    pub fn restore(&self) -> bool {
        let stored = LocalStore::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not read stored session");
            None
        });

        match Session::restore(stored.as_deref(), Utc::now()) {
            Some(session) => {
                tracing::info!(user = %session.user_id(), "Session restored");
                self.store.session().set(Some(session));
                true
            }
            None => {
                if stored.is_some() {
                    let _ = LocalStore::clear();
                }
                false
            }
        }
    }

    pub fn sign_in(&self, user: AuthUser) -> DomainResult<()> {
        let session = Session::new(user, Utc::now())?;
        persist(&session);
        tracing::info!(user = %session.user_id(), admin = session.is_admin(), "Signed in");
        self.store.session().set(Some(session));
        Ok(())
    }

    pub fn sign_out(&self) {
        if let Err(e) = LocalStore::clear() {
            tracing::warn!(error = %e, "Stored session not cleared");
        }
        self.store.session().set(None);
        tracing::info!("Signed out");
    }

    /// Replace the profile after an edit, keeping the token
    pub fn update_user(&self, user: User) {
        let updated = self.store.session().try_update(|session| {
            let session = session.as_mut()?;
            let auth = AuthUser {
                user,
                token: session.token().map(str::to_string),
            };
            let rebuilt = Session::new(auth, Utc::now()).ok()?;
            *session = rebuilt.clone();
            Some(rebuilt)
        });
        if let Some(Some(session)) = updated {
            persist(&session);
        }
    }

    /// Sign out on 401; returns whether it did
    pub fn expire_on_unauthorized(&self, err: &ApiError) -> bool {
        if err.is_unauthorized() {
            self.sign_out();
            return true;
        }
        false
    }

    // ========================
    // Reactive reads
    // ========================

    pub fn is_authenticated(&self) -> bool {
        self.store.session().with(Option::is_some)
    }

    pub fn can(&self, name: &str) -> bool {
        self.store.session().with(|s| s.as_ref().is_some_and(|s| s.can(name)))
    }

    pub fn permits(&self, gate: Gate) -> bool {
        self.store
            .session()
            .with(|s| s.as_ref().is_some_and(|s| gate.permits(s.permissions(), s.is_admin())))
    }

    pub fn is_admin(&self) -> bool {
        self.store.session().with(|s| s.as_ref().is_some_and(Session::is_admin))
    }

    pub fn user(&self) -> Option<User> {
        self.store.session().with(|s| s.as_ref().map(|s| s.user.user.clone()))
    }

    pub fn user_id(&self) -> Option<String> {
        self.store.session().with(|s| s.as_ref().map(|s| s.user_id().to_string()))
    }

    pub fn branch_id(&self) -> Option<String> {
        self.store
            .session()
            .with(|s| s.as_ref().and_then(|s| s.branch_id()).map(str::to_string))
    }

    pub fn permissions(&self) -> GrantedPermissions {
        self.store
            .session()
            .with(|s| s.as_ref().map(|s| s.permissions().clone()).unwrap_or_default())
    }

    // ========================
    // Clients
    // ========================

    /// Client for the REST backend with the current token
    pub fn client(&self) -> ApiClient {
        let token = self
            .store
            .session()
            .with_untracked(|s| s.as_ref().and_then(|s| s.token()).map(str::to_string));
        ApiClient::new(self.config.with_value(|c| c.api_base_url.clone()), token)
    }

    pub fn storage(&self) -> ObjectStorage {
        ObjectStorage::new(self.config.with_value(|c| c.storage_bucket.clone()))
    }
}
