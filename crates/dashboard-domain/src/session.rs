//! Session
//!
//! The authenticated user and the permissions derived from it. The bearer
//! token is a JWT; only its `exp` claim is read here, signature checks are
//! the backend's job.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::model::AuthUser;
use crate::permissions::GrantedPermissions;
use crate::{DomainError, DomainResult};

#[derive(Debug, Deserialize)]
struct Claims {
    exp: f64,
}

/// Expiry instant from the token's `exp` claim
pub fn token_expiry(token: &str) -> DomainResult<DateTime<Utc>> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| DomainError::Session("token has no payload segment".into()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| DomainError::parse("token payload", e))?;
    let claims: Claims = serde_json::from_slice(&bytes).map_err(|e| DomainError::parse("token claims", e))?;

    DateTime::from_timestamp(claims.exp as i64, 0)
        .ok_or_else(|| DomainError::Session(format!("exp {} out of range", claims.exp)))
}

/// Undecodable tokens count as expired
pub fn is_token_expired(token: &str, now: DateTime<Utc>) -> bool {
    match token_expiry(token) {
        Ok(expiry) => now >= expiry,
        Err(_) => true,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: AuthUser,
    permissions: GrantedPermissions,
}

impl Session {
    /// Rejects a login response whose token is already expired
    pub fn new(user: AuthUser, now: DateTime<Utc>) -> DomainResult<Self> {
        if let Some(token) = user.token.as_deref() {
            if is_token_expired(token, now) {
                return Err(DomainError::Session("token expired".into()));
            }
        }
        let permissions = GrantedPermissions::from_grants(&user.user.permissions);
        Ok(Self { user, permissions })
    }

    /// Rebuild from the persisted `userInfo` value.
    ///
    /// `None` when nothing is stored, it doesn't parse, or its token expired.
    pub fn restore(stored: Option<&str>, now: DateTime<Utc>) -> Option<Self> {
        let raw = stored?;
        let user: AuthUser = match serde_json::from_str(raw) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable stored session");
                return None;
            }
        };
        match Self::new(user, now) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::info!(error = %e, "Stored session not restored");
                None
            }
        }
    }

    pub fn to_json(&self) -> DomainResult<String> {
        serde_json::to_string(&self.user).map_err(|e| DomainError::parse("session", e))
    }

    pub fn permissions(&self) -> &GrantedPermissions {
        &self.permissions
    }

    pub fn can(&self, name: &str) -> bool {
        self.permissions.allows(name)
    }

    pub fn is_admin(&self) -> bool {
        self.user.user.is_admin
    }

    pub fn user_id(&self) -> &str {
        &self.user.user.id
    }

    pub fn branch_id(&self) -> Option<&str> {
        self.user.user.branch.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.user.token.as_deref()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.token().is_some_and(|t| is_token_expired(t, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn token_with_exp(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"id":"u1","exp":{exp}}}"#));
        format!("{header}.{payload}.signature")
    }

    fn stored_user(token: &str) -> String {
        serde_json::json!({
            "_id": "u1",
            "name": "Jane Doe",
            "branch": "b1",
            "permissions": [
                {"name": "can view tasks", "value": true},
                {"name": "can delete task", "value": false}
            ],
            "token": token,
        })
        .to_string()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_token_expiry_decodes_exp() {
        let exp = now().timestamp() + 3600;
        assert_eq!(token_expiry(&token_with_exp(exp)).unwrap().timestamp(), exp);
        assert!(!is_token_expired(&token_with_exp(exp), now()));
        assert!(is_token_expired(&token_with_exp(now().timestamp()), now()));
    }

    #[test]
    fn test_malformed_tokens_are_expired() {
        assert!(is_token_expired("", now()));
        assert!(is_token_expired("only-one-segment", now()));
        assert!(is_token_expired("a.!!!.c", now()));
        assert!(is_token_expired(&format!("a.{}.c", URL_SAFE_NO_PAD.encode("{}")), now()));
    }

    #[test]
    fn test_restore() {
        let valid = stored_user(&token_with_exp(now().timestamp() + 60));
        let session = Session::restore(Some(&valid), now()).unwrap();
        assert_eq!(session.branch_id(), Some("b1"));
        assert!(session.can("can view tasks"));
        assert!(!session.can("can delete task"));

        let expired = stored_user(&token_with_exp(now().timestamp() - 60));
        assert!(Session::restore(Some(&expired), now()).is_none());
        assert!(Session::restore(Some(&stored_user("garbage")), now()).is_none());
        assert!(Session::restore(Some("{not json"), now()).is_none());
        assert!(Session::restore(None, now()).is_none());
    }

    #[test]
    fn test_session_persists_as_user_info() {
        let stored = stored_user(&token_with_exp(now().timestamp() + 60));
        let session = Session::restore(Some(&stored), now()).unwrap();
        let again = Session::restore(Some(&session.to_json().unwrap()), now()).unwrap();
        assert_eq!(again, session);
    }
}
