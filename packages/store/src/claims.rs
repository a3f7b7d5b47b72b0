//! # Token claims: expiry and role, decoded without verification
//!
//! The console never verifies token signatures; that is the API's job. It
//! only peeks at the payload segment to answer two questions locally:
//!
//! - [`is_expired`]: has the `exp` claim passed? Any decoding problem
//!   answers "yes" so a broken token can never keep a session alive.
//! - [`is_admin`]: does the role claim name `Admin`? Any decoding problem
//!   answers "no" so a broken token can never unlock admin navigation.
//!
//! The role claim is read from `role` or, when the API issues
//! ASP.NET-style tokens, from the long schema URI in [`ROLE_CLAIM_URI`].

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::session::Role;

/// Claim key used for roles by ASP.NET identity tokens.
pub const ROLE_CLAIM_URI: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";

/// Role name that unlocks the management views.
pub const ADMIN_ROLE: &str = "Admin";

/// The subset of token claims the console reads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenClaims {
    /// Expiry, seconds since the Unix epoch.
    pub exp: Option<f64>,
    /// Role names, in claim order. A single-string claim yields one entry.
    pub roles: Vec<String>,
}

impl TokenClaims {
    /// Decode the payload segment of a `header.payload.signature` token.
    pub fn decode(token: &str) -> Result<Self, StoreError> {
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| StoreError::MalformedToken("missing payload segment".into()))?;

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| StoreError::MalformedToken(e.to_string()))?;

        let claims: Map<String, Value> = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::MalformedToken(e.to_string()))?;

        let exp = claims.get("exp").and_then(Value::as_f64);
        let roles = claims
            .get("role")
            .or_else(|| claims.get(ROLE_CLAIM_URI))
            .map(roles_from)
            .unwrap_or_default();

        Ok(Self { exp, roles })
    }

    /// Whether the token expired at or before `now` (seconds since epoch).
    /// A token without an `exp` claim counts as expired.
    pub fn expired_at(&self, now: i64) -> bool {
        match self.exp {
            Some(exp) => exp <= now as f64,
            None => true,
        }
    }

    /// Exact, case-sensitive match on [`ADMIN_ROLE`].
    pub fn has_admin_role(&self) -> bool {
        self.roles.iter().any(|r| r == ADMIN_ROLE)
    }
}

fn roles_from(value: &Value) -> Vec<String> {
    match value {
        Value::String(role) => vec![role.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Current time in seconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
pub fn now_epoch_secs() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

/// Current time in seconds since the Unix epoch.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_epoch_secs() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Whether `token` is expired right now. Malformed tokens are expired.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, now_epoch_secs())
}

/// [`is_expired`] against an explicit clock.
pub fn is_expired_at(token: &str, now: i64) -> bool {
    match TokenClaims::decode(token) {
        Ok(claims) => claims.expired_at(now),
        Err(e) => {
            tracing::debug!("treating undecodable token as expired: {e}");
            true
        }
    }
}

/// Whether `token` carries the admin role. Malformed tokens are not admin.
pub fn is_admin(token: &str) -> bool {
    TokenClaims::decode(token)
        .map(|claims| claims.has_admin_role())
        .unwrap_or(false)
}

/// Navigation role carried by `token`. Anything undecodable is a member.
pub fn role(token: &str) -> Role {
    if is_admin(token) {
        Role::Admin
    } else {
        Role::Member
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build an unsigned token around the given payload.
    pub(crate) fn token_with(payload: Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.signature")
    }

    #[test]
    fn test_expiry_boundary() {
        let token = token_with(serde_json::json!({ "exp": 1_000 }));
        assert!(!is_expired_at(&token, 999));
        assert!(is_expired_at(&token, 1_000));
        assert!(is_expired_at(&token, 1_001));
    }

    #[test]
    fn test_malformed_tokens_are_expired() {
        assert!(is_expired_at("", 0));
        assert!(is_expired_at("not-a-token", 0));
        assert!(is_expired_at("a.!!!.c", 0));
        let not_json = format!("a.{}.c", URL_SAFE_NO_PAD.encode("plain text"));
        assert!(is_expired_at(&not_json, 0));
    }

    #[test]
    fn test_missing_exp_is_expired() {
        let token = token_with(serde_json::json!({ "role": "Admin" }));
        assert!(is_expired_at(&token, 0));
    }

    #[test]
    fn test_padded_payload_decodes() {
        let token = token_with(serde_json::json!({ "exp": 5 }));
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        while parts[1].len() % 4 != 0 {
            parts[1].push('=');
        }
        let padded = parts.join(".");
        assert!(!is_expired_at(&padded, 4));
    }

    #[test]
    fn test_admin_role_string() {
        let token = token_with(serde_json::json!({ "exp": 10, "role": "Admin" }));
        assert!(is_admin(&token));
    }

    #[test]
    fn test_admin_role_in_collection() {
        let token = token_with(serde_json::json!({ "role": ["Member", "Admin"] }));
        assert!(is_admin(&token));
    }

    #[test]
    fn test_admin_role_uri_claim() {
        let mut payload = Map::new();
        payload.insert(ROLE_CLAIM_URI.to_string(), Value::from("Admin"));
        assert!(is_admin(&token_with(Value::Object(payload))));
    }

    #[test]
    fn test_non_admin_roles() {
        for role in [
            serde_json::json!("admin"),
            serde_json::json!("Member"),
            serde_json::json!(["admin", "ADMIN"]),
            serde_json::json!(42),
            serde_json::json!([]),
        ] {
            let token = token_with(serde_json::json!({ "role": role }));
            assert!(!is_admin(&token), "role {role} must not be admin");
        }
        assert!(!is_admin("garbage"));
        assert!(!is_admin(&token_with(serde_json::json!({ "exp": 1 }))));
    }

    #[test]
    fn test_role_follows_admin_claim() {
        let admin = token_with(serde_json::json!({ "role": "Admin" }));
        assert_eq!(role(&admin), Role::Admin);
        assert_eq!(role("garbage"), Role::Member);
    }
}
