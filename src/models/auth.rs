//! Authentication-related types.

use serde::{Deserialize, Serialize};

/// Credentials submitted to the login endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Payload of a successful login envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent calls.
    pub token: String,
}

/// Denormalized snapshot of the signed-in administrator.
///
/// Cached by the session store after an explicit profile fetch; never
/// refreshed implicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Role set for menu/guard decisions in the embedding console.
    #[serde(default)]
    pub roles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_roles_default_empty() {
        let p: AdminProfile = serde_json::from_str(r#"{"id":1,"username":"root"}"#).unwrap();
        assert!(p.roles.is_empty());
        assert!(p.nickname.is_none());
    }

    #[test]
    fn test_profile_round_trip() {
        let p = AdminProfile {
            id: 3,
            username: "ops".into(),
            nickname: Some("Ops".into()),
            avatar: None,
            roles: vec!["admin".into()],
        };
        let json = serde_json::to_string(&p).unwrap();
        assert!(!json.contains("avatar"));
        let back: AdminProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
