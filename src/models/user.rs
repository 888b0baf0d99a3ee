//! Roles, profiles, and the auth endpoint payloads.

use serde::{Deserialize, Serialize};

/// Client-side view of a caller's privilege. Re-derived from `/auth/me`
/// on every context resolution and never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum Role {
    /// Not signed in, or a role this client does not recognise
    #[default]
    Guest,
    /// Can book stays and manage their own bookings
    User,
    /// Can additionally create, edit and delete hotels
    Admin,
}

impl Role {
    /// Whether this caller may attempt something gated on `required`.
    pub fn has_at_least(&self, required: Role) -> bool {
        self.level() >= required.level()
    }

    /// Rank in the Guest < User < Admin ordering.
    pub fn level(&self) -> u8 {
        match self {
            Role::Admin => 2,
            Role::User => 1,
            Role::Guest => 0,
        }
    }

    pub fn can_manage_hotels(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "user" => Role::User,
            _ => Role::Guest,
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::from(s.as_str())
    }
}

impl From<Option<String>> for Role {
    fn from(s: Option<String>) -> Self {
        s.map(Role::from).unwrap_or_default()
    }
}

/// The `data` object of `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub tel: String,
    pub password: String,
    pub role: Role,
}
