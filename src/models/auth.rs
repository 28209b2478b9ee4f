use serde::{Deserialize, Serialize};

use super::EntityId;

/// The signed-in dashboard user (not necessarily an employee).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    #[serde(alias = "email_corporativo")]
    pub email: String,
    pub full_name: String,
    /// `admin`, `diretoria`, `gerente` or `colaborador`.
    pub role: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response to a successful login: a bearer token plus the user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}
