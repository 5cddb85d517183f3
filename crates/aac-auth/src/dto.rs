use super::*;
use aac_core::Unique;

#[derive(Debug, serde::Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub password: String,
    pub email: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

#[derive(Debug, serde::Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

#[derive(Debug, serde::Deserialize)]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, serde::Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub tier: i32,
    pub character_count: i64,
    pub created_at: i64,
}

impl AccountResponse {
    pub fn of(account: &Account, characters: i64) -> Self {
        Self {
            id: account.id().to_string(),
            name: account.name().to_string(),
            email: account.email().map(str::to_string),
            tier: account.tier(),
            character_count: characters,
            created_at: aac_core::epoch_secs(account.created()),
        }
    }
}
