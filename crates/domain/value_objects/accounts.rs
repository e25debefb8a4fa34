use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::account_roles::AccountRole;
use crate::domain::entities::accounts::AccountEntity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpModel {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginModel {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountDto {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: AccountRole,
    pub created_at: DateTime<Utc>,
}

impl From<AccountEntity> for AccountDto {
    fn from(entity: AccountEntity) -> Self {
        Self {
            id: entity.id,
            role: AccountRole::from_str(&entity.role).unwrap_or_default(),
            email: entity.email,
            name: entity.name,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub account: AccountDto,
}
