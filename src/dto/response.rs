use serde::Serialize;
use uuid::Uuid;

use crate::{
    entity::{coach, user},
    services::coach::Revenue,
};

/// Success envelope. `data` is left out for operations with nothing to return.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn ok() -> Self {
        Self {
            status: "success",
            data: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub role: user::Role,
}

impl From<&user::Model> for UserSummary {
    fn from(user: &user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user: UserSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub email: String,
    pub name: String,
    pub role: user::Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoachResponse {
    pub user: UserSummary,
    pub coach: coach::Model,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenueResponse {
    pub total: Revenue,
}
