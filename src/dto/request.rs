use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

// Fields are optional so that a missing one is reported by name instead of
// failing the whole body.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_new_password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCreditPackageRequest {
    pub name: Option<String>,
    pub credit_amount: Option<i64>,
    pub price: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSkillRequest {
    pub name: Option<String>,
}

/// Body of both the promotion and the coach profile update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoachProfileRequest {
    pub experience_years: Option<i64>,
    pub description: Option<String>,
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseRequest {
    pub skill_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub max_participants: Option<i64>,
    pub meeting_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub per: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RevenueQuery {
    pub month: Option<String>,
}
