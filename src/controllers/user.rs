use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::info;

use crate::{
    dto::{
        request::{ChangePasswordRequest, LoginRequest, RefreshRequest, SignupRequest, UpdateProfileRequest},
        response::{ApiResponse, ProfileResponse, TokenResponse, UserResponse, UserSummary},
    },
    error::AppResult,
    services::{
        account::{self, PasswordChange},
        booking, credit,
    },
    utils::{auth::CurrentUser, extract::AppJson, validate::require},
    ServiceState,
};

pub async fn signup(
    State(state): State<Arc<ServiceState>>,
    AppJson(req): AppJson<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    info!("Received 'signup' request");
    let name = require("name", req.name)?;
    let email = require("email", req.email)?;
    let password = require("password", req.password)?;

    let user = account::signup(
        state.db.as_ref(),
        state.config.secret.bcrypt_cost,
        &name,
        &email,
        &password,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserResponse {
            user: UserSummary::from(&user),
        })),
    ))
}

pub async fn login(
    State(state): State<Arc<ServiceState>>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let email = require("email", req.email)?;
    let password = require("password", req.password)?;

    let user = account::login(state.db.as_ref(), &email, &password).await?;
    let tokens = account::issue_tokens(&state.config.jwt, &user)?;
    info!("user {} logged in", user.id);

    Ok(Json(ApiResponse::success(TokenResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        user: UserSummary::from(&user),
    })))
}

pub async fn refresh(
    State(state): State<Arc<ServiceState>>,
    AppJson(req): AppJson<RefreshRequest>,
) -> AppResult<impl IntoResponse> {
    let refresh_token = require("refresh_token", req.refresh_token)?;
    let (user, tokens) =
        account::refresh(state.db.as_ref(), &state.config.jwt, &refresh_token).await?;
    info!("tokens refreshed for user {}", user.id);

    Ok(Json(ApiResponse::success(TokenResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        user: UserSummary::from(&user),
    })))
}

pub async fn get_profile(CurrentUser(user): CurrentUser) -> AppResult<impl IntoResponse> {
    Ok(Json(ApiResponse::success(ProfileResponse {
        email: user.email,
        name: user.name,
        role: user.role,
    })))
}

pub async fn update_profile(
    State(state): State<Arc<ServiceState>>,
    CurrentUser(user): CurrentUser,
    AppJson(req): AppJson<UpdateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let name = require("name", req.name)?;
    let user = account::rename(state.db.as_ref(), user, &name).await?;
    info!("user {} renamed", user.id);
    Ok(Json(ApiResponse::ok()))
}

pub async fn change_password(
    State(state): State<Arc<ServiceState>>,
    CurrentUser(user): CurrentUser,
    AppJson(req): AppJson<ChangePasswordRequest>,
) -> AppResult<impl IntoResponse> {
    let password = require("password", req.password)?;
    let new_password = require("new_password", req.new_password)?;
    let confirm_new_password = require("confirm_new_password", req.confirm_new_password)?;

    account::change_password(
        state.db.as_ref(),
        state.config.secret.bcrypt_cost,
        user.id,
        PasswordChange {
            password: &password,
            new_password: &new_password,
            confirm_new_password: &confirm_new_password,
        },
    )
    .await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn purchase_history(
    State(state): State<Arc<ServiceState>>,
    CurrentUser(user): CurrentUser,
) -> AppResult<impl IntoResponse> {
    let history = credit::purchase_history(state.db.as_ref(), user.id).await?;
    Ok(Json(ApiResponse::success(history)))
}

pub async fn course_overview(
    State(state): State<Arc<ServiceState>>,
    CurrentUser(user): CurrentUser,
) -> AppResult<impl IntoResponse> {
    let overview = booking::user_course_overview(state.db.as_ref(), user.id).await?;
    Ok(Json(ApiResponse::success(overview)))
}
