use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    dto::{
        request::PageQuery,
        response::{ApiResponse, CoachResponse, UserSummary},
    },
    error::{AppError, AppResult},
    services::{coach, course},
    utils::validate::parse_id,
    ServiceState,
};

const DEFAULT_PER: i64 = 10;

fn page_param(field: &str, value: Option<String>, default: i64) -> AppResult<i64> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::validation(format!("invalid field: {field}"))),
    }
}

pub async fn list(
    State(state): State<Arc<ServiceState>>,
    Query(query): Query<PageQuery>,
) -> AppResult<impl IntoResponse> {
    let per = page_param("per", query.per, DEFAULT_PER)?;
    let page = page_param("page", query.page, 1)?;
    let coaches = coach::list_coaches(state.db.as_ref(), per, page).await?;
    Ok(Json(ApiResponse::success(coaches)))
}

pub async fn detail(
    State(state): State<Arc<ServiceState>>,
    Path(coach_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let coach_id = parse_id("coach_id", &coach_id)?;
    let (user, coach) = coach::coach_detail(state.db.as_ref(), coach_id).await?;
    Ok(Json(ApiResponse::success(CoachResponse {
        user: UserSummary::from(&user),
        coach,
    })))
}

pub async fn courses(
    State(state): State<Arc<ServiceState>>,
    Path(coach_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let coach_id = parse_id("coach_id", &coach_id)?;
    let courses = course::list_coach_courses(state.db.as_ref(), coach_id).await?;
    Ok(Json(ApiResponse::success(courses)))
}
