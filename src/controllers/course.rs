use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    dto::response::ApiResponse,
    error::AppResult,
    services::{booking, course},
    utils::{auth::CurrentUser, validate::parse_id},
    ServiceState,
};

pub async fn list(State(state): State<Arc<ServiceState>>) -> AppResult<impl IntoResponse> {
    let courses = course::list_courses(state.db.as_ref()).await?;
    Ok(Json(ApiResponse::success(courses)))
}

pub async fn book(
    State(state): State<Arc<ServiceState>>,
    CurrentUser(user): CurrentUser,
    Path(course_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let course_id = parse_id("course_id", &course_id)?;
    let booking = booking::book_course(state.db.as_ref(), user.id, course_id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(booking))))
}

pub async fn cancel(
    State(state): State<Arc<ServiceState>>,
    CurrentUser(user): CurrentUser,
    Path(course_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let course_id = parse_id("course_id", &course_id)?;
    booking::cancel_booking(state.db.as_ref(), user.id, course_id).await?;
    Ok(Json(ApiResponse::ok()))
}
