use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::{
    dto::{
        request::{CoachProfileRequest, CourseRequest, RevenueQuery},
        response::{ApiResponse, CoachResponse, RevenueResponse, UserSummary},
    },
    error::AppResult,
    repositories,
    services::{
        coach::{self, CoachProfile},
        course::{self, CourseDraft},
    },
    utils::{
        auth::CurrentCoach,
        extract::AppJson,
        validate::{parse_id, require},
    },
    ServiceState,
};

fn coach_profile(req: CoachProfileRequest) -> AppResult<CoachProfile> {
    Ok(CoachProfile {
        experience_years: require("experience_years", req.experience_years)?,
        description: require("description", req.description)?,
        profile_image_url: req.profile_image_url,
    })
}

fn course_draft(req: CourseRequest) -> AppResult<CourseDraft> {
    Ok(CourseDraft {
        skill_id: require("skill_id", req.skill_id)?,
        name: require("name", req.name)?,
        description: require("description", req.description)?,
        start_at: require("start_at", req.start_at)?,
        end_at: require("end_at", req.end_at)?,
        max_participants: require("max_participants", req.max_participants)?,
        meeting_url: require("meeting_url", req.meeting_url)?,
    })
}

pub async fn promote(
    State(state): State<Arc<ServiceState>>,
    Path(user_id): Path<String>,
    AppJson(req): AppJson<CoachProfileRequest>,
) -> AppResult<impl IntoResponse> {
    info!("Received 'promote to coach' request for user {}", user_id);
    let user_id = parse_id("user_id", &user_id)?;
    let profile = coach_profile(req)?;
    let (user, coach) = coach::promote_to_coach(state.db.as_ref(), user_id, profile).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CoachResponse {
            user: UserSummary::from(&user),
            coach,
        })),
    ))
}

pub async fn get_profile(current: CurrentCoach) -> AppResult<impl IntoResponse> {
    Ok(Json(ApiResponse::success(CoachResponse {
        user: UserSummary::from(&current.user),
        coach: current.coach,
    })))
}

pub async fn update_profile(
    State(state): State<Arc<ServiceState>>,
    current: CurrentCoach,
    AppJson(req): AppJson<CoachProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let profile = coach_profile(req)?;
    let coach = coach::update_coach_profile(state.db.as_ref(), current.coach, profile).await?;
    info!("coach {} updated profile", coach.id);
    Ok(Json(ApiResponse::success(CoachResponse {
        user: UserSummary::from(&current.user),
        coach,
    })))
}

pub async fn create_course(
    State(state): State<Arc<ServiceState>>,
    current: CurrentCoach,
    AppJson(req): AppJson<CourseRequest>,
) -> AppResult<impl IntoResponse> {
    let draft = course_draft(req)?;
    let course = course::create_course(state.db.as_ref(), &current.coach, draft).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(course))))
}

pub async fn list_courses(
    State(state): State<Arc<ServiceState>>,
    current: CurrentCoach,
) -> AppResult<impl IntoResponse> {
    let courses = repositories::course::find_by_coach_id(state.db.as_ref(), current.coach.id).await?;
    Ok(Json(ApiResponse::success(courses)))
}

pub async fn course_detail(
    State(state): State<Arc<ServiceState>>,
    current: CurrentCoach,
    Path(course_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let course_id = parse_id("course_id", &course_id)?;
    let course = course::find_own_course(state.db.as_ref(), &current.coach, course_id).await?;
    Ok(Json(ApiResponse::success(course)))
}

pub async fn update_course(
    State(state): State<Arc<ServiceState>>,
    current: CurrentCoach,
    Path(course_id): Path<String>,
    AppJson(req): AppJson<CourseRequest>,
) -> AppResult<impl IntoResponse> {
    let course_id = parse_id("course_id", &course_id)?;
    let draft = course_draft(req)?;
    let course =
        course::update_course(state.db.as_ref(), &current.coach, course_id, draft).await?;
    Ok(Json(ApiResponse::success(course)))
}

pub async fn revenue(
    State(state): State<Arc<ServiceState>>,
    current: CurrentCoach,
    Query(query): Query<RevenueQuery>,
) -> AppResult<impl IntoResponse> {
    let month = coach::parse_month(&require("month", query.month)?)?;
    let total = coach::coach_revenue(
        state.db.as_ref(),
        current.coach.id,
        coach::current_year(),
        month,
    )
    .await?;
    Ok(Json(ApiResponse::success(RevenueResponse { total })))
}
