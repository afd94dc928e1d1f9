use chrono::{DateTime, Utc};
use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    entity::{coach, course},
    error::{AppError, AppResult},
    repositories::{self, course::CourseFields},
    utils::validate::{check, max_len, FieldKind},
};

/// Course input as received from a coach, before validation.
#[derive(Debug, Clone)]
pub struct CourseDraft {
    pub skill_id: Uuid,
    pub name: String,
    pub description: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub max_participants: i64,
    pub meeting_url: String,
}

impl CourseDraft {
    fn into_fields(self) -> AppResult<CourseFields> {
        check("name", FieldKind::NonEmptyString(&self.name))?;
        max_len("name", self.name.trim(), 100)?;
        check("description", FieldKind::NonEmptyString(&self.description))?;
        check("max_participants", FieldKind::PositiveInteger(self.max_participants))?;
        check("meeting_url", FieldKind::SecureUrl(&self.meeting_url))?;
        max_len("meeting_url", self.meeting_url.trim(), 2048)?;
        if self.start_at >= self.end_at {
            return Err(AppError::validation("start_at must be earlier than end_at"));
        }
        let max_participants = i32::try_from(self.max_participants)
            .map_err(|_| AppError::validation("invalid field: max_participants"))?;

        Ok(CourseFields {
            skill_id: self.skill_id,
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            start_at: self.start_at,
            end_at: self.end_at,
            max_participants,
            meeting_url: self.meeting_url.trim().to_string(),
        })
    }
}

async fn ensure_skill<C: ConnectionTrait>(db: &C, skill_id: Uuid) -> AppResult<()> {
    if repositories::skill::find_by_id(db, skill_id).await?.is_none() {
        return Err(AppError::not_found("skill not found"));
    }
    Ok(())
}

pub async fn create_course<C: ConnectionTrait>(
    db: &C,
    coach: &coach::Model,
    draft: CourseDraft,
) -> AppResult<course::Model> {
    let fields = draft.into_fields()?;
    ensure_skill(db, fields.skill_id).await?;
    let course = repositories::course::save(db, coach.id, fields).await?;
    info!("coach {} created course {}", coach.id, course.id);
    Ok(course)
}

/// A course of another coach is reported as missing.
pub async fn find_own_course<C: ConnectionTrait>(
    db: &C,
    coach: &coach::Model,
    course_id: Uuid,
) -> AppResult<course::Model> {
    repositories::course::find_by_id(db, course_id)
        .await?
        .filter(|course| course.coach_id == coach.id)
        .ok_or_else(|| AppError::not_found("course not found"))
}

/// Replaces every editable field of a course the coach owns. Capacity may be
/// lowered below the current number of seats taken; existing bookings stay.
pub async fn update_course<C: ConnectionTrait>(
    db: &C,
    coach: &coach::Model,
    course_id: Uuid,
    draft: CourseDraft,
) -> AppResult<course::Model> {
    let fields = draft.into_fields()?;
    let course = find_own_course(db, coach, course_id).await?;
    ensure_skill(db, fields.skill_id).await?;
    let course = repositories::course::update(db, course, fields).await?;
    info!("coach {} updated course {}", coach.id, course.id);
    Ok(course)
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseListing {
    pub id: Uuid,
    pub coach_name: Option<String>,
    pub skill_name: Option<String>,
    pub name: String,
    pub description: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub max_participants: i32,
}

async fn with_names<C: ConnectionTrait>(
    db: &C,
    courses: Vec<course::Model>,
) -> AppResult<Vec<CourseListing>> {
    let coaches =
        repositories::coach::find_by_ids(db, courses.iter().map(|c| c.coach_id).collect()).await?;
    let users =
        repositories::user::find_by_ids(db, coaches.iter().map(|c| c.user_id).collect()).await?;
    let skills =
        repositories::skill::find_by_ids(db, courses.iter().map(|c| c.skill_id).collect()).await?;

    Ok(courses
        .into_iter()
        .map(|course| CourseListing {
            id: course.id,
            coach_name: coaches
                .iter()
                .find(|c| c.id == course.coach_id)
                .and_then(|coach| users.iter().find(|u| u.id == coach.user_id))
                .map(|u| u.name.clone()),
            skill_name: skills
                .iter()
                .find(|s| s.id == course.skill_id)
                .map(|s| s.name.clone()),
            name: course.name,
            description: course.description,
            start_at: course.start_at,
            end_at: course.end_at,
            max_participants: course.max_participants,
        })
        .collect())
}

pub async fn list_courses<C: ConnectionTrait>(db: &C) -> AppResult<Vec<CourseListing>> {
    let courses = repositories::course::find_all(db).await?;
    with_names(db, courses).await
}

pub async fn list_coach_courses<C: ConnectionTrait>(
    db: &C,
    coach_id: Uuid,
) -> AppResult<Vec<CourseListing>> {
    if repositories::coach::find_by_id(db, coach_id).await?.is_none() {
        return Err(AppError::not_found("coach not found"));
    }
    let courses = repositories::course::find_by_coach_id(db, coach_id).await?;
    with_names(db, courses).await
}
