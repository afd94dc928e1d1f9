use crate::entity::course;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

/// Column values shared by create and update.
#[derive(Debug, Clone)]
pub struct CourseFields {
    pub skill_id: Uuid,
    pub name: String,
    pub description: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub max_participants: i32,
    pub meeting_url: String,
}

#[tracing::instrument(skip_all)]
pub async fn save<C: ConnectionTrait>(
    db: &C,
    coach_id: Uuid,
    fields: CourseFields,
) -> Result<course::Model, DbErr> {
    let now = Utc::now();
    course::ActiveModel {
        id: Set(Uuid::new_v4()),
        coach_id: Set(coach_id),
        skill_id: Set(fields.skill_id),
        name: Set(fields.name),
        description: Set(fields.description),
        start_at: Set(fields.start_at),
        end_at: Set(fields.end_at),
        max_participants: Set(fields.max_participants),
        meeting_url: Set(fields.meeting_url),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
}

#[tracing::instrument(skip_all)]
pub async fn update<C: ConnectionTrait>(
    db: &C,
    model: course::Model,
    fields: CourseFields,
) -> Result<course::Model, DbErr> {
    let mut active: course::ActiveModel = model.into();
    active.skill_id = Set(fields.skill_id);
    active.name = Set(fields.name);
    active.description = Set(fields.description);
    active.start_at = Set(fields.start_at);
    active.end_at = Set(fields.end_at);
    active.max_participants = Set(fields.max_participants);
    active.meeting_url = Set(fields.meeting_url);
    active.updated_at = Set(Utc::now());
    active.update(db).await
}

#[tracing::instrument(skip_all)]
pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<course::Model>, DbErr> {
    course::Entity::find_by_id(id).one(db).await
}

/// Locks the course row so that seat counting and the booking insert see the
/// same state.
#[tracing::instrument(skip_all)]
pub async fn find_by_id_for_update<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<course::Model>, DbErr> {
    course::Entity::find_by_id(id).lock_exclusive().one(db).await
}

#[tracing::instrument(skip_all)]
pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<course::Model>, DbErr> {
    course::Entity::find()
        .order_by_asc(course::Column::StartAt)
        .all(db)
        .await
}

#[tracing::instrument(skip_all)]
pub async fn find_by_coach_id<C: ConnectionTrait>(
    db: &C,
    coach_id: Uuid,
) -> Result<Vec<course::Model>, DbErr> {
    course::Entity::find()
        .filter(course::Column::CoachId.eq(coach_id))
        .order_by_asc(course::Column::StartAt)
        .all(db)
        .await
}

#[tracing::instrument(skip_all)]
pub async fn find_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: Vec<Uuid>,
) -> Result<Vec<course::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    course::Entity::find()
        .filter(course::Column::Id.is_in(ids))
        .all(db)
        .await
}

#[tracing::instrument(skip_all)]
pub async fn count_by_skill_id<C: ConnectionTrait>(db: &C, skill_id: Uuid) -> Result<u64, DbErr> {
    course::Entity::find()
        .filter(course::Column::SkillId.eq(skill_id))
        .count(db)
        .await
}
