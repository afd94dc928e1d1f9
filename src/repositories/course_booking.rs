use crate::entity::course_booking::{self, BookingStatus};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

#[tracing::instrument(skip_all)]
pub async fn save_active<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    course_id: Uuid,
) -> Result<course_booking::Model, DbErr> {
    course_booking::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        course_id: Set(course_id),
        status: Set(BookingStatus::Active),
        booking_at: Set(Utc::now()),
        cancelled_at: Set(None),
    }
    .insert(db)
    .await
}

#[tracing::instrument(skip_all)]
pub async fn find_active<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    course_id: Uuid,
) -> Result<Option<course_booking::Model>, DbErr> {
    course_booking::Entity::find()
        .filter(course_booking::Column::UserId.eq(user_id))
        .filter(course_booking::Column::CourseId.eq(course_id))
        .filter(course_booking::Column::Status.eq(BookingStatus::Active))
        .one(db)
        .await
}

#[tracing::instrument(skip_all)]
pub async fn count_active_by_course<C: ConnectionTrait>(
    db: &C,
    course_id: Uuid,
) -> Result<u64, DbErr> {
    course_booking::Entity::find()
        .filter(course_booking::Column::CourseId.eq(course_id))
        .filter(course_booking::Column::Status.eq(BookingStatus::Active))
        .count(db)
        .await
}

/// Every booking of the user, cancelled ones included, newest first.
#[tracing::instrument(skip_all)]
pub async fn find_by_user_id<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Vec<course_booking::Model>, DbErr> {
    course_booking::Entity::find()
        .filter(course_booking::Column::UserId.eq(user_id))
        .order_by_desc(course_booking::Column::BookingAt)
        .all(db)
        .await
}

#[tracing::instrument(skip_all)]
pub async fn find_active_by_course_ids<C: ConnectionTrait>(
    db: &C,
    course_ids: Vec<Uuid>,
) -> Result<Vec<course_booking::Model>, DbErr> {
    if course_ids.is_empty() {
        return Ok(Vec::new());
    }
    course_booking::Entity::find()
        .filter(course_booking::Column::CourseId.is_in(course_ids))
        .filter(course_booking::Column::Status.eq(BookingStatus::Active))
        .all(db)
        .await
}

#[tracing::instrument(skip_all)]
pub async fn mark_cancelled<C: ConnectionTrait>(
    db: &C,
    model: course_booking::Model,
) -> Result<course_booking::Model, DbErr> {
    let mut active: course_booking::ActiveModel = model.into();
    active.status = Set(BookingStatus::Cancelled);
    active.cancelled_at = Set(Some(Utc::now()));
    active.update(db).await
}
