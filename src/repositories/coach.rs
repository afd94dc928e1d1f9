use crate::entity::{coach, user};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct NewCoach<'a> {
    pub user_id: Uuid,
    pub experience_years: i32,
    pub description: &'a str,
    pub profile_image_url: Option<&'a str>,
}

#[tracing::instrument(skip_all)]
pub async fn save<C: ConnectionTrait>(db: &C, new: NewCoach<'_>) -> Result<coach::Model, DbErr> {
    let now = Utc::now();
    coach::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(new.user_id),
        experience_years: Set(new.experience_years),
        description: Set(new.description.to_string()),
        profile_image_url: Set(new.profile_image_url.map(str::to_string)),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
}

#[tracing::instrument(skip_all)]
pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<coach::Model>, DbErr> {
    coach::Entity::find_by_id(id).one(db).await
}

#[tracing::instrument(skip_all)]
pub async fn find_by_user_id<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Option<coach::Model>, DbErr> {
    coach::Entity::find()
        .filter(coach::Column::UserId.eq(user_id))
        .one(db)
        .await
}

#[tracing::instrument(skip_all)]
pub async fn find_with_user<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<(coach::Model, Option<user::Model>)>, DbErr> {
    coach::Entity::find_by_id(id)
        .find_also_related(user::Entity)
        .one(db)
        .await
}

/// One page of coaches joined with their user rows, oldest first.
#[tracing::instrument(skip_all)]
pub async fn page_with_user<C: ConnectionTrait>(
    db: &C,
    per: u64,
    page: u64,
) -> Result<Vec<(coach::Model, Option<user::Model>)>, DbErr> {
    coach::Entity::find()
        .find_also_related(user::Entity)
        .order_by_asc(coach::Column::CreatedAt)
        .paginate(db, per)
        .fetch_page(page)
        .await
}

#[tracing::instrument(skip_all)]
pub async fn update_profile<C: ConnectionTrait>(
    db: &C,
    model: coach::Model,
    experience_years: i32,
    description: &str,
    profile_image_url: Option<&str>,
) -> Result<coach::Model, DbErr> {
    let mut active: coach::ActiveModel = model.into();
    active.experience_years = Set(experience_years);
    active.description = Set(description.to_string());
    active.profile_image_url = Set(profile_image_url.map(str::to_string));
    active.updated_at = Set(Utc::now());
    active.update(db).await
}

#[tracing::instrument(skip_all)]
pub async fn find_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: Vec<Uuid>,
) -> Result<Vec<coach::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    coach::Entity::find()
        .filter(coach::Column::Id.is_in(ids))
        .all(db)
        .await
}
