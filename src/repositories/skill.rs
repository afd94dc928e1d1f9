use crate::entity::skill;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

#[tracing::instrument(skip_all)]
pub async fn save<C: ConnectionTrait>(db: &C, name: &str) -> Result<skill::Model, DbErr> {
    skill::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
}

#[tracing::instrument(skip_all)]
pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<skill::Model>, DbErr> {
    skill::Entity::find()
        .order_by_asc(skill::Column::CreatedAt)
        .all(db)
        .await
}

#[tracing::instrument(skip_all)]
pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<skill::Model>, DbErr> {
    skill::Entity::find_by_id(id).one(db).await
}

#[tracing::instrument(skip_all)]
pub async fn exist_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<bool, DbErr> {
    Ok(skill::Entity::find()
        .filter(skill::Column::Name.eq(name))
        .one(db)
        .await?
        .is_some())
}

/// Returns the number of deleted rows.
#[tracing::instrument(skip_all)]
pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
    Ok(skill::Entity::delete_by_id(id).exec(db).await?.rows_affected)
}

#[tracing::instrument(skip_all)]
pub async fn find_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: Vec<Uuid>,
) -> Result<Vec<skill::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    skill::Entity::find()
        .filter(skill::Column::Id.is_in(ids))
        .all(db)
        .await
}
