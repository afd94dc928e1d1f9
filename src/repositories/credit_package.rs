use crate::entity::credit_package;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

#[tracing::instrument(skip_all)]
pub async fn save<C: ConnectionTrait>(
    db: &C,
    name: &str,
    credit_amount: i32,
    price: i32,
) -> Result<credit_package::Model, DbErr> {
    credit_package::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        credit_amount: Set(credit_amount),
        price: Set(price),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
}

#[tracing::instrument(skip_all)]
pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<credit_package::Model>, DbErr> {
    credit_package::Entity::find()
        .order_by_asc(credit_package::Column::CreatedAt)
        .all(db)
        .await
}

#[tracing::instrument(skip_all)]
pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<credit_package::Model>, DbErr> {
    credit_package::Entity::find_by_id(id).one(db).await
}

#[tracing::instrument(skip_all)]
pub async fn find_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: Vec<Uuid>,
) -> Result<Vec<credit_package::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    credit_package::Entity::find()
        .filter(credit_package::Column::Id.is_in(ids))
        .all(db)
        .await
}

#[tracing::instrument(skip_all)]
pub async fn exist_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<bool, DbErr> {
    Ok(credit_package::Entity::find()
        .filter(credit_package::Column::Name.eq(name))
        .one(db)
        .await?
        .is_some())
}

#[tracing::instrument(skip_all)]
pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
    Ok(credit_package::Entity::delete_by_id(id)
        .exec(db)
        .await?
        .rows_affected)
}
