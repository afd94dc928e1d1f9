use crate::entity::{credit_package, credit_purchase};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

/// Copies credits and price out of `package`; later edits to the package do
/// not reach the stored row.
#[tracing::instrument(skip_all)]
pub async fn save<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    package: &credit_package::Model,
) -> Result<credit_purchase::Model, DbErr> {
    credit_purchase::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        credit_package_id: Set(package.id),
        purchased_credits: Set(package.credit_amount),
        price_paid: Set(package.price),
        purchase_at: Set(Utc::now()),
    }
    .insert(db)
    .await
}

#[tracing::instrument(skip_all)]
pub async fn find_by_user_id<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Vec<credit_purchase::Model>, DbErr> {
    credit_purchase::Entity::find()
        .filter(credit_purchase::Column::UserId.eq(user_id))
        .order_by_desc(credit_purchase::Column::PurchaseAt)
        .all(db)
        .await
}

#[tracing::instrument(skip_all)]
pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<credit_purchase::Model>, DbErr> {
    credit_purchase::Entity::find_by_id(id).one(db).await
}

#[tracing::instrument(skip_all)]
pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<credit_purchase::Model>, DbErr> {
    credit_purchase::Entity::find().all(db).await
}
