use crate::entity::user::{self, Role};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
    Set,
};
use uuid::Uuid;

#[tracing::instrument(skip_all)]
pub async fn save<C: ConnectionTrait>(
    db: &C,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<user::Model, DbErr> {
    let now = Utc::now();
    let new_user = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        role: Set(Role::User),
        password: Set(password_hash.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_user.insert(db).await
}

#[tracing::instrument(skip_all)]
pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find_by_id(id).one(db).await
}

/// Same as [`find_by_id`] but takes a row lock for the rest of the transaction.
#[tracing::instrument(skip_all)]
pub async fn find_by_id_for_update<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find_by_id(id).lock_exclusive().one(db).await
}

#[tracing::instrument(skip_all)]
pub async fn find_by_email<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
}

#[tracing::instrument(skip_all)]
pub async fn exist_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<bool, DbErr> {
    Ok(find_by_email(db, email).await?.is_some())
}

#[tracing::instrument(skip_all)]
pub async fn update_name<C: ConnectionTrait>(
    db: &C,
    model: user::Model,
    name: &str,
) -> Result<user::Model, DbErr> {
    let mut active: user::ActiveModel = model.into();
    active.name = Set(name.to_string());
    active.updated_at = Set(Utc::now());
    active.update(db).await
}

#[tracing::instrument(skip_all)]
pub async fn update_password<C: ConnectionTrait>(
    db: &C,
    model: user::Model,
    password_hash: &str,
) -> Result<user::Model, DbErr> {
    let mut active: user::ActiveModel = model.into();
    active.password = Set(password_hash.to_string());
    active.updated_at = Set(Utc::now());
    active.update(db).await
}

#[tracing::instrument(skip_all)]
pub async fn update_role<C: ConnectionTrait>(
    db: &C,
    model: user::Model,
    role: Role,
) -> Result<user::Model, DbErr> {
    let mut active: user::ActiveModel = model.into();
    active.role = Set(role);
    active.updated_at = Set(Utc::now());
    active.update(db).await
}

#[tracing::instrument(skip_all)]
pub async fn find_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: Vec<Uuid>,
) -> Result<Vec<user::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    user::Entity::find()
        .filter(user::Column::Id.is_in(ids))
        .all(db)
        .await
}
