use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Schema};
use tracing::info;

use crate::entity::{coach, course, course_booking, credit_package, credit_purchase, skill, user};

const ACTIVE_BOOKING_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS \
    uq_course_bookings_active ON course_bookings (user_id, course_id) \
    WHERE status = 'active'";

async fn create_table<C: ConnectionTrait, E: EntityTrait>(
    db: &C,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(backend.build(&table)).await?;
    for mut index in schema.create_index_from_entity(entity) {
        index.if_not_exists();
        db.execute(backend.build(&index)).await?;
    }
    Ok(())
}

/// Creates any missing table, in foreign key order, plus the partial unique
/// index that allows one active booking per user and course.
pub async fn sync_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, user::Entity).await?;
    create_table(db, &schema, skill::Entity).await?;
    create_table(db, &schema, credit_package::Entity).await?;
    create_table(db, &schema, coach::Entity).await?;
    create_table(db, &schema, credit_purchase::Entity).await?;
    create_table(db, &schema, course::Entity).await?;
    create_table(db, &schema, course_booking::Entity).await?;
    db.execute_unprepared(ACTIVE_BOOKING_INDEX).await?;

    info!("database schema is up to date");
    Ok(())
}
