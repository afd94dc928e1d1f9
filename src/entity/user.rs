use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[sea_orm(string_value = "USER")]
    User,
    #[sea_orm(string_value = "COACH")]
    Coach,
}

#[derive(Debug, PartialEq, Eq, Clone, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique, indexed)]
    pub email: String,
    pub role: Role,
    /// bcrypt hash, never serialized
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::coach::Entity")]
    Coach,
    #[sea_orm(has_many = "super::credit_purchase::Entity")]
    CreditPurchase,
    #[sea_orm(has_many = "super::course_booking::Entity")]
    CourseBooking,
}

impl Related<super::coach::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Coach.def()
    }
}

impl Related<super::credit_purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditPurchase.def()
    }
}

impl Related<super::course_booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseBooking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
