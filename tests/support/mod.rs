#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use fitness_booking_service::{
    client::db::{DatabaseClient, DatabaseClientExt},
    config::{db::DatabaseConfig, jwt::JWTConfig, secret::SecretConfig, ServiceConfig},
    entity::{coach, course, user},
    migration,
    services::{
        account,
        catalog::{self, CatalogItem, NewCatalogItem},
        coach::{promote_to_coach, CoachProfile},
        course::{create_course, CourseDraft},
        credit,
    },
    ServiceState,
};

pub const ADMIN_KEY: &str = "test-admin-key";
pub const PASSWORD: &str = "Passw0rdOK";

pub fn test_config() -> ServiceConfig {
    ServiceConfig {
        db: DatabaseConfig {
            url: Some("sqlite::memory:".to_string()),
            ..Default::default()
        },
        jwt: JWTConfig {
            access_token_secret: "access-secret".to_string(),
            refresh_token_secret: "refresh-secret".to_string(),
            access_token_expired_date: 600,
            refresh_token_expired_date: 3600,
        },
        secret: SecretConfig {
            admin_signature_key: ADMIN_KEY.to_string(),
            bcrypt_cost: 4,
        },
        ..Default::default()
    }
}

/// Fresh in-memory store with the schema applied.
pub async fn test_state() -> Arc<ServiceState> {
    let config = test_config();
    let db = DatabaseClient::build_from_config(&config)
        .await
        .expect("connect sqlite");
    migration::sync_schema(&db).await.expect("sync schema");
    Arc::new(ServiceState {
        config: Arc::new(config),
        db: Arc::new(db),
    })
}

fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

pub async fn create_user(db: &DatabaseClient, name: &str) -> user::Model {
    let email = format!("{}@example.com", unique(name));
    account::signup(db, 4, name, &email, PASSWORD)
        .await
        .expect("signup")
}

pub async fn create_package(db: &DatabaseClient, credit_amount: i64, price: i64) -> Uuid {
    let item = NewCatalogItem::CreditPackage {
        name: unique("package"),
        credit_amount,
        price,
    };
    match catalog::create_catalog_item(db, item).await.expect("create package") {
        CatalogItem::CreditPackage(package) => package.id,
        CatalogItem::Skill(_) => unreachable!(),
    }
}

/// Grants `credits` to the user through a real purchase.
pub async fn give_credits(db: &DatabaseClient, user_id: Uuid, credits: i64) {
    let package_id = create_package(db, credits, credits * 50).await;
    credit::purchase_credit(db, user_id, package_id)
        .await
        .expect("purchase");
}

pub async fn create_skill(db: &DatabaseClient) -> Uuid {
    let item = NewCatalogItem::Skill {
        name: unique("skill"),
    };
    match catalog::create_catalog_item(db, item).await.expect("create skill") {
        CatalogItem::Skill(skill) => skill.id,
        CatalogItem::CreditPackage(_) => unreachable!(),
    }
}

pub fn coach_profile() -> CoachProfile {
    CoachProfile {
        experience_years: 3,
        description: "functional training".to_string(),
        profile_image_url: Some("https://cdn.example.com/coach.png".to_string()),
    }
}

pub async fn create_coach(db: &DatabaseClient) -> (user::Model, coach::Model) {
    let user = create_user(db, "coach").await;
    promote_to_coach(db, user.id, coach_profile())
        .await
        .expect("promote")
}

pub fn course_draft(skill_id: Uuid, max_participants: i64) -> CourseDraft {
    let start_at = Utc::now() + Duration::days(2);
    CourseDraft {
        skill_id,
        name: "Kettlebell basics".to_string(),
        description: "swings, cleans and presses".to_string(),
        start_at,
        end_at: start_at + Duration::hours(1),
        max_participants,
        meeting_url: "https://meet.example.com/kettlebell".to_string(),
    }
}

pub async fn create_test_course(
    db: &DatabaseClient,
    coach: &coach::Model,
    max_participants: i64,
) -> course::Model {
    let skill_id = create_skill(db).await;
    create_course(db, coach, course_draft(skill_id, max_participants))
        .await
        .expect("create course")
}
