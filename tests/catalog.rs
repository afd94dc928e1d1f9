use fitness_booking_service::{
    error::AppError,
    repositories,
    services::catalog::{create_catalog_item, delete_catalog_item, CatalogKind, NewCatalogItem},
};
use uuid::Uuid;

mod support;

fn package(name: &str, credit_amount: i64, price: i64) -> NewCatalogItem {
    NewCatalogItem::CreditPackage {
        name: name.to_string(),
        credit_amount,
        price,
    }
}

#[tokio::test]
async fn package_names_are_unique() {
    let state = support::test_state().await;
    let db = state.db.as_ref();

    create_catalog_item(db, package("Silver", 14, 1200))
        .await
        .expect("create Silver");
    let err = create_catalog_item(db, package("Silver", 20, 1500))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // The same name is free in the other kind.
    create_catalog_item(
        db,
        NewCatalogItem::Skill {
            name: "Silver".to_string(),
        },
    )
    .await
    .expect("skill named Silver");
}

#[tokio::test]
async fn invalid_fields_are_rejected() {
    let state = support::test_state().await;
    let db = state.db.as_ref();

    for item in [
        package("", 10, 100),
        package("   ", 10, 100),
        package("Bronze", -1, 100),
        package("Bronze", 10, -5),
        NewCatalogItem::Skill {
            name: " ".to_string(),
        },
    ] {
        let err = create_catalog_item(db, item).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
    assert!(repositories::credit_package::find_all(db)
        .await
        .expect("list")
        .is_empty());
}

#[tokio::test]
async fn deleting_missing_items_is_not_found() {
    let state = support::test_state().await;
    let db = state.db.as_ref();

    for kind in [CatalogKind::CreditPackage, CatalogKind::Skill] {
        let err = delete_catalog_item(db, kind, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

#[tokio::test]
async fn skill_in_use_cannot_be_deleted() {
    let state = support::test_state().await;
    let db = state.db.as_ref();
    let (_, coach) = support::create_coach(db).await;
    let course = support::create_test_course(db, &coach, 5).await;

    let err = delete_catalog_item(db, CatalogKind::Skill, course.skill_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let unused = support::create_skill(db).await;
    delete_catalog_item(db, CatalogKind::Skill, unused)
        .await
        .expect("delete unused skill");
    assert!(repositories::skill::find_by_id(db, unused)
        .await
        .expect("query")
        .is_none());
}

#[tokio::test]
async fn packages_must_grant_at_least_one_credit() {
    let state = support::test_state().await;
    let db = state.db.as_ref();

    let err = create_catalog_item(db, package("Zero", 0, 100))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(msg) if msg.contains("credit_amount")));

    create_catalog_item(db, package("Free trial", 1, 0))
        .await
        .expect("free package with one credit");
}
