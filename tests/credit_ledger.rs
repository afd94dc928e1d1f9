use fitness_booking_service::{
    error::AppError,
    services::{
        catalog::{self, CatalogKind, NewCatalogItem},
        credit,
        ledger::load_balance,
    },
};
use uuid::Uuid;

mod support;

#[tokio::test]
async fn purchase_snapshots_the_package_and_survives_its_deletion() {
    let state = support::test_state().await;
    let db = state.db.as_ref();
    let user = support::create_user(db, "buyer").await;

    let gold = match catalog::create_catalog_item(
        db,
        NewCatalogItem::CreditPackage {
            name: "Gold".to_string(),
            credit_amount: 30,
            price: 1500,
        },
    )
    .await
    .expect("create Gold")
    {
        catalog::CatalogItem::CreditPackage(p) => p,
        other => panic!("unexpected {other:?}"),
    };

    let purchase = credit::purchase_credit(db, user.id, gold.id)
        .await
        .expect("purchase Gold");
    assert_eq!(purchase.purchased_credits, 30);
    assert_eq!(purchase.price_paid, 1500);
    assert_eq!(purchase.credit_package_id, gold.id);

    catalog::delete_catalog_item(db, CatalogKind::CreditPackage, gold.id)
        .await
        .expect("delete Gold");

    let balance = load_balance(db, user.id).await.expect("balance");
    assert_eq!(balance.credit_remain, 30);
    assert_eq!(balance.credit_usage, 0);

    let history = credit::purchase_history(db, user.id).await.expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].purchased_credits, 30);
    assert!(history[0].name.is_none());
}

#[tokio::test]
async fn repeated_purchases_add_up() {
    let state = support::test_state().await;
    let db = state.db.as_ref();
    let user = support::create_user(db, "buyer").await;
    let package_id = support::create_package(db, 7, 1400).await;

    for _ in 0..3 {
        credit::purchase_credit(db, user.id, package_id)
            .await
            .expect("purchase");
    }

    let balance = load_balance(db, user.id).await.expect("balance");
    assert_eq!(balance.credit_remain, 21);
    assert_eq!(
        credit::purchase_history(db, user.id).await.expect("history").len(),
        3
    );
}

#[tokio::test]
async fn purchasing_a_missing_package_is_not_found() {
    let state = support::test_state().await;
    let db = state.db.as_ref();
    let user = support::create_user(db, "buyer").await;

    let err = credit::purchase_credit(db, user.id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let balance = load_balance(db, user.id).await.expect("balance");
    assert_eq!(balance.credit_remain, 0);
}
