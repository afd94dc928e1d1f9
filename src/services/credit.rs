use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    entity::credit_purchase,
    error::{AppError, AppResult},
    repositories,
};

/// Buys one credit package. The purchase row snapshots the package's credit
/// amount and price at this instant.
pub async fn purchase_credit<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    credit_package_id: Uuid,
) -> AppResult<credit_purchase::Model> {
    if repositories::user::find_by_id(db, user_id).await?.is_none() {
        return Err(AppError::not_found("user not found"));
    }
    let package = repositories::credit_package::find_by_id(db, credit_package_id)
        .await?
        .ok_or_else(|| AppError::not_found("credit package not found"))?;

    let purchase = repositories::credit_purchase::save(db, user_id, &package).await?;
    info!(
        "user {} bought package {} for {} credits",
        user_id, package.id, purchase.purchased_credits
    );
    Ok(purchase)
}

/// A purchase as shown in the user's history. `name` is `None` once the
/// package has been removed from the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseRecord {
    pub id: Uuid,
    pub credit_package_id: Uuid,
    pub name: Option<String>,
    pub purchased_credits: i32,
    pub price_paid: i32,
    pub purchase_at: chrono::DateTime<chrono::Utc>,
}

pub async fn purchase_history<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> AppResult<Vec<PurchaseRecord>> {
    let purchases = repositories::credit_purchase::find_by_user_id(db, user_id).await?;
    let package_ids = purchases.iter().map(|p| p.credit_package_id).collect();
    let packages = repositories::credit_package::find_by_ids(db, package_ids).await?;

    Ok(purchases
        .into_iter()
        .map(|p| PurchaseRecord {
            id: p.id,
            credit_package_id: p.credit_package_id,
            name: packages
                .iter()
                .find(|pkg| pkg.id == p.credit_package_id)
                .map(|pkg| pkg.name.clone()),
            purchased_credits: p.purchased_credits,
            price_paid: p.price_paid,
            purchase_at: p.purchase_at,
        })
        .collect())
}
