use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::{
    dto::{request::CreateCreditPackageRequest, response::ApiResponse},
    error::AppResult,
    repositories,
    services::{
        catalog::{self, CatalogKind, NewCatalogItem},
        credit,
    },
    utils::{
        auth::CurrentUser,
        extract::AppJson,
        validate::{parse_id, require},
    },
    ServiceState,
};

pub async fn list(State(state): State<Arc<ServiceState>>) -> AppResult<impl IntoResponse> {
    let packages = repositories::credit_package::find_all(state.db.as_ref()).await?;
    Ok(Json(ApiResponse::success(packages)))
}

pub async fn create(
    State(state): State<Arc<ServiceState>>,
    AppJson(req): AppJson<CreateCreditPackageRequest>,
) -> AppResult<impl IntoResponse> {
    info!("Received 'create credit package' request");
    let item = NewCatalogItem::CreditPackage {
        name: require("name", req.name)?,
        credit_amount: require("credit_amount", req.credit_amount)?,
        price: require("price", req.price)?,
    };
    let created = catalog::create_catalog_item(state.db.as_ref(), item).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn purchase(
    State(state): State<Arc<ServiceState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let package_id = parse_id("credit_package_id", &id)?;
    let purchase = credit::purchase_credit(state.db.as_ref(), user.id, package_id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(purchase))))
}

pub async fn delete(
    State(state): State<Arc<ServiceState>>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let package_id = parse_id("credit_package_id", &id)?;
    catalog::delete_catalog_item(state.db.as_ref(), CatalogKind::CreditPackage, package_id)
        .await?;
    Ok(Json(ApiResponse::ok()))
}
