use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::{
    dto::{request::CreateSkillRequest, response::ApiResponse},
    error::AppResult,
    repositories,
    services::catalog::{self, CatalogKind, NewCatalogItem},
    utils::{
        extract::AppJson,
        validate::{parse_id, require},
    },
    ServiceState,
};

pub async fn list(State(state): State<Arc<ServiceState>>) -> AppResult<impl IntoResponse> {
    let skills = repositories::skill::find_all(state.db.as_ref()).await?;
    Ok(Json(ApiResponse::success(skills)))
}

pub async fn create(
    State(state): State<Arc<ServiceState>>,
    AppJson(req): AppJson<CreateSkillRequest>,
) -> AppResult<impl IntoResponse> {
    info!("Received 'create skill' request");
    let item = NewCatalogItem::Skill {
        name: require("name", req.name)?,
    };
    let created = catalog::create_catalog_item(state.db.as_ref(), item).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn delete(
    State(state): State<Arc<ServiceState>>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let skill_id = parse_id("skill_id", &id)?;
    catalog::delete_catalog_item(state.db.as_ref(), CatalogKind::Skill, skill_id).await?;
    Ok(Json(ApiResponse::ok()))
}
