//! CRUD handlers shared by every resource kind. Each route set carries its
//! own `ResourceManager` as state, so users and dishes behave identically.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use models::Record;
use serde::Serialize;
use service::resources::ResourceManager;

use crate::errors::ApiError;
use crate::extract::JsonRecord;
use crate::metrics;

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// `/{collection}` and `/{collection}/:id` for one manager.
pub fn resource_routes(manager: ResourceManager) -> Router {
    let base = format!("/{}", manager.kind().collection);
    let item = format!("{base}/:id");
    Router::new()
        .route(&base, get(list).post(create))
        .route(&item, get(get_one).put(update).delete(delete))
        .with_state(manager)
}

pub async fn create(
    State(manager): State<ResourceManager>,
    JsonRecord(record): JsonRecord,
) -> Result<(StatusCode, Json<MessageBody>), ApiError> {
    let res = manager.create(record).await;
    metrics::observe(manager.kind(), "create", &res);
    Ok((StatusCode::CREATED, Json(MessageBody { message: res? })))
}

pub async fn list(State(manager): State<ResourceManager>) -> Result<Json<Vec<Record>>, ApiError> {
    let res = manager.list().await;
    metrics::observe(manager.kind(), "list", &res);
    Ok(Json(res?))
}

pub async fn get_one(
    State(manager): State<ResourceManager>,
    Path(id): Path<String>,
) -> Result<Json<Record>, ApiError> {
    let res = manager.get(&id).await;
    metrics::observe(manager.kind(), "get", &res);
    Ok(Json(res?))
}

pub async fn update(
    State(manager): State<ResourceManager>,
    Path(id): Path<String>,
    JsonRecord(patch): JsonRecord,
) -> Result<Json<MessageBody>, ApiError> {
    let res = manager.update(&id, patch).await;
    metrics::observe(manager.kind(), "update", &res);
    Ok(Json(MessageBody { message: res? }))
}

pub async fn delete(
    State(manager): State<ResourceManager>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    let res = manager.delete(&id).await;
    metrics::observe(manager.kind(), "delete", &res);
    Ok(Json(MessageBody { message: res? }))
}
