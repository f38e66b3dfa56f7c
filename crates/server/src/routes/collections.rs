use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use models::Collection;
use service::ordered::{DropOutcome, FormController, OrderedRecord, RecordPatch, ReorderCoordinator};

use crate::errors::JsonApiError;
use crate::routes::auth::{AdminSession, ServerState};

#[derive(Debug, Deserialize)]
pub struct ReorderInput { pub ids: Vec<Uuid> }

#[derive(Debug, Deserialize)]
pub struct MoveInput { pub dragged: Uuid, pub target: Uuid }

#[derive(Serialize)]
pub struct MoveOutput { pub outcome: &'static str, pub items: Vec<OrderedRecord> }

#[derive(Serialize)]
pub struct DashboardOutput { pub counts: BTreeMap<&'static str, u64> }

pub fn parse_collection(slug: &str) -> Result<Collection, JsonApiError> {
    Collection::from_slug(slug).ok_or_else(|| JsonApiError::not_found(&format!("collection {slug}")))
}

/// List for public pages: a store failure renders as an empty list.
pub async fn list_or_empty(state: &ServerState, collection: Collection) -> Vec<OrderedRecord> {
    match state.records.list(collection).await {
        Ok(list) => list,
        Err(e) => {
            warn!(%collection, error = %e, "public list failed, rendering empty");
            Vec::new()
        }
    }
}

#[utoipa::path(
    get, path = "/api/collections/{collection}", tag = "public",
    params(("collection" = String, Path, description = "Collection slug, e.g. reels")),
    responses((status = 200, description = "Ordered records"), (status = 404, description = "Unknown collection"))
)]
pub async fn public_list(State(state): State<ServerState>, Path(slug): Path<String>) -> Result<Json<Vec<OrderedRecord>>, JsonApiError> {
    let collection = parse_collection(&slug)?;
    Ok(Json(list_or_empty(&state, collection).await))
}

#[utoipa::path(
    get, path = "/admin/collections/{collection}", tag = "admin",
    params(("collection" = String, Path, description = "Collection slug")),
    responses((status = 200, description = "Ordered records"), (status = 503, description = "Store Unavailable"))
)]
pub async fn list(State(state): State<ServerState>, Path(slug): Path<String>) -> Result<Json<Vec<OrderedRecord>>, JsonApiError> {
    let collection = parse_collection(&slug)?;
    let list = state.records.list(collection).await?;
    info!(%collection, count = list.len(), "list records");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/admin/collections/{collection}", tag = "admin",
    params(("collection" = String, Path, description = "Collection slug")),
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"))
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(session): Extension<AdminSession>,
    Path(slug): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<OrderedRecord>), JsonApiError> {
    let collection = parse_collection(&slug)?;
    let Value::Object(values) = body else {
        return Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some("body must be a JSON object".into())));
    };
    let mut form = FormController::new(state.records.clone(), collection);
    form.fill(values);
    let rec = form.submit().await?;
    info!(%collection, id = %rec.id, admin = %session.email, "record created");
    Ok((StatusCode::CREATED, Json(rec)))
}

#[utoipa::path(
    put, path = "/admin/collections/{collection}/{id}", tag = "admin",
    params(("collection" = String, Path, description = "Collection slug"), ("id" = Uuid, Path, description = "Record id")),
    responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error"), (status = 404, description = "Not Found"))
)]
pub async fn update(
    State(state): State<ServerState>,
    Path((slug, id)): Path<(String, Uuid)>,
    Json(body): Json<Value>,
) -> Result<Json<OrderedRecord>, JsonApiError> {
    let collection = parse_collection(&slug)?;
    let patch = RecordPatch::from_json(body)?;
    let rec = state.records.update(collection, id, patch).await?;
    info!(%collection, %id, "record updated");
    Ok(Json(rec))
}

#[utoipa::path(
    delete, path = "/admin/collections/{collection}/{id}", tag = "admin",
    params(("collection" = String, Path, description = "Collection slug"), ("id" = Uuid, Path, description = "Record id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, Path((slug, id)): Path<(String, Uuid)>) -> Result<StatusCode, JsonApiError> {
    let collection = parse_collection(&slug)?;
    state.records.delete(collection, id).await?;
    info!(%collection, %id, "record deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post, path = "/admin/collections/{collection}/reorder", tag = "admin",
    params(("collection" = String, Path, description = "Collection slug")),
    request_body = crate::openapi::ReorderRequest,
    responses((status = 200, description = "Reordered list"), (status = 400, description = "Not a permutation"), (status = 404, description = "Unknown id"))
)]
pub async fn reorder(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Json(input): Json<ReorderInput>,
) -> Result<Json<Vec<OrderedRecord>>, JsonApiError> {
    let collection = parse_collection(&slug)?;
    let list = state.records.reorder(collection, &input.ids).await?;
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/admin/collections/{collection}/move", tag = "admin",
    params(("collection" = String, Path, description = "Collection slug")),
    request_body = crate::openapi::MoveRequest,
    responses((status = 200, description = "Drop applied"), (status = 404, description = "Unknown id"))
)]
pub async fn move_record(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Json(input): Json<MoveInput>,
) -> Result<Json<MoveOutput>, JsonApiError> {
    let collection = parse_collection(&slug)?;
    let mut coordinator = ReorderCoordinator::load(state.records.clone(), collection).await?;
    coordinator.begin_drag(input.dragged)?;
    let outcome = match coordinator.drop_on(input.target).await? {
        DropOutcome::Reordered => "reordered",
        DropOutcome::Unchanged => "unchanged",
        DropOutcome::Ignored => "ignored",
    };
    Ok(Json(MoveOutput { outcome, items: coordinator.into_items() }))
}

#[utoipa::path(get, path = "/admin/dashboard", tag = "admin", responses((status = 200, description = "Record counts per collection")))]
pub async fn dashboard(State(state): State<ServerState>) -> Result<Json<DashboardOutput>, JsonApiError> {
    let mut counts = BTreeMap::new();
    for collection in Collection::ALL {
        counts.insert(collection.slug(), state.records.count(collection).await?);
    }
    Ok(Json(DashboardOutput { counts }))
}
