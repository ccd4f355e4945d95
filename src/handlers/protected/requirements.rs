// /api/requirements - requirement catalog management

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::store::ClearanceStore;

#[derive(Debug, Deserialize)]
pub struct CreateRequirement {
    pub name: String,
}

/// GET /api/requirements - catalog in insertion order (any authenticated caller)
pub async fn list(State(store): State<ClearanceStore>) -> Json<Value> {
    let requirements = store.requirements().await;
    Json(json!({ "success": true, "data": requirements }))
}

/// POST /api/requirements - add a requirement (admin)
pub async fn create(
    State(store): State<ClearanceStore>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateRequirement>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    auth.require_admin()?;
    let requirement = store.add_requirement(&payload.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": requirement })),
    ))
}

/// DELETE /api/requirements/:id - remove one requirement and its flags (admin)
pub async fn remove(
    State(store): State<ClearanceStore>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require_admin()?;
    store.delete_requirement(id).await?;
    Ok(Json(json!({ "success": true })))
}

/// DELETE /api/requirements - clear the whole catalog and revert every
/// submission to pending (admin)
pub async fn clear(
    State(store): State<ClearanceStore>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    auth.require_admin()?;
    store.clear_requirements().await;
    Ok(Json(json!({ "success": true })))
}
