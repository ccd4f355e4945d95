// /api/students/:id/clearance and /api/clearances - submission workflow

use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::store::ClearanceStore;

/// POST /api/students/:id/clearance - submit a student's clearance (admin).
/// Completeness is re-checked inside the store; whatever the admin UI
/// showed when the button was clicked carries no weight here.
pub async fn submit(
    State(store): State<ClearanceStore>,
    Extension(auth): Extension<AuthUser>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require_admin()?;
    let student = store.submit_clearance(student_id).await?;
    Ok(Json(json!({ "success": true, "data": student })))
}

/// DELETE /api/students/:id/clearance - undo a submission (admin)
pub async fn undo(
    State(store): State<ClearanceStore>,
    Extension(auth): Extension<AuthUser>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require_admin()?;
    let student = store.undo_submission(student_id).await?;
    Ok(Json(json!({ "success": true, "data": student })))
}

/// GET /api/clearances - all submitted clearances (admin)
pub async fn list_submitted(
    State(store): State<ClearanceStore>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    auth.require_admin()?;
    let students = store.submitted_students().await;
    Ok(Json(json!({ "success": true, "data": students })))
}
