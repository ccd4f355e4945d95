// /api/signature - shared signature template image

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::services::signature_service;
use crate::store::ClearanceStore;

/// POST /api/signature - upload a replacement signature template (admin).
/// Accepts a multipart form; the first file field is taken as the image.
pub async fn upload(
    State(store): State<ClearanceStore>,
    Extension(auth): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    auth.require_admin()?;

    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {}", e)))?
        .ok_or_else(|| ApiError::validation_error("No file uploaded"))?;

    let content_type = field
        .content_type()
        .map(str::to_string)
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;

    let asset = signature_service::save(&bytes, &content_type).await?;
    if let Some(previous) = store.replace_signature(asset.clone()).await {
        signature_service::remove(&previous).await;
    }

    tracing::info!(file = %asset.file_name, "signature template replaced");
    Ok(Json(json!({ "success": true, "data": asset })))
}

/// GET /api/signature - active signature metadata, or null when none is set.
/// Readable by any authenticated caller; certificates render it.
pub async fn current(State(store): State<ClearanceStore>) -> Json<Value> {
    let asset = store.signature().await;
    Json(json!({ "success": true, "data": asset }))
}

/// GET /api/signature/file - the stored image bytes
pub async fn file(State(store): State<ClearanceStore>) -> Result<Response, ApiError> {
    let asset = store
        .signature()
        .await
        .ok_or_else(|| ApiError::not_found("No signature template uploaded"))?;

    let bytes = signature_service::read(&asset).await?;
    Ok(([(header::CONTENT_TYPE, asset.content_type)], bytes).into_response())
}
