// GET /api/me - student self-view

use axum::{extract::State, response::Json, Extension};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::store::ClearanceStore;

/// Own record, the catalog with own completion flags, and submission
/// status. The student id comes from the session claims; a caller-supplied
/// id is never accepted for self-view reads.
pub async fn me(
    State(store): State<ClearanceStore>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let student_id = auth.require_student()?;
    let (student, requirements) = store.student_progress(student_id).await?;
    let signature_available = store.signature().await.is_some();

    Ok(Json(json!({
        "success": true,
        "data": {
            "student": student,
            "requirements": requirements,
            "signature_available": signature_available,
        }
    })))
}
