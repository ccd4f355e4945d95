// /api/students - student listing, filtering and completion flags

use axum::{
    extract::{Path, Query, State},
    response::Json,
    Extension,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::filter::StudentFilter;
use crate::middleware::auth::AuthUser;
use crate::store::models::{RequirementProgress, Student};
use crate::store::ClearanceStore;

#[derive(Debug, Serialize)]
struct StudentWithProgress {
    #[serde(flatten)]
    student: Student,
    requirements: Vec<RequirementProgress>,
}

/// GET /api/students?username=&course=&year=&major=&section=
///
/// Admin listing: matching students with their per-requirement completion,
/// plus the current catalog (the admin UI renders one checkbox grid per
/// student card from this).
pub async fn list(
    State(store): State<ClearanceStore>,
    Extension(auth): Extension<AuthUser>,
    Query(filter): Query<StudentFilter>,
) -> Result<Json<Value>, ApiError> {
    auth.require_admin()?;

    let requirements = store.requirements().await;
    let mut students = Vec::new();
    for student in store.students(&filter).await {
        let (student, progress) = store.student_progress(student.id).await?;
        students.push(StudentWithProgress {
            student,
            requirements: progress,
        });
    }

    Ok(Json(json!({
        "success": true,
        "data": {
            "students": students,
            "requirements": requirements,
        }
    })))
}

#[derive(Debug, Deserialize)]
pub struct SetCompletion {
    pub completed: bool,
}

/// PUT /api/students/:id/completions/:requirement_id - set one completion
/// flag (admin). Idempotent; never touches the submitted status.
pub async fn set_completion(
    State(store): State<ClearanceStore>,
    Extension(auth): Extension<AuthUser>,
    Path((student_id, requirement_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<SetCompletion>,
) -> Result<Json<Value>, ApiError> {
    auth.require_admin()?;
    store
        .set_completion(student_id, requirement_id, payload.completed)
        .await?;
    Ok(Json(json!({ "success": true })))
}
