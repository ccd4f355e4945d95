// POST /auth/register - student self-registration

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::password;
use crate::error::ApiError;
use crate::store::models::NewStudent;
use crate::store::ClearanceStore;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub student_number: String,
    pub name: String,
    pub course: String,
    pub year: i32,
    pub major: Option<String>,
    pub section: String,
    /// Optional; defaults to the student number, matching the original
    /// registration flow ("login with your student number as password").
    pub password: Option<String>,
}

pub async fn register(
    State(store): State<ClearanceStore>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let password = payload
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or(&payload.student_number);
    let password_hash = password::hash_password(password).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::internal_server_error("Registration failed")
    })?;

    let student = store
        .register_student(
            NewStudent {
                username: payload.student_number,
                name: payload.name,
                course: payload.course,
                year: payload.year,
                major: payload.major,
                section: payload.section,
            },
            password_hash,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": student })),
    ))
}
