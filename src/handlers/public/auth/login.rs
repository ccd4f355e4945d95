// POST /auth/login - authenticate an account and issue a session token

use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{generate_jwt, password, Claims};
use crate::error::ApiError;
use crate::store::ClearanceStore;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Validates credentials against the account registry (admin or student)
/// and returns a Bearer token plus the caller's identity. Failures are a
/// uniform 401 so usernames cannot be probed.
pub async fn login(
    State(store): State<ClearanceStore>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let account = store
        .account(payload.username.trim())
        .await
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let valid = password::verify_password(&payload.password, &account.password_hash)
        .unwrap_or(false);
    if !valid {
        tracing::warn!(username = %account.username, "failed login attempt");
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let claims = Claims::new(
        account.username.clone(),
        account.display_name.clone(),
        account.role,
        account.student_id,
    );
    let token = generate_jwt(claims)?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "token": token,
            "user": {
                "username": account.username,
                "name": account.display_name,
                "role": account.role,
                "student_id": account.student_id,
            }
        }
    })))
}
