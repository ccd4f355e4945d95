use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{Json, Response},
};
use uuid::Uuid;

use crate::auth::{validate_jwt, Claims};
use crate::error::ApiError;
use crate::store::models::Role;

/// Authenticated caller context extracted from the session token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
    pub name: String,
    pub role: Role,
    pub student_id: Option<Uuid>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            name: claims.name,
            role: claims.role,
            student_id: claims.student_id,
        }
    }
}

impl AuthUser {
    pub fn require_admin(&self) -> Result<(), ApiError> {
        match self.role {
            Role::Admin => Ok(()),
            Role::Student => Err(ApiError::forbidden("Admin access required")),
        }
    }

    /// The session's student id. This is the only student identity the API
    /// accepts for self-view reads; it never comes from the request.
    pub fn require_student(&self) -> Result<Uuid, ApiError> {
        match (self.role, self.student_id) {
            (Role::Student, Some(id)) => Ok(id),
            _ => Err(ApiError::forbidden("Student session required")),
        }
    }
}

/// JWT authentication middleware that validates tokens and injects the
/// caller context into the request.
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    let token = extract_jwt_from_headers(&headers).map_err(unauthorized)?;
    let claims = validate_jwt(&token).map_err(unauthorized)?;

    let auth_user = AuthUser::from(claims);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

fn unauthorized(msg: String) -> (StatusCode, Json<serde_json::Value>) {
    let api_error = ApiError::unauthorized(msg);
    (
        StatusCode::from_u16(api_error.status_code()).unwrap_or(StatusCode::UNAUTHORIZED),
        Json(api_error.to_json()),
    )
}

/// Extract the Bearer token from the Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
