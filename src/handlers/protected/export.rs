// GET /api/clearances/export - CSV download of submitted clearances

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Extension,
};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::services::export_service;
use crate::store::ClearanceStore;

pub async fn download(
    State(store): State<ClearanceStore>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Response, ApiError> {
    auth.require_admin()?;

    let rows = store.export_rows().await;
    let csv = export_service::render_csv(&rows);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"submitted-clearances.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}
