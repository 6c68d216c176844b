//! CSV import and export handlers

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::AppResult;
use crate::services::import_export::ImportReport;
use crate::services::ImportExportService;
use crate::AppState;

/// Download every product as `products.csv`
pub async fn export_products(State(state): State<AppState>) -> AppResult<Response> {
    let service = ImportExportService::new(state.db);
    let csv = service.export_products().await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"products.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

/// Import products from a CSV request body
pub async fn import_products(
    State(state): State<AppState>,
    body: String,
) -> AppResult<Json<ImportReport>> {
    let service = ImportExportService::new(state.db);
    Ok(Json(service.import_products(&body).await?))
}
