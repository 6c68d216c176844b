//! Dashboard handler

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::DateRange;

use crate::error::AppResult;
use crate::services::dashboard::DashboardSummary;
use crate::services::DashboardService;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Dashboard figures, optionally limited to an inclusive date range
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DashboardSummary>> {
    let service = DashboardService::new(state.db);
    let range = DateRange::new(query.start_date, query.end_date);
    Ok(Json(service.summary(range).await?))
}
