//! Reporting endpoints (no auth)

use axum::Json;
use axum::extract::State;

use crate::db;
use crate::db::reports::{CategorySales, Summary};
use crate::state::AppState;

use super::ApiResult;

/// GET /web-summarize — store-wide counts and total revenue
pub async fn summarize(State(state): State<AppState>) -> ApiResult<Summary> {
    let summary = db::reports::summarize(&state.db).await?;
    Ok(Json(summary))
}

/// GET /web-orderStarts — per-category order statistics
pub async fn order_stats(State(state): State<AppState>) -> ApiResult<Vec<CategorySales>> {
    let stats = db::reports::category_breakdown(&state.db).await?;
    Ok(Json(stats))
}
