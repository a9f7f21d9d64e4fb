//! Review endpoints

use axum::Json;
use axum::extract::State;

use crate::db;
use crate::db::reviews::Review;
use crate::state::AppState;

use super::ApiResult;

/// GET /reviews — all reviews
pub async fn list_reviews(State(state): State<AppState>) -> ApiResult<Vec<Review>> {
    let reviews = db::reviews::list(&state.db).await?;
    Ok(Json(reviews))
}
