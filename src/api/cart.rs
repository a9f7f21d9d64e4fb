//! Shopping cart endpoints

use axum::Json;
use axum::extract::{Path, State};
use mongodb::bson::oid::ObjectId;

use crate::db;
use crate::db::carts::CartEntry;
use crate::state::AppState;

use super::{ApiResult, DeleteAck, InsertAck};

/// POST /cart — add a menu selection to the caller's cart
pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(entry): Json<CartEntry>,
) -> ApiResult<InsertAck> {
    let result = db::carts::insert(&state.db, &entry).await?;
    Ok(Json(result.into()))
}

/// GET /cart/{email} — entries for that email.
///
/// The path email is not checked against the token email; any authenticated
/// user can read any cart. Pre-existing gap, kept as-is.
pub async fn cart_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Vec<CartEntry>> {
    let entries = db::carts::find_by_email(&state.db, &email).await?;
    Ok(Json(entries))
}

/// GET /allCartItem — every cart entry across all users
pub async fn all_cart_entries(State(state): State<AppState>) -> ApiResult<Vec<CartEntry>> {
    let entries = db::carts::find_all(&state.db).await?;
    Ok(Json(entries))
}

/// DELETE /delete/{id} — remove one cart entry
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeleteAck> {
    let id = ObjectId::parse_str(&id)?;
    let result = db::carts::delete_by_id(&state.db, &id).await?;
    Ok(Json(result.into()))
}
