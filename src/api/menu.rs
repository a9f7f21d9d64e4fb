//! Menu endpoints

use axum::Json;
use axum::extract::{Path, State};
use mongodb::bson::oid::ObjectId;

use crate::db;
use crate::db::menu::MenuItem;
use crate::error::AppError;
use crate::state::AppState;

use super::{ApiResult, DeleteAck, InsertAck};

/// GET /menu — all menu items, store-native order
pub async fn list_menu(State(state): State<AppState>) -> ApiResult<Vec<MenuItem>> {
    let items = db::menu::list(&state.db).await?;
    Ok(Json(items))
}

/// GET /menu/{id}
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MenuItem> {
    let id = ObjectId::parse_str(&id)?;
    let item = db::menu::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Menu item"))?;
    Ok(Json(item))
}

/// POST /addItem (admin)
pub async fn add_item(
    State(state): State<AppState>,
    Json(item): Json<MenuItem>,
) -> ApiResult<InsertAck> {
    let result = db::menu::insert(&state.db, &item).await?;
    Ok(Json(result.into()))
}

/// DELETE /deleteMenuItem/{id} (admin)
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeleteAck> {
    let id = ObjectId::parse_str(&id)?;
    let result = db::menu::delete_by_id(&state.db, &id).await?;
    Ok(Json(result.into()))
}
