//! User and token endpoints

use axum::Json;
use axum::extract::{Extension, Path, State};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::auth::AuthUser;
use crate::auth::token::TokenError;
use crate::db;
use crate::db::users::{Role, User};
use crate::error::AppError;
use crate::state::AppState;

use super::{ApiResult, DeleteAck, UpdateAck};

/// POST /createToken — sign an identity token for the supplied claims
pub async fn create_token(
    State(state): State<AppState>,
    Json(claims): Json<Map<String, Value>>,
) -> ApiResult<Value> {
    let token = state.tokens.issue(claims).map_err(|e| match e {
        TokenError::MissingEmail => AppError::validation(e.to_string()),
        other => AppError::Store(other.into()),
    })?;

    Ok(Json(json!({ "token": token })))
}

/// GET /allusers (admin)
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = db::users::find_all(&state.db).await?;
    Ok(Json(users))
}

/// GET /user/admin/{email} — report whether the caller's account is admin
pub async fn check_admin(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(email): Path<String>,
) -> ApiResult<Value> {
    if email != auth.email {
        return Err(AppError::forbidden("Forbidden access"));
    }

    let user = db::users::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    Ok(Json(json!({ "admin": user.is_admin() })))
}

/// POST /user — store the user on first sign-in; existing emails short-circuit
pub async fn upsert_user(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> ApiResult<Value> {
    if db::users::find_by_email(&state.db, &user.email)
        .await?
        .is_some()
    {
        return Ok(Json(json!({
            "message": "User already exists",
            "insertedId": null,
        })));
    }

    let result = db::users::insert(&state.db, &user).await?;
    Ok(Json(json!({
        "insertedId": result.inserted_id.as_object_id().map(|id| id.to_hex()),
    })))
}

/// DELETE /user/{id} (admin)
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeleteAck> {
    let id = ObjectId::parse_str(&id)?;
    let result = db::users::delete_by_id(&state.db, &id).await?;
    Ok(Json(result.into()))
}

#[derive(Debug, Deserialize)]
pub struct RoleUpdate {
    pub role: Role,
}

/// PATCH /user/{id} (admin) — update the user's role
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<RoleUpdate>,
) -> ApiResult<UpdateAck> {
    let id = ObjectId::parse_str(&id)?;
    let result = db::users::set_role(&state.db, &id, update.role).await?;
    Ok(Json(result.into()))
}
