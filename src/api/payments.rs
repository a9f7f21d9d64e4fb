//! Payment endpoints: intent creation, order recording, history

use axum::Json;
use axum::extract::{Extension, Path, State};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::auth::AuthUser;
use crate::db;
use crate::db::orders::Order;
use crate::error::AppError;
use crate::state::AppState;
use crate::stripe;

use super::ApiResult;

#[derive(Debug, Deserialize)]
pub struct PaymentIntentRequest {
    /// Price in major units
    pub price: f64,
}

/// POST /paymentIntent — create a provider payment intent for the price
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(request): Json<PaymentIntentRequest>,
) -> ApiResult<Value> {
    let amount = stripe::to_minor_units(request.price);
    let client_secret = stripe::create_payment_intent(&state.stripe_secret_key, amount)
        .await
        .map_err(AppError::Store)?;

    Ok(Json(json!({ "clientSecret": client_secret })))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAck {
    pub inserted_id: Option<String>,
    pub deleted_cart_count: u64,
}

/// POST /payments — record the order, then clear the consumed cart entries.
///
/// Two independent store calls with no transaction: the insertion is not
/// rolled back if the cart deletion fails, and a crash between them leaves
/// stale cart entries.
pub async fn record_payment(
    State(state): State<AppState>,
    Json(order): Json<Order>,
) -> ApiResult<PaymentAck> {
    let inserted = db::orders::insert(&state.db, &order).await?;

    let cart_ids = parse_cart_ids(&order.cart_ids)?;
    let deleted = db::carts::delete_by_ids(&state.db, &cart_ids).await?;

    Ok(Json(PaymentAck {
        inserted_id: inserted.inserted_id.as_object_id().map(|id| id.to_hex()),
        deleted_cart_count: deleted.deleted_count,
    }))
}

/// Parse the order's consumed cart-entry ids for the deletion cascade
fn parse_cart_ids(ids: &[String]) -> Result<Vec<ObjectId>, mongodb::bson::oid::Error> {
    ids.iter().map(|id| ObjectId::parse_str(id)).collect()
}

/// GET /paymentHistory/{email} — the caller's own orders only
pub async fn payment_history(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(email): Path<String>,
) -> ApiResult<Vec<Order>> {
    if email != auth.email {
        return Err(AppError::forbidden("Forbidden access"));
    }

    let orders = db::orders::find_by_email(&state.db, &email).await?;
    Ok(Json(orders))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cascade_parses_every_listed_cart_id() {
        let ids = vec![
            "665f1f77bcf86cd799439011".to_string(),
            "665f1f77bcf86cd799439012".to_string(),
        ];

        let parsed = parse_cart_ids(&ids).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].to_hex(), ids[0]);
        assert_eq!(parsed[1].to_hex(), ids[1]);
    }

    #[test]
    fn malformed_cart_id_aborts_the_cascade() {
        let ids = vec!["not-an-oid".to_string()];
        assert!(parse_cart_ids(&ids).is_err());
    }
}
