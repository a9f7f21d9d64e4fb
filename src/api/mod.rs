//! API routes for bistro-server

pub mod cart;
pub mod health;
pub mod menu;
pub mod payments;
pub mod reports;
pub mod reviews;
pub mod users;

use axum::routing::{delete, get, post};
use axum::{Json, Router, middleware};
use http::{HeaderValue, Method, header};
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::middleware::{require_admin, require_auth};
use crate::error::AppError;
use crate::state::AppState;

/// Handler result: JSON body or an error response
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Insertion acknowledgment returned by create operations
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub inserted_id: Option<String>,
}

impl From<InsertOneResult> for InsertAck {
    fn from(result: InsertOneResult) -> Self {
        Self {
            inserted_id: result.inserted_id.as_object_id().map(|id| id.to_hex()),
        }
    }
}

/// Deletion acknowledgment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeleteAck {
    fn from(result: DeleteResult) -> Self {
        Self {
            deleted_count: result.deleted_count,
        }
    }
}

/// Upsert acknowledgment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub matched_count: u64,
    pub modified_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<String>,
}

impl From<UpdateResult> for UpdateAck {
    fn from(result: UpdateResult) -> Self {
        Self {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result
                .upserted_id
                .and_then(|id| id.as_object_id().map(|id| id.to_hex())),
        }
    }
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Admin-gated management routes (token + role check)
    let admin = Router::new()
        .route("/allusers", get(users::list_users))
        .route(
            "/user/{id}",
            delete(users::delete_user).patch(users::update_role),
        )
        .route("/addItem", post(menu::add_item))
        .route("/deleteMenuItem/{id}", delete(menu::delete_item))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Authenticated routes (token only)
    let authed = Router::new()
        .route("/user/admin/{email}", get(users::check_admin))
        .route("/cart", post(cart::add_to_cart))
        .route("/cart/{email}", get(cart::cart_by_email))
        .route("/allCartItem", get(cart::all_cart_entries))
        .route("/delete/{id}", delete(cart::delete_entry))
        .route("/paymentHistory/{email}", get(payments::payment_history))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Public routes
    let public = Router::new()
        .route("/", get(health::health_check))
        .route("/health", get(health::health_check))
        .route("/createToken", post(users::create_token))
        .route("/menu", get(menu::list_menu))
        .route("/menu/{id}", get(menu::get_menu_item))
        .route("/reviews", get(reviews::list_reviews))
        .route("/user", post(users::upsert_user))
        .route("/paymentIntent", post(payments::create_payment_intent))
        .route("/payments", post(payments::record_payment))
        .route("/web-summarize", get(reports::summarize))
        .route("/web-orderStarts", get(reports::order_stats));

    Router::new()
        .merge(public)
        .merge(authed)
        .merge(admin)
        .layer(cors_layer(&state.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::TokenService;
    use axum::body::Body;
    use http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const TEST_SECRET: &str = "test-secret";

    // The driver connects lazily, so routes that reject before touching the
    // store can be exercised without a running database.
    async fn test_router() -> Router {
        let state = AppState {
            db: mongodb::Client::with_uri_str("mongodb://127.0.0.1:27017")
                .await
                .unwrap()
                .database("bistroDB"),
            tokens: TokenService::new(TEST_SECRET),
            stripe_secret_key: "sk_test".into(),
            allowed_origins: vec![],
        };
        create_router(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn bearer_token(email: &str) -> String {
        let claims = json!({ "email": email }).as_object().cloned().unwrap();
        TokenService::new(TEST_SECRET).issue(claims).unwrap()
    }

    #[tokio::test]
    async fn health_check_responds_ok() {
        let response = test_router()
            .await
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn missing_auth_header_is_unauthenticated() {
        let response = test_router()
            .await
            .oneshot(
                Request::builder()
                    .uri("/allusers")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Unauthorized access");
    }

    #[tokio::test]
    async fn invalid_bearer_token_is_forbidden() {
        let response = test_router()
            .await
            .oneshot(
                Request::builder()
                    .uri("/allusers")
                    .header("Authorization", "Bearer not-a-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn create_token_issues_a_verifiable_token() {
        let request = Request::builder()
            .method("POST")
            .uri("/createToken")
            .header("Content-Type", "application/json")
            .body(Body::from(
                json!({ "email": "john@example.com", "name": "John" }).to_string(),
            ))
            .unwrap();

        let response = test_router().await.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let token = body["token"].as_str().unwrap();
        let claims = TokenService::new(TEST_SECRET).verify(token).unwrap();
        assert_eq!(claims.email, "john@example.com");
        assert_eq!(claims.extra["name"], "John");
    }

    #[tokio::test]
    async fn create_token_without_email_is_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/createToken")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "name": "John" }).to_string()))
            .unwrap();

        let response = test_router().await.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn payment_history_for_other_email_is_forbidden() {
        let token = bearer_token("b@x.com");
        let response = test_router()
            .await
            .oneshot(
                Request::builder()
                    .uri("/paymentHistory/a@x.com")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_check_for_other_email_is_forbidden() {
        let token = bearer_token("b@x.com");
        let response = test_router()
            .await
            .oneshot(
                Request::builder()
                    .uri("/user/admin/a@x.com")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
