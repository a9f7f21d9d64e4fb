//! Authorization middleware
//!
//! Two sequential gates: `require_auth` verifies the bearer token and
//! attaches the identity to the request; `require_admin` re-reads the user
//! document on every request and rejects non-admin roles.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::token::TokenError;
use crate::db;
use crate::db::users::User;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated identity extracted from a verified token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

/// Middleware gate 1: the request carries a valid bearer token.
///
/// Missing header → 401. Present but malformed, unsigned or expired → 403.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthenticated)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::forbidden("Forbidden access"))?;

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::debug!("Token verification failed: {e}");
        match e {
            TokenError::Expired => AppError::forbidden("Token expired"),
            _ => AppError::forbidden("Forbidden access"),
        }
    })?;

    request.extensions_mut().insert(AuthUser {
        email: claims.email,
    });

    Ok(next.run(request).await)
}

/// Middleware gate 2: the authenticated identity has the admin role.
///
/// Runs after [`require_auth`]; one user-store read per request, uncached.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or(AppError::Unauthenticated)?;

    let account = db::users::find_by_email(&state.db, &user.email).await?;
    if !has_admin_role(account.as_ref()) {
        return Err(AppError::forbidden(
            "You are not an admin, forbidden access",
        ));
    }

    Ok(next.run(request).await)
}

/// Admin gate decision: the claimed email must resolve to an account whose
/// role is admin; unknown accounts are denied
fn has_admin_role(account: Option<&User>) -> bool {
    account.is_some_and(|u| u.is_admin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::users::Role;
    use mongodb::bson::Document;

    fn account_with_role(role: Role) -> User {
        User {
            id: None,
            email: "john@example.com".into(),
            role,
            profile: Document::new(),
        }
    }

    #[test]
    fn admin_gate_allows_admin_role() {
        assert!(has_admin_role(Some(&account_with_role(Role::Admin))));
    }

    #[test]
    fn admin_gate_denies_regular_role() {
        assert!(!has_admin_role(Some(&account_with_role(Role::Regular))));
    }

    #[test]
    fn admin_gate_denies_unknown_account() {
        assert!(!has_admin_role(None));
    }
}
