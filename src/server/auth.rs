//! Admin authentication for the content API
//!
//! Admin routes take a [`RequireAdmin`] extractor. The caller presents the
//! site's `adminPassword` either as `Authorization: Bearer <password>` or in
//! the `X-Admin-Password` header. An empty password in settings disables
//! admin access altogether.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use super::AppState;

/// Alternative header carrying the admin password
pub const ADMIN_HEADER: &str = "x-admin-password";

/// Password presented with the request, if any
fn presented_password(parts: &Parts) -> Option<String> {
    if let Some(value) = parts.headers.get(header::AUTHORIZATION) {
        let value = value.to_str().ok()?;
        return value.strip_prefix("Bearer ").map(|s| s.trim().to_string());
    }
    parts
        .headers
        .get(ADMIN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
}

/// Whether the request carries the current admin password
pub async fn is_admin(state: &AppState, parts: &Parts) -> bool {
    let Some(presented) = presented_password(parts) else {
        return false;
    };
    let expected = state.store.lock().await.get_settings().admin_password.clone();
    !expected.is_empty() && presented == expected
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        Json(serde_json::json!({ "ok": false, "error": message })),
    )
        .into_response()
}

/// Extractor that rejects requests without the admin password with 401
pub struct RequireAdmin;

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequireAdmin {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if presented_password(parts).is_none() {
            return Err(unauthorized("Authentication required"));
        }
        if !is_admin(state, parts).await {
            tracing::warn!("Rejected admin request to {}", parts.uri.path());
            return Err(unauthorized("Invalid admin password"));
        }
        Ok(RequireAdmin)
    }
}

/// Extractor telling whether the caller is an admin, never rejects
pub struct MaybeAdmin(pub bool);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for MaybeAdmin {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAdmin(is_admin(state, parts).await))
    }
}
