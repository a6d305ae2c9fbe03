use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Extension type carrying the user resolved by the token strategy
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Middleware that resolves the caller from the Authorization header and adds
/// the user to request extensions.
///
/// The header holds the bare token; a `Bearer ` prefix is tolerated.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(req.headers()).ok_or_else(|| {
        tracing::debug!("Missing Authorization header");
        unauthorized()
    })?;

    let user = state
        .authentication
        .authenticate_token(&token)
        .await
        .map_err(|e| {
            if e.is_client_error() {
                tracing::warn!(error = %e, "Token authentication failed");
                unauthorized()
            } else {
                ApiError::from(e).into_response()
            }
        })?;

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}

fn unauthorized() -> Response {
    ApiError::Unauthorized("Unauthorized".to_string()).into_response()
}

fn extract_token_from_header(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
