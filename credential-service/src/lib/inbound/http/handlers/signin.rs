use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::parse_json_body;
use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::user::models::Credentials;
use crate::inbound::http::router::AppState;

/// Exchange email and password for a bearer token.
///
/// Unknown accounts, wrong passwords and absent fields all yield the same
/// 401 response.
pub async fn signin(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let request: SigninRequest = parse_json_body(&body)?;

    let user = state
        .authentication
        .authenticate_password(request.into_credentials())
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Signin rejected");
            ApiError::from(e)
        })?;

    let token = state.authentication.issue_token(&user)?;

    tracing::info!(user_id = %user.id, "Signin succeeded");

    Ok(ApiSuccess::new(StatusCode::OK, TokenResponseData { token }))
}

/// HTTP request body for signin (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl SigninRequest {
    fn into_credentials(self) -> Credentials {
        Credentials::new(self.email, self.password)
    }
}
