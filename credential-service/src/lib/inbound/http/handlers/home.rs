use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn home(
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> ApiSuccess<HomeResponseData> {
    tracing::debug!(user_id = %user.id, "Serving protected resource");

    ApiSuccess::new(
        StatusCode::OK,
        HomeResponseData {
            hi: "there".to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeResponseData {
    pub hi: String,
}
