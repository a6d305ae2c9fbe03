use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use super::parse_json_body;
use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordError;

pub async fn signup(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let request: SignupRequest = parse_json_body(&body)?;
    let command = request.try_into_command()?;

    let user = state.credential_store.create_user(command).await?;
    let token = state.authentication.issue_token(&user)?;

    tracing::info!(user_id = %user.id, "Signup completed");

    Ok(ApiSuccess::new(StatusCode::OK, TokenResponseData { token }))
}

/// HTTP request body for signup (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("You must provide email and password.")]
    MissingField,

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordError),
}

impl SignupRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ParseSignupRequestError> {
        let (email, password) = match (self.email, self.password) {
            (Some(email), Some(password))
                if !email.trim().is_empty() && !password.is_empty() =>
            {
                (email, password)
            }
            _ => return Err(ParseSignupRequestError::MissingField),
        };

        let email = EmailAddress::new(email)?;
        let password = Password::new(password)?;

        Ok(CreateUserCommand::new(email, password))
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: Option<&str>, password: Option<&str>) -> SignupRequest {
        SignupRequest {
            email: email.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_or_empty_fields_are_rejected() {
        for req in [
            request(None, Some("secret1")),
            request(Some("a@x.com"), None),
            request(Some("   "), Some("secret1")),
            request(Some("a@x.com"), Some("")),
        ] {
            let err = req.try_into_command().unwrap_err();
            assert_eq!(err.to_string(), "You must provide email and password.");
        }
    }

    #[test]
    fn test_email_is_normalized() {
        let command = request(Some("  Seppo@Gmail.COM "), Some("secret1"))
            .try_into_command()
            .unwrap();

        assert_eq!(command.email.as_str(), "seppo@gmail.com");
        assert_eq!(command.password.expose(), "secret1");
    }

    #[test]
    fn test_malformed_email_is_rejected() {
        let err = request(Some("not-an-address"), Some("secret1"))
            .try_into_command()
            .unwrap_err();

        assert!(matches!(err, ParseSignupRequestError::Email(_)));
    }

    #[test]
    fn test_overlong_password_is_rejected() {
        let password = "a".repeat(73);
        let err = request(Some("a@x.com"), Some(&password))
            .try_into_command()
            .unwrap_err();

        assert!(matches!(
            err,
            ParseSignupRequestError::Password(PasswordError::TooLong { max: 72 })
        ));
    }

    #[test]
    fn test_body_with_missing_keys_deserializes() {
        let req: SignupRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(req, request(Some("a@x.com"), None));
    }
}
