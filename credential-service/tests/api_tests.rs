mod common;

use auth::TokenService;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use common::TOKEN_SECRET;
use credential_service::domain::user::models::EmailAddress;
use credential_service::domain::user::ports::UserRepository;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_signup_then_access_protected_route() {
    let app = TestApp::spawn().await;

    let token = app.signup("seppo@gmail.com", "secret1").await;

    let response = app
        .get_authenticated("/", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "hi": "there" }));
}

#[tokio::test]
async fn test_signup_token_subject_is_user_id() {
    let app = TestApp::spawn().await;

    let token = app.signup("seppo@gmail.com", "secret1").await;
    let claims = app.token_service.validate(&token).unwrap();

    let email = EmailAddress::new("seppo@gmail.com".to_string()).unwrap();
    let user = app
        .repository
        .find_by_email(&email)
        .await
        .unwrap()
        .expect("User was not stored");

    assert_eq!(claims.subject(), user.id.to_string());
    assert_ne!(user.password_digest.as_str(), "secret1");
}

#[tokio::test]
async fn test_signup_stores_lowercased_email() {
    let app = TestApp::spawn().await;

    app.signup("Seppo@Gmail.COM", "secret1").await;

    let email = EmailAddress::new("seppo@gmail.com".to_string()).unwrap();
    let user = app.repository.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(user.email.as_str(), "seppo@gmail.com");
}

#[tokio::test]
async fn test_signup_duplicate_email_differing_in_case() {
    let app = TestApp::spawn().await;

    app.signup("seppo@gmail.com", "secret1").await;

    let response = app
        .post("/signup")
        .json(&json!({
            "email": "SEPPO@gmail.com",
            "password": "another"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Email is in use");
    assert_eq!(app.repository.len().await, 1);
}

#[tokio::test]
async fn test_signup_missing_fields() {
    let app = TestApp::spawn().await;

    for payload in [
        json!({ "email": "seppo@gmail.com" }),
        json!({ "password": "secret1" }),
        json!({ "email": "", "password": "secret1" }),
        json!({}),
    ] {
        let response = app
            .post("/signup")
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["error"], "You must provide email and password.");
    }

    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_signup_accepts_json_without_content_type() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/signup")
        .body(r#"{"email":"seppo@gmail.com","password":"secret1"}"#)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_signup_malformed_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/signup")
        .body("not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_password_over_72_bytes_is_rejected_at_signup_and_signin() {
    let app = TestApp::spawn().await;
    let prefix = "a".repeat(72);

    let response = app
        .post("/signup")
        .json(&json!({
            "email": "seppo@gmail.com",
            "password": format!("{}correct-suffix", prefix)
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.repository.is_empty().await);

    app.signup("seppo@gmail.com", &prefix).await;

    let response = app
        .post("/signin")
        .json(&json!({
            "email": "seppo@gmail.com",
            "password": format!("{}totally-different", prefix)
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signin_success() {
    let app = TestApp::spawn().await;
    app.signup("seppo@gmail.com", "secret1").await;

    let response = app
        .post("/signin")
        .json(&json!({
            "email": "Seppo@Gmail.com",
            "password": "secret1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["token"].as_str().unwrap();

    let response = app
        .get_authenticated("/", token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_signin_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.signup("seppo@gmail.com", "secret1").await;

    let mut bodies = Vec::new();
    for payload in [
        json!({ "email": "seppo@gmail.com", "password": "wrong" }),
        json!({ "email": "nobody@gmail.com", "password": "secret1" }),
        json!({ "email": "seppo@gmail.com" }),
    ] {
        let response = app
            .post("/signin")
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        bodies.push(response.text().await.expect("Failed to read response"));
    }

    assert!(bodies.iter().all(|body| body == &bodies[0]));
    assert!(bodies[0].contains("Invalid credentials"));
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_accepts_bearer_prefix() {
    let app = TestApp::spawn().await;
    let token = app.signup("seppo@gmail.com", "secret1").await;

    let response = app
        .get("/")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_route_rejects_forged_tokens() {
    let app = TestApp::spawn().await;
    let token = app.signup("seppo@gmail.com", "secret1").await;

    let foreign = TokenService::new(b"some-other-secret-that-is-at-least-32-bytes")
        .issue(&app.user_id_for("seppo@gmail.com").await.to_string())
        .unwrap();

    let signature_start = token.rfind('.').unwrap() + 1;
    let replacement = if token[signature_start..].starts_with('A') { "B" } else { "A" };
    let mut tampered = token.clone();
    tampered.replace_range(signature_start..signature_start + 1, replacement);

    for candidate in [foreign.as_str(), tampered.as_str(), "garbage"] {
        let response = app
            .get_authenticated("/", candidate)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_token_of_deleted_user_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.signup("seppo@gmail.com", "secret1").await;

    let user_id = app.user_id_for("seppo@gmail.com").await;
    assert!(app.repository.delete(&user_id).await.unwrap());

    let response = app
        .get_authenticated("/", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::spawn_with_token_service(
        TokenService::new(TOKEN_SECRET).with_expiration(Duration::hours(1)),
    )
    .await;
    app.signup("seppo@gmail.com", "secret1").await;

    let subject = app.user_id_for("seppo@gmail.com").await.to_string();
    let expired = app
        .token_service
        .issue_at(&subject, Utc::now() - Duration::hours(2))
        .unwrap();

    let response = app
        .get_authenticated("/", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
