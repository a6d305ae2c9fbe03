use std::sync::Arc;

use auth::HashingAlgorithm;
use auth::PasswordHasher;
use auth::TokenService;
use credential_service::domain::user::authentication::AuthenticationService;
use credential_service::domain::user::models::EmailAddress;
use credential_service::domain::user::models::UserId;
use credential_service::domain::user::ports::UserRepository;
use credential_service::domain::user::service::UserService;
use credential_service::inbound::http::router::create_router;
use credential_service::outbound::repositories::InMemoryUserRepository;

pub const TOKEN_SECRET: &[u8] = b"test-secret-key-for-token-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub repository: Arc<InMemoryUserRepository>,
    pub token_service: Arc<TokenService>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application with tokens that never expire
    pub async fn spawn() -> Self {
        Self::spawn_with_token_service(TokenService::new(TOKEN_SECRET)).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with_token_service(token_service: TokenService) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::new());
        let token_service = Arc::new(token_service);

        // Lowest bcrypt cost keeps the suite fast
        let password_hasher = PasswordHasher::with_algorithm(HashingAlgorithm::Bcrypt { cost: 4 })
            .expect("Failed to create password hasher");

        let user_service = Arc::new(UserService::new(
            Arc::clone(&repository),
            password_hasher.clone(),
        ));
        let authentication = Arc::new(AuthenticationService::new(
            Arc::clone(&user_service),
            password_hasher,
            Arc::clone(&token_service),
        ));

        let router = create_router(user_service, authentication);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            repository,
            token_service,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with the raw token in Authorization
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).header(reqwest::header::AUTHORIZATION, token)
    }

    /// Sign up and return the issued token
    pub async fn signup(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/signup")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("Token missing from signup response")
            .to_string()
    }

    /// Look up the ID of a stored user directly in the repository
    pub async fn user_id_for(&self, email: &str) -> UserId {
        let email = EmailAddress::new(email.to_string()).expect("Invalid email");
        self.repository
            .find_by_email(&email)
            .await
            .expect("Repository lookup failed")
            .expect("User was not stored")
            .id
    }
}
