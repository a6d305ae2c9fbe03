use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenService;
use axum::Router;
use credential_service::config::Config;
use credential_service::domain::user::authentication::AuthenticationService;
use credential_service::domain::user::ports::UserRepository;
use credential_service::domain::user::service::UserService;
use credential_service::inbound::http::router::create_router;
use credential_service::outbound::repositories::InMemoryUserRepository;
use credential_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credential_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "credential-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        persistence = if config.database.url.is_some() { "postgresql" } else { "memory" },
        hashing = ?config.hashing.algorithm,
        token_expiration_hours = ?config.token.expiration_hours,
        "Configuration loaded"
    );

    let password_hasher = PasswordHasher::with_algorithm(config.hashing.algorithm())?;

    let mut token_service = TokenService::new(config.token.secret.as_bytes());
    if let Some(lifetime) = config.token.expiration() {
        token_service = token_service.with_expiration(lifetime);
    }
    let token_service = Arc::new(token_service);

    let http_application = match config.database.url.as_deref() {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_application(
                Arc::new(PostgresUserRepository::new(pg_pool)),
                password_hasher,
                token_service,
            )
        }
        None => {
            tracing::warn!("No database configured, users are kept in memory");
            build_application(
                Arc::new(InMemoryUserRepository::new()),
                password_hasher,
                token_service,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

fn build_application<UR: UserRepository>(
    user_repository: Arc<UR>,
    password_hasher: PasswordHasher,
    token_service: Arc<TokenService>,
) -> Router {
    let user_service = Arc::new(UserService::new(user_repository, password_hasher.clone()));
    let authentication = Arc::new(AuthenticationService::new(
        Arc::clone(&user_service),
        password_hasher,
        token_service,
    ));

    create_router(user_service, authentication)
}
