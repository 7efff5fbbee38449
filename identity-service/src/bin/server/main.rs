use std::sync::Arc;

use auth::TokenIssuer;
use identity_service::config::Config;
use identity_service::domain::auth::ports::AuthServicePort;
use identity_service::domain::auth::service::AuthService;
use identity_service::domain::user::ports::UserServicePort;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::notifier::TracingResetNotifier;
use identity_service::outbound::repositories::user::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        frontend_url = %config.server.frontend_url,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_issuer = Arc::new(TokenIssuer::new(
        config.jwt.access_secret.as_bytes(),
        config.jwt.refresh_secret.as_bytes(),
    ));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let reset_notifier = Arc::new(TracingResetNotifier::new(&config));

    let auth_service: Arc<dyn AuthServicePort> = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        reset_notifier,
        Arc::clone(&token_issuer),
    ));
    let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(user_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, user_service, token_issuer);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
