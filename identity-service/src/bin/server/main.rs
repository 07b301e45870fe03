use std::sync::Arc;

use auth::Authenticator;
use identity_service::config::Config;
use identity_service::domain::account::ports::AccountServicePort;
use identity_service::domain::account::service::AccountService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::PostgresAccountStore;
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
        http_port = config.server.http_port,
        token_expiration_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    // An empty signing secret fails here, before the server accepts
    // requests
    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes())?);

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!("Database ready");

    let store = Arc::new(PostgresAccountStore::new(pg_pool));
    let account_service: Arc<dyn AccountServicePort> = Arc::new(AccountService::new(
        store,
        authenticator,
        config.jwt.expiration_hours,
    ));

    let http_listener =
        tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.server.http_port)).await?;
    tracing::info!(
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(account_service)).await?;

    Ok(())
}
