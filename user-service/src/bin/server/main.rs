use std::sync::Arc;

use auth::JwtCodec;
use auth::PasswordHasher;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::domain::session::service::SessionService;
use user_service::domain::user::cache_aside::CachedUsers;
use user_service::domain::user::ports::UserCache;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::cache::InMemoryUserCache;
use user_service::outbound::cache::RedisUserCache;
use user_service::outbound::repositories::PostgresUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        cache = config.cache.url.as_deref().unwrap_or("in-memory"),
        access_token_ttl_secs = ?config.jwt.access_token_ttl_secs,
        refresh_token_ttl_secs = config.jwt.refresh_token_ttl_secs,
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

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));

    match &config.cache.url {
        Some(url) => match RedisUserCache::connect(url, config.cache.ttl_secs).await {
            Ok(cache) => serve(&config, user_repository, Arc::new(cache)).await,
            Err(e) => {
                tracing::warn!(error = %e, "Redis unavailable, falling back to in-memory user cache");
                serve(&config, user_repository, Arc::new(InMemoryUserCache::new())).await
            }
        },
        None => serve(&config, user_repository, Arc::new(InMemoryUserCache::new())).await,
    }
}

async fn serve<UC>(
    config: &Config,
    user_repository: Arc<PostgresUserRepository>,
    user_cache: Arc<UC>,
) -> Result<(), anyhow::Error>
where
    UC: UserCache,
{
    if config.cache.reset_on_start {
        CachedUsers::new(Arc::clone(&user_repository), Arc::clone(&user_cache))
            .reset()
            .await;
        tracing::info!("User cache reset");
    }

    let password_hasher = Arc::new(PasswordHasher::new());
    let jwt_codec = Arc::new(JwtCodec::new(config.jwt.secret.as_bytes()));

    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        Arc::clone(&user_cache),
        Arc::clone(&password_hasher),
    ));
    let session_service = Arc::new(SessionService::new(
        user_repository,
        user_cache,
        password_hasher,
        jwt_codec,
        config.jwt.lifetimes(),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, session_service);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");
    Ok(())
}
