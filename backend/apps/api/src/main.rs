//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::{AccessController, PgAuthRepository, SessionResolver, auth_router};
use axum::Router;
use axum::middleware::from_fn_with_state;
use cors::{CachedDomainRegistry, CorsTrustEngine, PgDomainRegistry, cors_trust};
use pow::{PgChallengeStore, PowChallengeService, pow_router, spawn_expiry_sweep};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

type DomainRegistry = CachedDomainRegistry<PgDomainRegistry>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "trust_api=info,auth=info,pow=info,cors=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Sweep failures are logged and never stop the server
    let challenge_store = Arc::new(PgChallengeStore::new(pool.clone()));
    let _sweep = spawn_expiry_sweep(challenge_store.clone(), config.pow.sweep_interval);

    // Auth
    let auth_repo = Arc::new(PgAuthRepository::new(pool.clone()));
    let resolver = Arc::new(SessionResolver::new(
        auth_repo.clone(),
        Arc::new(config.auth),
    ));
    let access = AccessController::new(auth_repo);

    // PoW
    let pow_service = Arc::new(PowChallengeService::new(
        challenge_store,
        Arc::new(config.pow),
    ));

    // CORS
    let registry = Arc::new(CachedDomainRegistry::new(
        PgDomainRegistry::new(pool.clone()),
        config.cors.cache_ttl,
        config.cors.cache_capacity,
    ));
    let cors_engine = Arc::new(CorsTrustEngine::new(registry, Arc::new(config.cors))?);

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_router(resolver, access))
        .nest("/api/pow", pow_router(pow_service))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(cors_engine, cors_trust::<DomainRegistry>));

    // Start server
    let addr = config.listen_addr;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
