use std::sync::Arc;

use todo_api::{
    app::{create_router, AppState},
    auth::{AccessPolicy, AuthService, PgUserRepository, TokenService},
    config::Config,
    db,
    tasks::{PgTaskRepository, TaskService},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_api=info,tower_http=info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    if let Err(e) = run().await {
        tracing::error!("Todo API failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Todo API - Starting...");

    // Fails before touching the network when JWT_SECRET is absent
    let config = Config::from_env()?;
    tracing::debug!("Loaded configuration: {:?}", config);

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url, config.max_connections).await?;
    db::run_migrations(&db_pool).await?;

    let token_service = TokenService::new(&config.jwt_secret, config.token_ttl);
    tracing::info!(
        "Access tokens expire after {} minutes",
        token_service.access_token_ttl().num_minutes()
    );
    let state = AppState {
        auth: AuthService::new(Arc::new(PgUserRepository::new(db_pool.clone())), token_service),
        tasks: TaskService::new(Arc::new(PgTaskRepository::new(db_pool.clone()))),
        policy: AccessPolicy {
            tasks_require_auth: config.tasks_require_auth,
        },
    };

    let app = create_router(state, &config.cors_allowed_origins);

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Todo API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;
    tracing::info!("Todo API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
