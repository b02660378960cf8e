//! Development server: the kit auth hook in front of a placeholder app.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use kit_auth::adapters::{InMemoryAuthAdapter, InMemoryBillingProvider, PostgresAuthAdapter};
use kit_auth::config::{AppConfig, ConfigError, DatabaseConfig, ValidationError};
use kit_auth::domain::foundation::{DomainError, User, UserId};
use kit_auth::ports::AuthAdapter;
use kit_auth::{KitAuth, KitAuthOptions, SetupError};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Hook setup failed: {0}")]
    Setup(#[from] SetupError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Seeding demo data failed: {0}")]
    Seed(#[from] DomainError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("kit-auth exited with error: {}", e);
        eprintln!("kit-auth: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let (adapter, in_memory) = match &config.database {
        Some(database) => (connect(database).await?, false),
        None => {
            info!("No database configured, using in-memory adapter");
            let adapter: Arc<dyn AuthAdapter> = Arc::new(InMemoryAuthAdapter::new());
            (adapter, true)
        }
    };

    let billing = Arc::new(InMemoryBillingProvider::new(
        adapter.clone(),
        config.billing.checkout_base_url.clone(),
    ));

    let kit = KitAuth::new(
        KitAuthOptions::from_config(&config)
            .with_adapter(adapter.clone())
            .with_billing(billing.clone()),
    )?;

    if in_memory && !config.is_production() {
        seed_demo_user(&kit, adapter.as_ref()).await?;
    }

    let app = Router::new()
        .route("/", get(home))
        .route("/checkout/:session_id", get(complete_checkout))
        .route("/checkout/:session_id/cancel", get(abandon_checkout))
        .fallback(fallback)
        .with_state(billing)
        .layer(kit.layer())
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn connect(database: &DatabaseConfig) -> Result<Arc<dyn AuthAdapter>, StartupError> {
    let pool = database.pool_options().connect(&database.url).await?;
    info!("Connected to PostgreSQL");

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Migrations applied");
    }

    Ok(Arc::new(PostgresAuthAdapter::new(pool)))
}

/// Creates a demo user and logs a bearer token for trying the routes.
async fn seed_demo_user(kit: &KitAuth, adapter: &dyn AuthAdapter) -> Result<(), StartupError> {
    let user = User::new(UserId::generate(), "demo@example.com", Some("Demo".to_string()));
    adapter.create_user(&user).await?;

    let session = kit.create_session(&user.id).await?;
    info!(
        user_id = %user.id,
        "Demo session: curl -H 'Authorization: Bearer {}' http://localhost/auth/session",
        session.token.as_str()
    );
    Ok(())
}

async fn home() -> &'static str {
    "kit-auth development server"
}

/// Stands in for the provider's hosted page: visiting it pays.
async fn complete_checkout(
    State(billing): State<Arc<InMemoryBillingProvider>>,
    Path(session_id): Path<String>,
) -> Response {
    match billing.complete_checkout(&session_id).await {
        Ok(completed) => {
            info!(
                subscription_id = %completed.subscription.id,
                user_id = %completed.subscription.user_id,
                "Demo checkout paid"
            );
            Redirect::to(&completed.redirect_to).into_response()
        }
        Err(e) => {
            warn!(session_id = %session_id, "Demo checkout failed: {}", e);
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
    }
}

async fn abandon_checkout(
    State(billing): State<Arc<InMemoryBillingProvider>>,
    Path(session_id): Path<String>,
) -> Response {
    match billing.abandon_checkout(&session_id).await {
        Ok(cancel_url) => Redirect::to(&cancel_url).into_response(),
        Err(e) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    }
}

async fn fallback(uri: Uri) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, format!("Nothing at {}", uri.path()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
