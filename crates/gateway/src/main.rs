//! Premiações API Gateway
//!
//! The single entry point for the public showcase and the admin surface.
//! Handles:
//! - Session validation and the organization allow-list
//! - Public gallery, awards, and dashboard routes
//! - Admin CRUD and storage uploads
//! - Observability (logging, metrics)

mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    response::Redirect,
    routing::{get, post, put},
    Extension, Router,
};
use premiacoes_common::{
    auth::TokenManager,
    config::AppConfig,
    db::DbPool,
    metrics,
    storage::StorageClient,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DbPool,
    pub storage: StorageClient,
    pub tokens: TokenManager,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration; a missing session secret or organization id is fatal
    let config = AppConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.observability.log_level.clone()));

    if config.observability.json_logging {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    info!("Starting Premiações API Gateway v{}", premiacoes_common::VERSION);

    let config = Arc::new(config);

    // Initialize metrics
    metrics::register_metrics();

    if config.observability.metrics_port > 0 {
        let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics_port));
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .install()?;
        info!("Metrics exporter listening on {}", metrics_addr);
    }

    // Initialize database connection
    info!("Connecting to database...");
    let db = DbPool::new(&config.database).await?;

    // Storage and session services
    let storage = StorageClient::new(&config.storage)?;

    let token_secret = config
        .auth
        .token_secret
        .clone()
        .ok_or("auth.token_secret is required")?;
    let organization_id = config
        .auth
        .organization_id
        .ok_or("auth.organization_id is required")?;

    let tokens = TokenManager::new(
        &token_secret,
        config.auth.token_expiration_secs,
        organization_id,
    );

    // Create app state
    let state = AppState {
        config: config.clone(),
        db,
        storage,
        tokens: tokens.clone(),
    };

    // Build the router
    let app = create_router(state, tokens, config.storage.max_upload_bytes);

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the main application router
fn create_router(state: AppState, tokens: TokenManager, max_upload_bytes: usize) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // Public routes (no session required)
    let public_routes = Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))

        // Homepage hero
        .route("/home", get(handlers::home_media::get_active))

        // Awards showcase
        .route("/awards", get(handlers::awards::list_public))
        .route("/awards/{id}", get(handlers::awards::get_public))

        // Honorees showcase
        .route("/honorees", get(handlers::honorees::list_public))
        .route("/honorees/{id}", get(handlers::honorees::get_public))
        .route("/gallery", get(handlers::honorees::gallery))
        .route("/timeline", get(handlers::honorees::timeline))

        // Executive dashboard
        .route("/dashboard", get(handlers::dashboard::dashboard))

        // Sign-in and reset-by-code
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/password-reset/request", post(handlers::auth::request_reset))
        .route("/auth/password-reset/confirm", post(handlers::auth::confirm_reset));

    // Session routes (any signed-in profile)
    let session_routes = Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/password", put(handlers::auth::update_password))
        .route("/auth/first-access", post(handlers::auth::first_access));

    // Admin routes (admin role enforced per handler)
    let admin_routes = Router::new()
        .route(
            "/honorees",
            get(handlers::honorees::list_admin).post(handlers::honorees::create),
        )
        .route(
            "/honorees/{id}",
            get(handlers::honorees::get_admin)
                .put(handlers::honorees::update)
                .delete(handlers::honorees::delete),
        )
        .route("/honorees/{id}/published", put(handlers::honorees::set_published))
        .route(
            "/awards",
            get(handlers::awards::list_admin).post(handlers::awards::create),
        )
        .route(
            "/awards/{id}",
            get(handlers::awards::get_admin)
                .put(handlers::awards::update)
                .delete(handlers::awards::delete),
        )
        .route(
            "/brands",
            get(handlers::brands::list).post(handlers::brands::create),
        )
        .route(
            "/brands/{id}",
            put(handlers::brands::update).delete(handlers::brands::delete),
        )
        .route(
            "/units",
            get(handlers::units::list).post(handlers::units::create),
        )
        .route(
            "/units/{id}",
            put(handlers::units::update).delete(handlers::units::delete),
        )
        .route(
            "/regionals",
            get(handlers::regionals::list).post(handlers::regionals::create),
        )
        .route(
            "/regionals/{id}",
            put(handlers::regionals::update).delete(handlers::regionals::delete),
        )
        .route(
            "/home-media",
            get(handlers::home_media::list).post(handlers::home_media::create),
        )
        .route(
            "/home-media/{id}",
            put(handlers::home_media::update).delete(handlers::home_media::delete),
        )
        .route("/home-media/{id}/activate", post(handlers::home_media::activate))
        .route(
            "/uploads/{bucket}",
            post(handlers::uploads::upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/dashboard/export", get(handlers::dashboard::export))

        // Consolidated pages keep their legacy paths reachable
        .route("/unidades", get(redirect_unidades))
        .route("/marcas", get(redirect_marcas))
        .route("/relatorios", get(redirect_relatorios));

    let api_routes = public_routes
        .merge(session_routes)
        .nest("/admin", admin_routes);

    // Compose the app
    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .layer(Extension(tokens))
        .with_state(state)
}

async fn redirect_unidades() -> Redirect {
    Redirect::permanent("/api/admin/units")
}

async fn redirect_marcas() -> Redirect {
    Redirect::permanent("/api/admin/brands")
}

async fn redirect_relatorios() -> Redirect {
    Redirect::permanent("/api/dashboard")
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
