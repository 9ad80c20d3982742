mod auth;
mod config;
mod error;
mod extract;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::StatusCode,
    middleware,
    routing::get,
    Router,
};
use migration::{Migrator, MigratorTrait};
use serde_json::{json, Value};
use theater_service::{
    auth::TokenKeys,
    sea_orm::{Database, DatabaseConnection},
    PerformanceCascade,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use auth::AuthUser;
pub use config::Config;
pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub conn: DatabaseConnection,
    pub tokens: Arc<TokenKeys>,
    pub performance_cascade: PerformanceCascade,
}

impl AppState {
    pub fn new(
        conn: DatabaseConnection,
        tokens: TokenKeys,
        performance_cascade: PerformanceCascade,
    ) -> Self {
        Self {
            conn,
            tokens: Arc::new(tokens),
            performance_cascade,
        }
    }

    pub fn from_config(conn: DatabaseConnection, config: &Config) -> Self {
        let tokens = TokenKeys::new(
            config.secret_key.as_bytes(),
            chrono::Duration::hours(config.token_ttl_hours),
        );
        Self::new(conn, tokens, config.performance_cascade)
    }
}

/// The whole HTTP surface. Everything under `/api` except `/api/auth` and
/// `/api/public` sits behind the bearer-token gate, as does `/users`.
pub fn router(state: AppState) -> Router {
    let gate = middleware::from_fn_with_state(state.clone(), auth::require_auth);

    let protected = Router::new()
        .nest("/api/actors", routes::actor::router())
        .nest("/api/performances", routes::performance::router())
        .nest("/api/employments", routes::employment::router())
        .nest("/users", routes::user::router())
        .route_layer(gate);

    Router::new()
        .route("/", get(hello))
        .route("/health", get(health))
        .nest("/api/auth", auth::router())
        .merge(protected)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn hello() -> &'static str {
    "Hello World!"
}

async fn health() -> axum::Json<Value> {
    axum::Json(json!({ "status": "ok" }))
}

async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Not Found")
}

#[tokio::main]
async fn start() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env()?;
    info!(?config, "starting");

    let conn = Database::connect(config.database_url.as_str())
        .await
        .context("Database connection failed")?;
    Migrator::up(&conn, None)
        .await
        .context("Running migrations failed")?;

    let state = AppState::from_config(conn, &config);
    let listener = TcpListener::bind(config.server_url())
        .await
        .with_context(|| format!("Cannot listen on {}", config.server_url()))?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state)).await?;

    Ok(())
}

pub fn main() {
    let result = start();

    if let Some(err) = result.err() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
