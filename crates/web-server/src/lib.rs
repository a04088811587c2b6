//! # Camp Registry Web Server
//!
//! The HTTP surface of the registry. Each handler opens one unit of work,
//! validates, mutates, commits and projects the result.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | /campers | 200 |
//! | POST | /campers | 201 |
//! | GET | /campers/{id} | 200 |
//! | PATCH | /campers/{id} | 202 |
//! | GET | /activities | 200 |
//! | DELETE | /activities/{id} | 204 |
//! | POST | /signups | 201 |

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use configuration::Settings;
use database::DbRepository;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub db_repo: DbRepository,
}

/// Builds the router over `state`. Request bodies above `body_limit` bytes are refused.
pub fn create_router(state: Arc<AppState>, body_limit: usize) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(|| async { "OK" }))
        .route(
            "/campers",
            get(handlers::list_campers).post(handlers::create_camper),
        )
        .route(
            "/campers/{id}",
            get(handlers::get_camper).patch(handlers::update_camper),
        )
        .route("/activities", get(handlers::list_activities))
        .route("/activities/{id}", delete(handlers::delete_activity))
        .route("/signups", post(handlers::create_signup))
        .with_state(state)
        .layer(CorsLayer::permissive())
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit))
}

/// Connects to the store, applies migrations and serves until Ctrl-C.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    // Note: Tracing is already initialized by the caller.
    let db_pool = database::connect(&settings.database).await?;
    database::run_migrations(&db_pool).await?;
    let db_repo = DbRepository::new(db_pool);

    let app_state = Arc::new(AppState { db_repo });
    let app = create_router(app_state, settings.server.body_limit_bytes);

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
}
