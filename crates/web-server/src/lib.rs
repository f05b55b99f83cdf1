//! REST front end of the weather service.
//!
//! Each handler parses the form, validates the entity, calls the injected
//! `WeatherStore` and answers with the entity as JSON. Parse and validation
//! failures become 400, store failures 500, both with an empty body.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use configuration::Config;
use database::WeatherStore;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

pub mod error;
pub mod forms;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState<S> {
    pub store: S,
}

impl<S: WeatherStore> AppState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

/// Builds the application routes around an already constructed store.
pub fn router<S: WeatherStore>(state: Arc<AppState<S>>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/cities", post(handlers::create_city::<S>))
        .route(
            "/cities/:id",
            patch(handlers::modify_city::<S>).delete(handlers::delete_city::<S>),
        )
        .route("/temperatures", post(handlers::create_measurement::<S>))
        .route("/forecasts/:id", get(handlers::get_forecasts))
        .route("/webhooks", post(handlers::create_webhook))
        .route("/webhooks/:id", delete(handlers::delete_webhook))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Binds the configured address and serves requests until Ctrl+C or SIGTERM.
pub async fn run_server<S: WeatherStore>(config: &Config, store: S) -> anyhow::Result<()> {
    let app_state = Arc::new(AppState::new(store));
    let app = router(app_state, Duration::from_secs(config.request_timeout_secs));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("REST server is listening: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("REST server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler.");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler.");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down."),
        () = terminate => tracing::info!("Received SIGTERM, shutting down."),
    }
}
