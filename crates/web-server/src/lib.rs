use analyzer::Analyzer;
use axum::{
    routing::{get, post},
    Router,
};
use narrative::Narrator;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
// Note: Tracing is initialised by the binary before the server starts.

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
    pub narrator: Arc<dyn Narrator>,
}

/// Builds the application router with every route, CORS and request tracing.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/indicators", get(handlers::list_indicators))
        .route("/api/indicators/:id", get(handlers::get_indicator_analysis))
        .route("/api/indicators/:id/insight", get(handlers::get_indicator_insight))
        .route("/api/forecast", post(handlers::post_forecast))
        .route("/api/forecast/batch", post(handlers::post_forecast_batch))
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = router(Arc::new(state));

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
