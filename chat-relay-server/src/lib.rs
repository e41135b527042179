//! HTTP surface of the chat relay.

pub mod handlers;

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, EnvFilter};

pub use handlers::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    // Browser frontends call the relay directly, so any origin is allowed
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/", get(handlers::health))
        .route("/health", get(handlers::health))
        .route("/api/chat", post(handlers::chat))
        .route("/chat", post(handlers::chat))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Initialise the global tracing subscriber.
pub fn init_tracing() {
    // RUST_LOG=debug chat-relay
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    fmt().with_env_filter(env_filter).with_target(false).init();
}
