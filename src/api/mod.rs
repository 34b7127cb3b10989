pub mod handlers;

pub use handlers::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;

/// 构建完整路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/requests", post(handlers::submit_request))
        .route("/api/requests", get(handlers::list_requests))
        .route("/api/requests/export", get(handlers::export_requests))
        .route("/api/requests/:id", get(handlers::get_request))
        .route("/api/requests/:id/text", get(handlers::get_request_text))
        .layer(ServiceBuilder::new())
        .with_state(state)
}
