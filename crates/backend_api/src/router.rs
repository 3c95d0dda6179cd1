use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use sales_store::SaleRepository;

/// Create the main application router with all API endpoints
pub fn create_router(repo: Arc<dyn SaleRepository>) -> Router {
    // Create CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Sale CRUD
        .route(
            "/api/sales",
            get(handlers::list_sales).post(handlers::create_sale),
        )
        .route(
            "/api/sales/:id",
            put(handlers::update_sale).delete(handlers::delete_sale),
        )
        // CSV import/export
        .route("/api/sales/import", post(handlers::import_sales))
        .route("/api/sales/export", get(handlers::export_sales))
        // Analytics
        .route("/api/analytics", get(handlers::get_analytics))
        // Add shared state
        .with_state(repo)
        // Add middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
