use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create routes for moderation and the admin stats view
pub fn routes(service: Arc<AdminService>) -> Router {
    Router::new()
        .route(
            "/api/designs/{id}/status",
            put(handlers::update_design_status),
        )
        .route("/api/admin/stats", get(handlers::get_stats))
        .with_state(service)
}
