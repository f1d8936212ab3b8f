use axum::{Router, routing::post};
use crate::handler::admin_handler::admin_login_handler;
use crate::service::admin_auth_service::AdminAuthServiceImpl;
use std::sync::Arc;

pub fn admin_router(service: Arc<AdminAuthServiceImpl>) -> Router {
    Router::new()
        .route("/admin/login", post(admin_login_handler))
        .with_state(service)
}
