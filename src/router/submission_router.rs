use axum::{Router, routing::{post, get, delete}, middleware};
use crate::handler::submission_handler::{
    create_quote_handler,
    create_contact_handler,
    list_submissions_handler,
    submission_stats_handler,
    export_submissions_handler,
    delete_submission_handler,
    clear_submissions_handler,
};
use std::sync::Arc;
use crate::service::submission_service::SubmissionServiceImpl;
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};


pub fn submission_router(service: Arc<SubmissionServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    // Public form endpoints
    let public = Router::new()
        .route("/submissions/quote", post(create_quote_handler))
        .route("/submissions/contact", post(create_contact_handler));

    // Admin-protected routes
    let admin = Router::new()
        .route("/admin/submissions", get(list_submissions_handler).delete(clear_submissions_handler))
        .route("/admin/submissions/stats", get(submission_stats_handler))
        .route("/admin/submissions/export", get(export_submissions_handler))
        .route("/admin/submissions/{id}", delete(delete_submission_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public
        .merge(admin)
        .with_state(service)
}
