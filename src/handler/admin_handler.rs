use axum::{extract::State, response::IntoResponse, Json};
use crate::handler::extract::AppJson;
use crate::dto::submission_dto::{AdminLoginRequest, AdminSessionResponse};
use crate::service::admin_auth_service::{AdminAuthServiceImpl, AdminAuthService};
use crate::util::error::HandlerError;
use std::sync::Arc;
use validator::Validate;

// Login: exchanges the admin password for a session token
pub async fn admin_login_handler(
    State(service): State<Arc<AdminAuthServiceImpl>>,
    AppJson(payload): AppJson<AdminLoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(e));
    }
    let session = service.login(&payload.password).await?;
    Ok(Json(AdminSessionResponse {
        token: session.token,
        token_type: session.token_type,
        expires_in: session.expires_in,
    }))
}
