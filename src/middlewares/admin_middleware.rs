use axum::{http::Request, middleware::Next, response::Response, extract::State, body::Body};
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::debug;
use crate::service::admin_auth_service::{AdminAuthServiceImpl, AdminAuthService};
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

pub struct AdminAuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub auth_service: Arc<AdminAuthServiceImpl>,
}

pub async fn admin_auth(
    State(state): State<Arc<AdminAuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = state
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let claims = state.auth_service.verify_session(&token).map_err(|e| {
        debug!("Rejected admin request: {}", e);
        StatusCode::UNAUTHORIZED
    })?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
