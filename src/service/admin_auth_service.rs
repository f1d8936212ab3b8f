use tracing::{info, warn, error, instrument};
use crate::config::AdminConfig;
use crate::util::error::ServiceError;
use crate::util::jwt::{Claims, JwtTokenUtils, JwtTokenUtilsImpl, SessionToken, ADMIN_ROLE};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};
use std::sync::Arc;

use async_trait::async_trait;

pub const WRONG_PASSWORD_MESSAGE: &str = "Mot de passe incorrect";

/// Server-side admin gate: a password check that yields a short-lived session token.
#[async_trait]
pub trait AdminAuthService: Send + Sync {
	async fn login(&self, password: &str) -> Result<SessionToken, ServiceError>;
	fn verify_session(&self, token: &str) -> Result<Claims, ServiceError>;
}

pub struct AdminAuthServiceImpl {
	pub admin_config: AdminConfig,
	pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl AdminAuthServiceImpl {
	pub fn new(admin_config: AdminConfig, jwt_utils: Arc<JwtTokenUtilsImpl>) -> Self {
		AdminAuthServiceImpl { admin_config, jwt_utils }
	}
}

#[async_trait]
impl AdminAuthService for AdminAuthServiceImpl {
	#[instrument(skip(self, password))]
	async fn login(&self, password: &str) -> Result<SessionToken, ServiceError> {
		info!("Admin login attempt");
		let hash = self.admin_config.password_hash.clone();
		let candidate = password.to_string();
		// argon2 is deliberately slow; keep it off the async workers
		let valid = tokio::task::spawn_blocking(move || PasswordUtilsImpl::verify_password(&candidate, &hash))
			.await
			.map_err(|e| ServiceError::InternalError(format!("Password check aborted: {}", e)))?
			.map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
		if !valid {
			warn!("Admin login rejected");
			return Err(ServiceError::Unauthorized(WRONG_PASSWORD_MESSAGE.to_string()));
		}
		let session = self.jwt_utils.generate_session_token(ADMIN_ROLE).map_err(|e| {
			error!("Failed to issue admin session: {e}");
			ServiceError::InternalError(format!("JWT error: {}", e))
		})?;
		info!("Admin session issued");
		Ok(session)
	}

	fn verify_session(&self, token: &str) -> Result<Claims, ServiceError> {
		let claims = self
			.jwt_utils
			.validate_session_token(token)
			.map_err(|e| ServiceError::Unauthorized(e.to_string()))?;
		if claims.role != ADMIN_ROLE {
			return Err(ServiceError::Unauthorized("Admin role required".to_string()));
		}
		Ok(claims)
	}
}
