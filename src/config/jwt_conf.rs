use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// Longest admin session accepted, in minutes (one day)
pub const MAX_SESSION_EXPIRATION: i64 = 1440;

/// JWT configuration for admin session tokens
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub jwt_secret: String,
    /// Admin session lifetime in minutes
    pub session_expiration: i64,
    /// JWT issuer (optional)
    pub jwt_issuer: Option<String>,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables
    /// 
    /// Expected environment variables:
    /// - JWT_SECRET: Secret key for signing JWT tokens (required)
    /// - JWT_SESSION_EXPIRY: Admin session lifetime in minutes (defaults to 60)
    /// - JWT_ISSUER: JWT issuer (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading JWT configuration from environment variables");

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| {
                error!("JWT_SECRET environment variable not found");
                ConfigError::EnvVarNotFound("JWT_SECRET".to_string())
            })?;
        debug!("JWT secret loaded (length: {} chars)", jwt_secret.len());

        let session_expiration = env::var("JWT_SESSION_EXPIRY")
            .unwrap_or_else(|_| {
                warn!("JWT_SESSION_EXPIRY not set, using default: 60 minutes");
                "60".to_string()
            })
            .parse::<i64>()
            .map_err(|e| {
                error!("Invalid JWT_SESSION_EXPIRY value: {}", e);
                ConfigError::ParseError(format!("JWT_SESSION_EXPIRY: {}", e))
            })?;
        debug!("JWT session expiration: {} minutes", session_expiration);

        let jwt_issuer = env::var("JWT_ISSUER").ok();

        let config = JwtConfig {
            jwt_secret,
            session_expiration,
            jwt_issuer,
        };
        config.validate()?;

        info!("JWT configuration loaded successfully");
        Ok(config)
    }

    /// Validate the JWT configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        debug!("Validating JWT configuration");

        if self.jwt_secret.is_empty() {
            error!("JWT secret cannot be empty");
            return Err(ConfigError::ValidationError("JWT secret cannot be empty".to_string()));
        }

        if self.jwt_secret.len() < 32 {
            error!("JWT secret is too short (minimum 32 characters required)");
            return Err(ConfigError::ValidationError("JWT secret must be at least 32 characters long".to_string()));
        }

        if self.session_expiration <= 0 {
            error!("Session expiration must be greater than 0");
            return Err(ConfigError::ValidationError("Session expiration must be greater than 0".to_string()));
        }

        if self.session_expiration > MAX_SESSION_EXPIRATION {
            error!("Session expiration exceeds {} minutes", MAX_SESSION_EXPIRATION);
            return Err(ConfigError::ValidationError(format!(
                "Session expiration must be at most {} minutes",
                MAX_SESSION_EXPIRATION
            )));
        }

        debug!("JWT configuration validation passed");
        Ok(())
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            jwt_secret: "test_secret_key_for_jwt_testing_should_be_long_enough_for_security_purposes".to_string(),
            session_expiration: 60,
            jwt_issuer: Some("comparadise-backend".to_string()),
        }
    }
}
