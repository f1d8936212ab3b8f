use std::env;
use std::fmt;
use tracing::{info, warn};

use crate::config::ConfigError;
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

/// Admin gate credentials. Only an argon2 hash is kept in memory.
#[derive(Clone)]
pub struct AdminConfig {
    pub password_hash: String,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

impl AdminConfig {
    /// Reads `ADMIN_PASSWORD_HASH` (argon2 PHC string) or, failing that,
    /// hashes `ADMIN_PASSWORD` once at startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(hash) = env::var("ADMIN_PASSWORD_HASH") {
            info!("Using ADMIN_PASSWORD_HASH for the admin gate");
            let config = AdminConfig { password_hash: hash };
            config.validate()?;
            return Ok(config);
        }

        let password = env::var("ADMIN_PASSWORD")
            .map_err(|_| ConfigError::EnvVarNotFound("ADMIN_PASSWORD_HASH or ADMIN_PASSWORD".to_string()))?;
        warn!("ADMIN_PASSWORD_HASH not set, hashing ADMIN_PASSWORD at startup");
        Self::from_password(&password)
    }

    pub fn from_password(password: &str) -> Result<Self, ConfigError> {
        if password.is_empty() {
            return Err(ConfigError::ValidationError("Admin password cannot be empty".to_string()));
        }
        let password_hash = PasswordUtilsImpl::hash_password(password)
            .map_err(|e| ConfigError::InvalidValue(format!("Failed to hash admin password: {}", e)))?;
        Ok(AdminConfig { password_hash })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.password_hash.starts_with("$argon2") {
            return Err(ConfigError::InvalidValue("ADMIN_PASSWORD_HASH must be an argon2 PHC string".to_string()));
        }
        Ok(())
    }
}
