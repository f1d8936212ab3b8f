use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation, Algorithm};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use crate::config::JwtConfig;

pub const ADMIN_ROLE: &str = "admin";

/// JWT claims carried by an admin session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (fixed for the single admin principal)
    pub sub: String,
    /// Role, always "admin" for tokens issued by the gate
    pub role: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// JWT ID (unique identifier for the token)
    pub jti: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Issued session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    pub token: String,
    pub expires_in: i64,
    pub token_type: String,
}

/// Error types for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to encode JWT token: {0}")]
    EncodingFailed(String),
    #[error("Failed to decode JWT token: {0}")]
    DecodingFailed(String),
    #[error("Token has expired")]
    TokenExpired,
    #[error("Invalid token format")]
    InvalidToken,
}


pub trait JwtTokenUtils {
    fn generate_session_token(&self, role: &str) -> Result<SessionToken, JwtError>;
    fn validate_session_token(&self, token: &str) -> Result<Claims, JwtError>;
    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError>;
}

#[derive(Debug, Clone)]
pub struct JwtTokenUtilsImpl{
    pub jwt_config: JwtConfig,
}

impl JwtTokenUtilsImpl {

    pub fn new(jwt_config: JwtConfig) -> Self {
        JwtTokenUtilsImpl {
            jwt_config,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        if let Some(ref issuer) = self.jwt_config.jwt_issuer {
            validation.set_issuer(&[issuer.as_str()]);
        }
        validation
    }
}

impl JwtTokenUtils for JwtTokenUtilsImpl {

    fn generate_session_token(&self, role: &str) -> Result<SessionToken, JwtError> {
        debug!("Generating session token with role: {}", role);

        let now = Utc::now();
        let expiration = Duration::try_minutes(self.jwt_config.session_expiration)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                error!("Session lifetime out of range: {} minutes", self.jwt_config.session_expiration);
                JwtError::EncodingFailed("session lifetime out of range".to_string())
            })?;

        let claims = Claims {
            sub: ADMIN_ROLE.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
            iss: self.jwt_config.jwt_issuer.clone(),
        };

        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(self.jwt_config.jwt_secret.as_bytes());

        match encode(&header, &claims, &encoding_key) {
            Ok(token) => {
                info!("Session token issued (jti: {})", claims.jti);
                Ok(SessionToken {
                    token,
                    expires_in: self.jwt_config.session_expiration * 60, // minutes to seconds
                    token_type: "Bearer".to_string(),
                })
            }
            Err(err) => {
                error!("Failed to encode JWT token: {}", err);
                Err(JwtError::EncodingFailed(err.to_string()))
            }
        }
    }

    fn validate_session_token(&self, token: &str) -> Result<Claims, JwtError> {
        debug!("Validating session token");

        let decoding_key = DecodingKey::from_secret(self.jwt_config.jwt_secret.as_bytes());

        match decode::<Claims>(token, &decoding_key, &self.validation()) {
            Ok(token_data) => {
                debug!("Token validation successful (jti: {})", token_data.claims.jti);
                Ok(token_data.claims)
            }
            Err(err) => match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    warn!("Session token has expired");
                    Err(JwtError::TokenExpired)
                }
                _ => {
                    error!("Failed to decode JWT token: {}", err);
                    Err(JwtError::DecodingFailed(err.to_string()))
                }
            },
        }
    }

    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError> {
        debug!("Extracting token from authorization header");

        let token = match auth_header.strip_prefix("Bearer ") {
            Some(t) => t.trim(),
            None => {
                error!("Invalid authorization header format");
                return Err(JwtError::InvalidToken);
            }
        };

        if token.is_empty() {
            error!("Empty token in authorization header");
            return Err(JwtError::InvalidToken);
        }

        Ok(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utils() -> JwtTokenUtilsImpl {
        JwtTokenUtilsImpl::new(JwtConfig::default())
    }

    #[test]
    fn test_issue_and_validate() {
        let utils = utils();
        let session = utils.generate_session_token(ADMIN_ROLE).unwrap();
        assert_eq!(session.token_type, "Bearer");
        assert_eq!(session.expires_in, 3600);
        let claims = utils.validate_session_token(&session.token).unwrap();
        assert_eq!(claims.role, ADMIN_ROLE);
        assert_eq!(claims.iss.as_deref(), Some("comparadise-backend"));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let other = JwtTokenUtilsImpl::new(JwtConfig {
            jwt_secret: "another_secret_that_is_long_enough_for_validation_purposes".to_string(),
            ..JwtConfig::default()
        });
        let session = other.generate_session_token(ADMIN_ROLE).unwrap();
        assert!(matches!(
            utils().validate_session_token(&session.token),
            Err(JwtError::DecodingFailed(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = JwtConfig::default();
        let now = Utc::now();
        let claims = Claims {
            sub: ADMIN_ROLE.to_string(),
            role: ADMIN_ROLE.to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
            jti: Uuid::new_v4().to_string(),
            iss: config.jwt_issuer.clone(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();
        assert!(matches!(
            JwtTokenUtilsImpl::new(config).validate_session_token(&token),
            Err(JwtError::TokenExpired)
        ));
    }

    #[test]
    fn test_out_of_range_lifetime_is_an_error() {
        let utils = JwtTokenUtilsImpl::new(JwtConfig {
            session_expiration: i64::MAX,
            ..JwtConfig::default()
        });
        assert!(matches!(
            utils.generate_session_token(ADMIN_ROLE),
            Err(JwtError::EncodingFailed(_))
        ));
    }

    #[test]
    fn test_extract_token_from_header() {
        let utils = utils();
        assert_eq!(utils.extract_token_from_header("Bearer abc.def").unwrap(), "abc.def");
        assert!(utils.extract_token_from_header("Basic abc").is_err());
        assert!(utils.extract_token_from_header("Bearer   ").is_err());
    }
}
