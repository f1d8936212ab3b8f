pub mod app_conf;
pub mod supabase_conf;
pub mod jwt_conf;
pub mod admin_conf;
pub mod export_conf;


pub use app_conf::{AppConfig, StoreBackend};
pub use supabase_conf::SupabaseConfig;
pub use jwt_conf::JwtConfig;
pub use admin_conf::AdminConfig;
pub use export_conf::CsvConfig;

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
    
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
    
    #[error("Validation error: {0}")]
    ValidationError(String),
    
    #[error("Parse error: {0}")]
    ParseError(String),
}
