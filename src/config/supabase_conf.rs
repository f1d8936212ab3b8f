use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// Supabase (PostgREST) configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. https://xyzcompany.supabase.co
    pub url: String,
    /// Anonymous (or service) API key
    pub api_key: String,
    /// Table holding the submissions
    pub submissions_table: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SupabaseConfig {
    /// Load Supabase configuration from environment variables
    ///
    /// Expected environment variables:
    /// - SUPABASE_URL: project URL (required)
    /// - SUPABASE_ANON_KEY: API key (required)
    /// - SUPABASE_SUBMISSIONS_TABLE: table name (defaults to "submissions")
    /// - SUPABASE_TIMEOUT_SECS: request timeout in seconds (defaults to 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading Supabase configuration from environment variables");

        let url = env::var("SUPABASE_URL")
            .map_err(|_| {
                error!("SUPABASE_URL environment variable not found");
                ConfigError::EnvVarNotFound("SUPABASE_URL".to_string())
            })?;
        debug!("Supabase URL: {}", url);

        let api_key = env::var("SUPABASE_ANON_KEY")
            .map_err(|_| {
                error!("SUPABASE_ANON_KEY environment variable not found");
                ConfigError::EnvVarNotFound("SUPABASE_ANON_KEY".to_string())
            })?;
        debug!("Supabase API key loaded (length: {} chars)", api_key.len());

        let submissions_table = env::var("SUPABASE_SUBMISSIONS_TABLE").unwrap_or_else(|_| {
            debug!("SUPABASE_SUBMISSIONS_TABLE not set, using default: submissions");
            "submissions".to_string()
        });

        let timeout_secs = env::var("SUPABASE_TIMEOUT_SECS")
            .unwrap_or_else(|_| {
                warn!("SUPABASE_TIMEOUT_SECS not set, using default: 10");
                "10".to_string()
            })
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid SUPABASE_TIMEOUT_SECS value");
                ConfigError::ParseError("SUPABASE_TIMEOUT_SECS must be a valid number".to_string())
            })?;

        let config = SupabaseConfig {
            url: url.trim_end_matches('/').to_string(),
            api_key,
            submissions_table,
            timeout_secs,
        };
        config.validate()?;

        info!("Supabase configuration loaded successfully");
        Ok(config)
    }

    /// Configuration pointing at a local PostgREST instance
    pub fn from_test_env() -> Self {
        SupabaseConfig {
            url: env::var("TEST_SUPABASE_URL").unwrap_or_else(|_| "http://127.0.0.1:54321".to_string()),
            api_key: env::var("TEST_SUPABASE_ANON_KEY").unwrap_or_else(|_| "test-anon-key".to_string()),
            submissions_table: "submissions".to_string(),
            timeout_secs: 2,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        info!("Validating Supabase configuration");

        if self.url.is_empty() {
            error!("Supabase URL is empty");
            return Err(ConfigError::ValidationError("Supabase URL cannot be empty".to_string()));
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            error!("Supabase URL has no http(s) scheme");
            return Err(ConfigError::InvalidValue(format!("Supabase URL must start with http:// or https://: {}", self.url)));
        }

        if self.api_key.is_empty() {
            error!("Supabase API key is empty");
            return Err(ConfigError::ValidationError("Supabase API key cannot be empty".to_string()));
        }

        if self.submissions_table.is_empty() {
            error!("Submissions table name is empty");
            return Err(ConfigError::ValidationError("Submissions table cannot be empty".to_string()));
        }

        if self.timeout_secs == 0 {
            error!("Supabase timeout is 0");
            return Err(ConfigError::ValidationError("Supabase timeout must be greater than 0".to_string()));
        }
        info!("Supabase configuration validation successful");
        Ok(())
    }

    /// REST endpoint of the submissions table
    pub fn table_endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.submissions_table)
    }
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        SupabaseConfig {
            url: "http://127.0.0.1:54321".to_string(),
            api_key: String::new(),
            submissions_table: "submissions".to_string(),
            timeout_secs: 10,
        }
    }
}
