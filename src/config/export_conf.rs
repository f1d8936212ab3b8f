use std::env;
use chrono::FixedOffset;
use tracing::{debug, error};

use crate::config::ConfigError;

/// Settings for the CSV export
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Offset used to render the `Date` column, in minutes east of UTC
    pub utc_offset_minutes: i32,
}

impl CsvConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let utc_offset_minutes = match env::var("CSV_UTC_OFFSET_MINUTES") {
            Ok(raw) => raw.trim().parse::<i32>().map_err(|_| {
                error!("Invalid CSV_UTC_OFFSET_MINUTES value: {}", raw);
                ConfigError::ParseError("CSV_UTC_OFFSET_MINUTES must be a valid number".to_string())
            })?,
            Err(_) => 0,
        };
        debug!("CSV export offset: {} minutes", utc_offset_minutes);
        let config = CsvConfig { utc_offset_minutes };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.offset().is_none() {
            return Err(ConfigError::InvalidValue(format!(
                "CSV_UTC_OFFSET_MINUTES out of range: {}",
                self.utc_offset_minutes
            )));
        }
        Ok(())
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
    }
}

impl Default for CsvConfig {
    fn default() -> Self {
        CsvConfig { utc_offset_minutes: 0 }
    }
}
