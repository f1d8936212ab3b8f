use std::env;
use tracing::warn;

/// Which submission store the application talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgrest,
    Memory,
}

impl StoreBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgrest" | "supabase" => Some(StoreBackend::Postgrest),
            "memory" => Some(StoreBackend::Memory),
            _ => None,
        }
    }
}

pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store_backend: StoreBackend,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);
        let store_backend = match env::var("STORE_BACKEND") {
            Ok(value) => StoreBackend::parse(&value).unwrap_or_else(|| {
                warn!("Unknown STORE_BACKEND '{}', falling back to postgrest", value);
                StoreBackend::Postgrest
            }),
            Err(_) => StoreBackend::Postgrest,
        };
        AppConfig { host, port, store_backend }
    }
}
