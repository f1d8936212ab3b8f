use comparadise_backend::app::app::App;
use comparadise_backend::util::logger::Logger;
use dotenv::dotenv;
use tracing::{error, info, warn};


#[tokio::main]
async fn main() {
    // .env must be loaded before the logger reads LOG_TO_FILE and RUST_LOG
    let dotenv_result = dotenv();

    let _logger = if Logger::file_logging_enabled() {
        match Logger::new() {
            Ok(logger) => Some(logger),
            Err(e) => {
                Logger::init_console();
                warn!("⚠️ File logging unavailable: {}", e);
                None
            }
        }
    } else {
        Logger::init_console();
        None
    };

    info!("🚀 Starting Comparadise Backend Application");
    match dotenv_result {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = match App::new().await {
        Ok(app) => app,
        Err(e) => {
            error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = app.start().await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
