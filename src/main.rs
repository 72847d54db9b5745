use tracing::info;

use anonbbs::{web, BbsError, BoardService, Config, Database, WebServer};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

fn load_config() -> anonbbs::Result<Config> {
    let path = std::env::var("ANONBBS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    match Config::load_with_env(&path) {
        Ok(config) => Ok(config),
        Err(BbsError::Io(e)) => {
            eprintln!("Failed to load {path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides()?;
            Ok(config)
        }
        Err(e) => Err(e),
    }
}

#[tokio::main]
async fn main() -> anonbbs::Result<()> {
    let config = load_config()?;

    // Initialize logging
    if let Err(e) = anonbbs::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        anonbbs::logging::init_console_only(&config.logging.level);
    }

    config.validate()?;

    info!("anonbbs - anonymous message board");

    let db = Database::open(&config.database).await?;
    info!("Database opened at {}", config.database.path);

    let board = BoardService::new(db.clone(), config.board.clone());
    let server = WebServer::new(&config.web, board);

    let result = server.run_until(web::shutdown_signal()).await;

    db.close().await;

    result.map_err(Into::into)
}
