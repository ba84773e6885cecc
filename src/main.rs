use wardbook::api::server::start_server;
use wardbook::config::{self, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    wardbook::init_tracing();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let cfg = ServerConfig::from_env()?;

    if let Some(parent) = cfg.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Open once at startup so migrations (and any failure) happen before
    // the first request.
    let conn = wardbook::db::open_database(&cfg.database_path)?;
    tracing::info!(path = %cfg.database_path.display(), "database ready");
    drop(conn);

    let mut server = start_server(&cfg).await?;
    tracing::info!(addr = %server.addr, "listening");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    server.shutdown();

    Ok(())
}
