use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Wardbook";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bind address when `WARDBOOK_ADDR` is not set
pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";

/// Get the application data directory
/// ~/Wardbook/ on all platforms
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Wardbook")
}

/// Default database path: ~/Wardbook/wardbook.db
pub fn default_database_path() -> PathBuf {
    app_data_dir().join("wardbook.db")
}

/// Default tracing filter when RUST_LOG is not set
pub fn default_log_filter() -> String {
    "wardbook=info,tower_http=info".to_string()
}

/// Runtime configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub database_path: PathBuf,
}

impl ServerConfig {
    /// Resolve configuration from `WARDBOOK_ADDR` and `WARDBOOK_DB`,
    /// falling back to the defaults above.
    pub fn from_env() -> Result<Self, String> {
        let addr = std::env::var("WARDBOOK_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let bind_addr: SocketAddr = addr
            .parse()
            .map_err(|e| format!("Invalid WARDBOOK_ADDR '{addr}': {e}"))?;

        let database_path = std::env::var("WARDBOOK_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_database_path());

        Ok(Self {
            bind_addr,
            database_path,
        })
    }
}
