//! Configuration check command.
//!
//! Loads the server configuration exactly as the server would and reports
//! the effective settings. Secrets are never printed.

use sugarbook_server::config::{ConfigError, CorsOrigins, ServerConfig, StoreBackend};

/// Validate the environment.
///
/// # Errors
///
/// Returns the first `ConfigError` the server would fail on.
pub fn run() -> Result<(), ConfigError> {
    let config = ServerConfig::from_env()?;

    tracing::info!(
        store = store_name(&config.store),
        addr = %config.socket_addr(),
        uploads_dir = %config.uploads_dir.display(),
        max_upload_bytes = config.max_upload_bytes,
        cors = %cors_summary(&config.cors_origins),
        sentry = config.sentry_dsn.is_some(),
        "Configuration OK"
    );
    Ok(())
}

const fn store_name(store: &StoreBackend) -> &'static str {
    match store {
        StoreBackend::Postgres { .. } => "postgres",
        StoreBackend::Memory => "memory",
    }
}

fn cors_summary(origins: &CorsOrigins) -> String {
    match origins {
        CorsOrigins::Any => "*".to_owned(),
        CorsOrigins::List(list) => list.join(","),
    }
}
