//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SUGARBOOK_JWT_SECRET` - Token signing secret (min 32 chars, high entropy)
//! - `SUGARBOOK_DATABASE_URL` - `PostgreSQL` connection string, falls back to
//!   `DATABASE_URL` (only with the `postgres` store)
//!
//! ## Optional
//! - `SUGARBOOK_STORE` - `postgres` (default) or `memory`
//! - `SUGARBOOK_HOST` - Bind address (default: 127.0.0.1)
//! - `SUGARBOOK_PORT` - Listen port (default: 8001)
//! - `SUGARBOOK_UPLOADS_DIR` - Upload directory (default: uploads)
//! - `SUGARBOOK_MAX_UPLOAD_BYTES` - Upload body limit (default: 10 MiB)
//! - `CORS_ORIGINS` - Comma-separated allowed origins, or `*` (default)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_JWT_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Where documents are kept.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// `PostgreSQL` at the given URL (contains password).
    Postgres { database_url: SecretString },
    /// Process memory; everything is lost on exit.
    Memory,
}

/// Allowed cross-origin callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Any origin, without credentials.
    Any,
    /// Exactly these origins, with credentials.
    List(Vec<String>),
}

impl CorsOrigins {
    /// Parse a comma-separated origin list. `*` anywhere, or an empty list,
    /// means any origin.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let origins: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            Self::Any
        } else {
            Self::List(origins)
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Document store backend
    pub store: StoreBackend,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Token signing secret
    pub jwt_secret: SecretString,
    /// Directory uploaded images are written to and served from
    pub uploads_dir: PathBuf,
    /// Largest accepted upload body
    pub max_upload_bytes: usize,
    /// CORS policy
    pub cors_origins: CorsOrigins,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (length, placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    /// Load configuration through `env`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup(env: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store = match get_env_or_default(env, "SUGARBOOK_STORE", "postgres").as_str() {
            "postgres" => StoreBackend::Postgres {
                database_url: get_database_url(env, "SUGARBOOK_DATABASE_URL")?,
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "SUGARBOOK_STORE".to_string(),
                    format!("unknown store '{other}' (expected postgres or memory)"),
                ));
            }
        };

        let host = parse_env(env, "SUGARBOOK_HOST", "127.0.0.1")?;
        let port = parse_env(env, "SUGARBOOK_PORT", "8001")?;
        let jwt_secret = get_validated_secret(env, "SUGARBOOK_JWT_SECRET")?;
        let uploads_dir = PathBuf::from(get_env_or_default(env, "SUGARBOOK_UPLOADS_DIR", "uploads"));
        let max_upload_bytes = match env("SUGARBOOK_MAX_UPLOAD_BYTES") {
            Some(value) => value.parse::<usize>().map_err(|e| {
                ConfigError::InvalidEnvVar("SUGARBOOK_MAX_UPLOAD_BYTES".to_string(), e.to_string())
            })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };
        let cors_origins = CorsOrigins::parse(&get_env_or_default(env, "CORS_ORIGINS", "*"));

        Ok(Self {
            store,
            host,
            port,
            jwt_secret,
            uploads_dir,
            max_upload_bytes,
            cors_origins,
            sentry_dsn: env("SENTRY_DSN"),
            sentry_environment: env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Database URL for tools that only need the database (migrations).
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` if neither `SUGARBOOK_DATABASE_URL`
/// nor `DATABASE_URL` is set.
pub fn database_url_from_env() -> Result<SecretString, ConfigError> {
    let _ = dotenvy::dotenv();
    get_database_url(&|key: &str| std::env::var(key).ok(), "SUGARBOOK_DATABASE_URL")
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(env: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    env(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(
    env: &dyn Fn(&str) -> Option<String>,
    primary_key: &str,
) -> Result<SecretString, ConfigError> {
    env(primary_key)
        .or_else(|| env("DATABASE_URL"))
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(env: &dyn Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(
    env: &dyn Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(env, key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Validate that a secret meets minimum length requirements.
fn validate_secret_length(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_JWT_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(
    env: &dyn Fn(&str) -> Option<String>,
    key: &str,
) -> Result<SecretString, ConfigError> {
    let value = get_required_env(env, key)?;
    validate_secret_strength(&value, key)?;
    let secret = SecretString::from(value);
    validate_secret_length(&secret, key)?;
    Ok(secret)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const GOOD_SECRET: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6%";

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let err = validate_secret_strength("your-jwt-key-here", "TEST_VAR").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let err = validate_secret_strength(&"ab".repeat(20), "TEST_VAR").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_short_secret_rejected() {
        let env = lookup(&[("SUGARBOOK_STORE", "memory"), ("SUGARBOOK_JWT_SECRET", "aB3$xY9!mK2@")]);
        let err = ServerConfig::from_lookup(&env).unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_defaults_with_memory_store() {
        let env = lookup(&[("SUGARBOOK_STORE", "memory"), ("SUGARBOOK_JWT_SECRET", GOOD_SECRET)]);
        let config = ServerConfig::from_lookup(&env).unwrap();

        assert!(matches!(config.store, StoreBackend::Memory));
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8001");
        assert_eq!(config.uploads_dir, PathBuf::from("uploads"));
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.cors_origins, CorsOrigins::Any);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let env = lookup(&[("SUGARBOOK_JWT_SECRET", GOOD_SECRET)]);
        let err = ServerConfig::from_lookup(&env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "SUGARBOOK_DATABASE_URL"));
    }

    #[test]
    fn test_database_url_fallback() {
        let env = lookup(&[
            ("SUGARBOOK_JWT_SECRET", GOOD_SECRET),
            ("DATABASE_URL", "postgres://localhost/sugarbook"),
        ]);
        let config = ServerConfig::from_lookup(&env).unwrap();
        let StoreBackend::Postgres { database_url } = config.store else {
            panic!("expected postgres store");
        };
        assert_eq!(database_url.expose_secret(), "postgres://localhost/sugarbook");
    }

    #[test]
    fn test_invalid_values() {
        let env = lookup(&[
            ("SUGARBOOK_STORE", "mongo"),
            ("SUGARBOOK_JWT_SECRET", GOOD_SECRET),
        ]);
        assert!(matches!(
            ServerConfig::from_lookup(&env).unwrap_err(),
            ConfigError::InvalidEnvVar(_, _)
        ));

        let env = lookup(&[
            ("SUGARBOOK_STORE", "memory"),
            ("SUGARBOOK_PORT", "eighty"),
            ("SUGARBOOK_JWT_SECRET", GOOD_SECRET),
        ]);
        assert!(matches!(
            ServerConfig::from_lookup(&env).unwrap_err(),
            ConfigError::InvalidEnvVar(key, _) if key == "SUGARBOOK_PORT"
        ));
    }

    #[test]
    fn test_cors_origins_parse() {
        assert_eq!(CorsOrigins::parse("*"), CorsOrigins::Any);
        assert_eq!(CorsOrigins::parse(""), CorsOrigins::Any);
        assert_eq!(CorsOrigins::parse("https://a.test, *"), CorsOrigins::Any);
        assert_eq!(
            CorsOrigins::parse("https://a.test, https://b.test,"),
            CorsOrigins::List(vec!["https://a.test".to_owned(), "https://b.test".to_owned()])
        );
    }

    #[test]
    fn test_debug_redacts_jwt_secret() {
        let env = lookup(&[("SUGARBOOK_STORE", "memory"), ("SUGARBOOK_JWT_SECRET", GOOD_SECRET)]);
        let config = ServerConfig::from_lookup(&env).unwrap();
        assert!(!format!("{config:?}").contains(GOOD_SECRET));
    }
}
