//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MAX_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Redis is optional; without it rate limiting is disabled.
    pub redis_url: Option<String>,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    /// Run the idempotent bootstrap (default users + catalog) when serving.
    pub seed_on_startup: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &self.redis_url.as_ref().map(|_| "[REDACTED]"))
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("seed_on_startup", &self.seed_on_startup)
            .finish()
    }
}

impl Config {
    /// Build a configuration with defaults for everything but the database and secret.
    ///
    /// # Errors
    /// Returns a configuration error if the secret is shorter than the minimum length.
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> AppResult<Self> {
        let jwt_secret = jwt_secret.into();
        validate_jwt_secret(&jwt_secret)?;

        Ok(Self {
            database_url: database_url.into(),
            redis_url: None,
            jwt_secret,
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            seed_on_startup: true,
        })
    }

    /// Load configuration from environment variables (and `.env` when present).
    ///
    /// # Errors
    /// Fails if JWT_SECRET is missing in a release build or is too short.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            }
            Err(_) => {
                return Err(AppError::Config(
                    "JWT_SECRET environment variable must be set in production".to_string(),
                ))
            }
        };

        let mut config = Self::new(
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
        )?;

        config.redis_url = env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty());
        if let Ok(hours) = env::var("JWT_EXPIRATION_HOURS") {
            config.jwt_expiration_hours = parse_jwt_expiration_hours(&hours)?;
        }
        config.server_host =
            env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string());
        config.server_port = env::var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SERVER_PORT);
        config.seed_on_startup = env::var("SEED_ON_STARTUP")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        Ok(config)
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn validate_jwt_secret(secret: &str) -> AppResult<()> {
    if secret.len() < MIN_JWT_SECRET_LENGTH {
        return Err(AppError::Config(format!(
            "JWT_SECRET must be at least {} characters long",
            MIN_JWT_SECRET_LENGTH
        )));
    }
    Ok(())
}

fn parse_jwt_expiration_hours(raw: &str) -> AppResult<i64> {
    match raw.trim().parse::<i64>() {
        Ok(hours) if (1..=MAX_JWT_EXPIRATION_HOURS).contains(&hours) => Ok(hours),
        _ => Err(AppError::Config(format!(
            "JWT_EXPIRATION_HOURS must be a whole number between 1 and {}",
            MAX_JWT_EXPIRATION_HOURS
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        let result = Config::new("postgres://localhost/test", "too-short");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_defaults_applied() {
        let config =
            Config::new("postgres://localhost/test", "0123456789abcdef0123456789abcdef").unwrap();
        assert_eq!(config.server_addr(), "0.0.0.0:8081");
        assert_eq!(config.jwt_expiration_hours, 24);
        assert!(config.redis_url.is_none());
        assert!(config.seed_on_startup);
    }

    #[test]
    fn test_jwt_expiration_within_range_accepted() {
        assert_eq!(parse_jwt_expiration_hours("1").unwrap(), 1);
        assert_eq!(parse_jwt_expiration_hours(" 48 ").unwrap(), 48);
        assert_eq!(
            parse_jwt_expiration_hours(&MAX_JWT_EXPIRATION_HOURS.to_string()).unwrap(),
            MAX_JWT_EXPIRATION_HOURS
        );
    }

    #[test]
    fn test_jwt_expiration_out_of_range_rejected() {
        for raw in ["0", "-3", "8761", "9223372036854775807", "forever", ""] {
            assert!(
                matches!(parse_jwt_expiration_hours(raw), Err(AppError::Config(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config =
            Config::new("postgres://u:p@localhost/test", "0123456789abcdef0123456789abcdef")
                .unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("0123456789abcdef"));
        assert!(!rendered.contains("u:p@"));
    }
}
