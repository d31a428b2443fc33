//! Settings read from the environment (and `.env`, loaded in `main`).
//!
//! | Variable | Default |
//! |---|---|
//! | `CREWLINK_HOST` | `0.0.0.0` |
//! | `CREWLINK_PORT` | `3000` |
//! | `CREWLINK_DB_PATH` | `crewlink.db` |
//! | `CREWLINK_JWT_SECRET` | required |
//! | `CREWLINK_TOKEN_TTL_DAYS` | `30` |

use std::path::PathBuf;

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &["change-me-to-a-random-string", "dev-secret-change-me"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CREWLINK_JWT_SECRET is unset or still a placeholder")]
    WeakSecret,

    #[error("{var} is not valid: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub jwt_secret: String,
    pub token_ttl_days: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = var("CREWLINK_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            return Err(ConfigError::WeakSecret);
        }

        Ok(Self {
            host: var("CREWLINK_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parsed(&var, "CREWLINK_PORT", 3000)?,
            db_path: var("CREWLINK_DB_PATH").unwrap_or_else(|| "crewlink.db".into()).into(),
            jwt_secret,
            token_ttl_days: parsed(&var, "CREWLINK_TOKEN_TTL_DAYS", 30)?,
        })
    }
}

fn parsed<T: std::str::FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match var(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { var: name, value }),
    }
}
