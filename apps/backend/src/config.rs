//! Server configuration loaded from the environment.

use anyhow::{bail, Context};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_JWT_EXPIRY_DAYS: i64 = 7;

/// Runtime configuration.
///
/// | Env Var                    | Required | Default   |
/// |----------------------------|----------|-----------|
/// | `DATABASE_URL`             | yes      |           |
/// | `JWT_SECRET`               | yes      |           |
/// | `JWT_EXPIRY_DAYS`          | no       | `7`       |
/// | `HOST`                     | no       | `0.0.0.0` |
/// | `PORT`                     | no       | `3000`    |
/// | `DATABASE_MAX_CONNECTIONS` | no       | `10`      |
/// | `DAILY_RESET_HOUR`         | no       | `0`       |
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiry_days: i64,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    /// Hour (0-23) at which a new study day begins.
    pub daily_reset_hour: u32,
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let jwt_expiry_days = parse_or(&lookup, "JWT_EXPIRY_DAYS", DEFAULT_JWT_EXPIRY_DAYS)?;
        if jwt_expiry_days <= 0 {
            bail!("JWT_EXPIRY_DAYS must be positive");
        }

        let daily_reset_hour = parse_or(&lookup, "DAILY_RESET_HOUR", 0u32)?;
        if daily_reset_hour > 23 {
            bail!("DAILY_RESET_HOUR must be between 0 and 23");
        }

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiry_days,
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            daily_reset_hour,
        })
    }

    /// Socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}
