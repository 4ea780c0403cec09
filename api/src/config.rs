use std::env;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Upper bound on pooled database connections
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parse_or("PORT", 8080)?,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10)?,
        })
    }
}

/// Read an optional variable, falling back to `default` when unset
fn parse_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}
