use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Upper bound on pooled PostgreSQL connections.
    pub database_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a `Config` from any key/value source. `from_env` passes the
    /// process environment; tests pass a fixed map.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            database_url: required(&lookup, "DATABASE_URL")?,
            server_host: optional(&lookup, "SERVER_HOST", "0.0.0.0"),
            server_port: optional(&lookup, "SERVER_PORT", "8080")
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            database_max_connections: optional(&lookup, "DATABASE_MAX_CONNECTIONS", "10")
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key).with_context(|| format!("missing required env var: {key}"))
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_owned())
}
