use anyhow::{Context, Result};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            max_connections: parse_max_connections(std::env::var("DATABASE_MAX_CONNECTIONS").ok())?,
        })
    }

    /// Database host part of the URL, without credentials
    pub fn database_host(&self) -> &str {
        self.database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    }
}

fn parse_max_connections(value: Option<String>) -> Result<u32> {
    match value {
        None => Ok(DEFAULT_MAX_CONNECTIONS),
        Some(raw) => {
            let parsed: u32 = raw
                .trim()
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?;
            anyhow::ensure!(parsed > 0, "DATABASE_MAX_CONNECTIONS must be at least 1");
            Ok(parsed)
        }
    }
}
