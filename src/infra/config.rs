//! Centralized configuration (environment variables + defaults).

use crate::storage::page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use anyhow::Context;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_API_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Server settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// When `None` the server falls back to the in-memory repository.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub default_page_size: u32,
}

impl AppConfig {
    /// Loads `.env` (if present) and then reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());
        let max_connections =
            parse_or("DATABASE_MAX_CONNECTIONS", &lookup, DEFAULT_MAX_CONNECTIONS)?.max(1);
        let bind_addr: SocketAddr = match lookup("ANIME_API_ADDR") {
            Some(v) => v
                .parse()
                .with_context(|| format!("ANIME_API_ADDR must be host:port, got '{}'", v))?,
            None => DEFAULT_API_ADDR.parse()?,
        };
        let default_page_size = parse_or("ANIME_DEFAULT_PAGE_SIZE", &lookup, DEFAULT_PAGE_SIZE)?
            .clamp(1, MAX_PAGE_SIZE);

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            default_page_size,
        })
    }
}

/// Settings for `anime-client`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// A blank `ANIME_API_BASE_URL` falls back to the default. Anything else
    /// must be an `http(s)://` URL.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = match lookup("ANIME_API_BASE_URL") {
            Some(v) if !v.trim().is_empty() => v.trim().trim_end_matches('/').to_string(),
            _ => DEFAULT_BASE_URL.to_string(),
        };
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            anyhow::bail!(
                "ANIME_API_BASE_URL must start with http:// or https://, got '{}'",
                base_url
            );
        }
        Ok(Self { base_url })
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} must be a valid number ({}): '{}'", key, e, raw)),
        None => Ok(default),
    }
}
