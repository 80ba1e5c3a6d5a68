use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Where the resume document is mirrored between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// One JSON file per key under `STORAGE_DIR/<profile>/`.
    File,
    /// A Redis server at `REDIS_URL`, keys prefixed with the profile.
    Redis,
    /// Process memory only; nothing survives a restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "redis" => Ok(StorageBackend::Redis),
            "memory" => Ok(StorageBackend::Memory),
            other => bail!("STORAGE_BACKEND must be one of file, redis, memory (got '{other}')"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if a variable is malformed or a required one is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub storage_backend: StorageBackend,
    pub storage_dir: PathBuf,
    /// Only set when the backend is Redis.
    pub redis_url: Option<String>,
    pub profile: String,
    pub export_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let storage_backend: StorageBackend = env_or("STORAGE_BACKEND", "file").parse()?;
        let redis_url = match storage_backend {
            StorageBackend::Redis => Some(require_env("REDIS_URL")?),
            _ => None,
        };

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            storage_backend,
            storage_dir: PathBuf::from(env_or("STORAGE_DIR", "./data")),
            redis_url,
            profile: env_or("PROFILE", "default"),
            export_dir: PathBuf::from(env_or("EXPORT_DIR", "./exports")),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
