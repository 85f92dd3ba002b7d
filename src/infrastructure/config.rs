// src/infrastructure/config.rs
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 8000;

/// Runtime configuration. Resolution order per value: CLI flag, then
/// environment variable, then logged default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin consumed by the client commands.
    pub backend_url: String,
    /// Port the server binds to.
    pub port: u16,
    /// Directory holding the memo database and the uploads folder.
    pub data_dir: PathBuf,
}

impl Config {
    pub fn resolve(
        backend_url: Option<String>,
        port: Option<u16>,
        data_dir: Option<PathBuf>,
    ) -> Self {
        let port = port.unwrap_or_else(|| try_load("TIMENOTES_PORT", &DEFAULT_PORT.to_string()));
        let backend_url = backend_url.unwrap_or_else(|| {
            try_load("TIMENOTES_BACKEND_URL", &format!("http://127.0.0.1:{port}"))
        });
        let data_dir = data_dir
            .or_else(|| env::var("TIMENOTES_DATA_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(default_data_dir);
        Self {
            backend_url,
            port,
            data_dir,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("memos.db")
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("timenotes"))
        .unwrap_or_else(|| PathBuf::from(".timenotes"))
}
