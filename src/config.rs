use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    /// Base URL of the hosted record-store API. When unset the service runs
    /// against the in-memory fallback store.
    pub records_base_url: Option<String>,
    pub records_api_key: Option<String>,
    pub api_rps: u32,
    pub uploads_dir: String,
    pub max_resume_bytes: usize,
    pub memory_store_latency_ms: u64,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            records_base_url: env::var("RECORDS_BASE_URL").ok(),
            records_api_key: env::var("RECORDS_API_KEY").ok(),
            api_rps: get_env_parse_or("API_RPS", 50)?,
            uploads_dir: env::var("UPLOADS_DIR").unwrap_or_else(|_| "./uploads".to_string()),
            max_resume_bytes: get_env_parse_or("MAX_RESUME_BYTES", 5 * 1024 * 1024)?,
            memory_store_latency_ms: get_env_parse_or("MEMORY_STORE_LATENCY_MS", 250)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
