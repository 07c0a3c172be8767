use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const HOST_ENV_VAR: &str = "PORTRAIT_HOST";
pub const PORT_ENV_VAR: &str = "PORTRAIT_PORT";
pub const ASSETS_ENV_VAR: &str = "PORTRAIT_ASSETS_DIR";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub assets_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(host) = lookup(HOST_ENV_VAR) {
            config.host = host;
        }
        if let Some(port) = lookup(PORT_ENV_VAR) {
            config.port = port
                .parse()
                .with_context(|| format!("invalid {PORT_ENV_VAR} value: {port}"))?;
        }
        if let Some(dir) = lookup(ASSETS_ENV_VAR) {
            config.assets_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}
