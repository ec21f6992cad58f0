use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Freshness window (seconds) for geolocation, weather and air-quality data.
pub const SHORT_CACHE_SECS: u64 = 300;
/// Freshness window (seconds) for country profiles, which barely change.
pub const COUNTRY_CACHE_SECS: u64 = 86_400;

/// Top-level configuration stored on disk.
///
/// Every field has a working default, so a missing config file means
/// "talk to the real public APIs".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub upstreams: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
}

/// Base URLs of the third-party services plus the IP fallback constant.
///
/// Example TOML:
/// [upstreams]
/// geo_url = "http://ip-api.com"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub ip_echo_url: String,
    pub geo_url: String,
    pub weather_url: String,
    pub air_quality_url: String,
    pub country_url: String,
    /// Used when no usable client address is present in the request headers.
    pub fallback_ip: String,
    pub forecast_days: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upstreams: UpstreamConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: "0.0.0.0:3000".to_string() }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            ip_echo_url: "https://api.ipify.org".to_string(),
            geo_url: "http://ip-api.com".to_string(),
            weather_url: "https://api.open-meteo.com".to_string(),
            air_quality_url: "https://air-quality-api.open-meteo.com".to_string(),
            country_url: "https://restcountries.com".to_string(),
            fallback_ip: "8.8.8.8".to_string(),
            forecast_days: 7,
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "ip2data", "ip2data-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
