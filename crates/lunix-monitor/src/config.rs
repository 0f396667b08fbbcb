//! Configuration management.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable naming an optional configuration file.
pub const CONFIG_ENV: &str = "LUNIX_MONITOR_CONFIG";

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of sensors to monitor (indices 0..sensors)
    #[serde(default = "default_sensors")]
    pub sensors: usize,

    /// Device node path prefix (e.g., "/dev/lunix" for "/dev/lunix0-batt")
    #[serde(default = "default_device_prefix")]
    pub device_prefix: String,

    /// Delay between ticks in milliseconds
    #[serde(default = "default_tick")]
    pub tick: u64,

    /// Read buffer capacity in bytes
    #[serde(default = "default_buffer")]
    pub buffer: usize,
}

// Default value functions
fn default_sensors() -> usize {
    lunix_hw::DEFAULT_SENSOR_COUNT
}

fn default_device_prefix() -> String {
    lunix_hw::DEFAULT_DEVICE_PREFIX.to_string()
}

fn default_tick() -> u64 {
    100
}

fn default_buffer() -> usize {
    lunix_hw::DEFAULT_BUFFER_CAPACITY
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        Self::parse(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file named by `LUNIX_MONITOR_CONFIG`, or returns defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(&path)
                .with_context(|| format!("Failed to load {}", Path::new(&path).display())),
            None => Ok(Self::default()),
        }
    }

    /// Rejects values the sampling engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.sensors == 0 {
            bail!("sensors must be at least 1");
        }
        if self.buffer < 2 {
            bail!("buffer must be at least 2 bytes, got {}", self.buffer);
        }
        Ok(())
    }

    /// Returns the delay between ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sensors: default_sensors(),
            device_prefix: default_device_prefix(),
            tick: default_tick(),
            buffer: default_buffer(),
        }
    }
}
