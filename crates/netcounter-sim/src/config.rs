//! Simulator configuration loading and types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration for the simulated device
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Counter behaviour
    #[serde(default)]
    pub device: DeviceConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address and port to bind to
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            log_level: default_log_level(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Counter behaviour
///
/// The defaults mirror the firmware: an unsigned 32-bit counter starting at
/// zero that moves by one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Value at startup
    #[serde(default)]
    pub initial: i64,
    /// Amount added by `/add` and removed by `/sub`
    #[serde(default = "default_step")]
    pub step: i64,
    /// Lowest reachable value
    #[serde(default)]
    pub min: i64,
    /// Highest reachable value
    #[serde(default = "default_max")]
    pub max: i64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            initial: 0,
            step: default_step(),
            min: 0,
            max: default_max(),
        }
    }
}

fn default_step() -> i64 {
    1
}

fn default_max() -> i64 {
    i64::from(u32::MAX)
}

impl SimConfig {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &PathBuf) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SimConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from default paths or use defaults
    ///
    /// # Errors
    /// Returns error if a config file exists but cannot be loaded
    pub fn load_default() -> eyre::Result<Self> {
        // Check environment variable
        if let Ok(path) = std::env::var("NETCOUNTER_SIM_CONFIG") {
            return Self::load(&PathBuf::from(path));
        }

        // Try common paths
        let paths = [
            PathBuf::from("netcounter-sim.toml"),
            dirs::config_dir()
                .map(|p| p.join("netcounter/netcounter-sim.toml"))
                .unwrap_or_default(),
        ];

        for path in paths {
            if path.exists() {
                return Self::load(&path);
            }
        }

        tracing::warn!("no config file found, using defaults");
        Ok(SimConfig::default())
    }

    /// Check that the counter bounds make sense
    ///
    /// # Errors
    /// Returns error if `step` is not positive, `min > max`, or `initial`
    /// lies outside the bounds
    pub fn validate(&self) -> eyre::Result<()> {
        let device = &self.device;
        if device.step <= 0 {
            eyre::bail!("device.step must be positive, got {}", device.step);
        }
        if device.min > device.max {
            eyre::bail!("device.min ({}) exceeds device.max ({})", device.min, device.max);
        }
        if !(device.min..=device.max).contains(&device.initial) {
            eyre::bail!(
                "device.initial ({}) is outside {}..={}",
                device.initial,
                device.min,
                device.max
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_firmware() {
        let config = SimConfig::default();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.device.initial, 0);
        assert_eq!(config.device.step, 1);
        assert_eq!(config.device.min, 0);
        assert_eq!(config.device.max, 4_294_967_295);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial() {
        let config: SimConfig = toml::from_str(
            r#"
            [device]
            initial = -3
            min = -10
            step = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.device.initial, -3);
        assert_eq!(config.device.step, 2);
        assert_eq!(config.server.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_initial_out_of_bounds() {
        let mut config = SimConfig::default();
        config.device.initial = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_step() {
        for step in [0, -1] {
            let mut config = SimConfig::default();
            config.device.step = step;
            assert!(config.validate().is_err(), "step {step}");
        }
    }
}
