//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::motor::DriverConfig;

/// Maximum number of drivers in one configuration file.
pub const MAX_DRIVERS: usize = 8;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemConfig {
    /// Named driver configurations.
    pub drivers: FnvIndexMap<String<32>, DriverConfig, MAX_DRIVERS>,
}

impl SystemConfig {
    /// Get a driver configuration by name.
    pub fn driver(&self, name: &str) -> Option<&DriverConfig> {
        self.drivers
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all driver names.
    pub fn driver_names(&self) -> impl Iterator<Item = &str> {
        self.drivers.keys().map(|s| s.as_str())
    }
}
