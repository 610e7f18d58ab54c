#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, CUBBY_DEFAULT_CAPACITY};
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use toml_config::TomlConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Settings the server actually runs with: file values first, then flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub listen: SocketAddr,
    pub default_capacity: usize,
    pub seed: Option<u64>,
    pub preset_cubbies: Vec<(String, usize)>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 50051)),
            default_capacity: CUBBY_DEFAULT_CAPACITY,
            seed: None,
            preset_cubbies: Vec::new(),
        }
    }
}

impl ServiceSettings {
    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            listen: config.listen_addr(),
            default_capacity: config.default_capacity(),
            seed: config.seed(),
            preset_cubbies: config.preset_cubbies(),
        })
    }

    pub fn with_overrides(
        mut self,
        listen: Option<SocketAddr>,
        default_capacity: Option<usize>,
        seed: Option<u64>,
    ) -> Self {
        if let Some(listen) = listen {
            self.listen = listen;
        }
        if let Some(capacity) = default_capacity {
            self.default_capacity = capacity;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }
}

impl ConfigProvider for ServiceSettings {
    fn listen_addr(&self) -> SocketAddr {
        self.listen
    }

    fn default_capacity(&self) -> usize {
        self.default_capacity
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn preset_cubbies(&self) -> Vec<(String, usize)> {
        self.preset_cubbies.clone()
    }
}

impl Validate for ServiceSettings {
    fn validate(&self) -> Result<()> {
        validate_positive_number("default_capacity", self.default_capacity, 1)
    }
}
