//! Configuration management module for the watcher registry.
//!
//! Provides hierarchical configuration loading from multiple sources with priority:
//! 1. Default values (hardcoded)
//! 2. Optional config file
//! 3. Environment variables (highest priority)
//!

mod dispatch;
mod registry;
pub use dispatch::*;
pub use registry::*;

//---
use crate::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Watcher registry behavior
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Event dispatch processor parameters
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

impl Settings {
    /// Load configuration from multiple sources with priority:
    /// 1. Hardcoded defaults
    /// 2. Optional config file (name without extension, TOML)
    /// 3. Environment variables
    ///
    /// # Arguments
    /// * `config_path` - Optional path to a configuration file
    ///
    /// # Returns
    /// Merged configuration with proper priority ordering
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path));
        }

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix("PATHWATCH")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validates all subsystem configurations
    pub fn validate(&self) -> Result<()> {
        self.registry.validate()?;
        self.dispatch.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod config_test;
