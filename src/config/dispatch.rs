use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Configuration parameters for the event dispatch processor
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DispatchConfig {
    /// Capacity of the command channel between transport producers and the
    /// processor task
    /// Default value is set via default_command_buffer_capacity() function
    #[serde(default = "default_command_buffer_capacity")]
    pub command_buffer_capacity: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            command_buffer_capacity: default_command_buffer_capacity(),
        }
    }
}

impl DispatchConfig {
    /// Validates dispatch configuration
    pub fn validate(&self) -> Result<()> {
        if self.command_buffer_capacity == 0 {
            return Err(Error::Config(ConfigError::Message(
                "command_buffer_capacity must be greater than 0".into(),
            )));
        }

        Ok(())
    }
}

fn default_command_buffer_capacity() -> usize {
    100
}
