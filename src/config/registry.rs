use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Selects how `remove` treats the watcher it targets.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RemovePolicy {
    /// Drop exactly the targeted watcher and settle it with a cancellation
    /// error, leaving every other watcher at the path untouched
    #[default]
    Cancel,

    /// Historical filter behavior: the targeted watcher is the one retained,
    /// everything else at the path is dropped unsettled
    Legacy,
}

/// Configuration parameters for the watcher registry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegistryConfig {
    /// Removal semantics, see [`RemovePolicy`]
    #[serde(default)]
    pub remove_policy: RemovePolicy,

    /// Per-path pending watcher count at which `track` starts logging warnings
    /// Watchers have no timeout, so an ever-growing list means the transport
    /// stopped delivering matching events
    /// Default value is set via default_pending_warn_threshold() function
    #[serde(default = "default_pending_warn_threshold")]
    pub pending_warn_threshold: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            remove_policy: RemovePolicy::default(),
            pending_warn_threshold: default_pending_warn_threshold(),
        }
    }
}

impl RegistryConfig {
    /// Validates registry configuration
    pub fn validate(&self) -> Result<()> {
        if self.pending_warn_threshold == 0 {
            return Err(Error::Config(ConfigError::Message(
                "pending_warn_threshold must be greater than 0".into(),
            )));
        }

        Ok(())
    }
}

fn default_pending_warn_threshold() -> usize {
    64
}
