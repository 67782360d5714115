use std::{env, time::Duration};

use hut_core::{DEFAULT_INITIAL_STATE_VAR, DEFAULT_MOUNT_POINT};

/// Demo configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Id of the element the site mounts into (default: "app")
    pub mount_point: String,
    /// Global holding the serialized state (default: "initialState")
    pub initial_state_var: String,
    /// Simulated data-source latency in milliseconds (default: 0)
    pub load_delay_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `HUT_MOUNT_POINT` - Mount element id (default: "app")
    /// - `HUT_STATE_VAR` - Initial state global name (default: "initialState")
    /// - `HUT_LOAD_DELAY_MS` - Simulated load latency (default: 0)
    pub fn from_env() -> Self {
        Self {
            mount_point: env::var("HUT_MOUNT_POINT")
                .unwrap_or_else(|_| DEFAULT_MOUNT_POINT.to_string()),
            initial_state_var: env::var("HUT_STATE_VAR")
                .unwrap_or_else(|_| DEFAULT_INITIAL_STATE_VAR.to_string()),
            load_delay_ms: env::var("HUT_LOAD_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }

    /// Get the simulated load latency as a Duration.
    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }
}
