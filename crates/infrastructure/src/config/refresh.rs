//! Refresh schedule configuration

use serde::{Deserialize, Serialize};

/// When the watch loop refreshes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Six-field cron expression (sec min hour day month weekday)
    #[serde(default = "default_cron")]
    pub cron: String,

    /// Run one cycle immediately instead of waiting for the first tick
    #[serde(default = "super::default_true")]
    pub run_on_start: bool,
}

fn default_cron() -> String {
    "0 */2 * * * *".to_string()
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            cron: default_cron(),
            run_on_start: true,
        }
    }
}

impl RefreshConfig {
    /// Check that the cron expression parses
    ///
    /// # Errors
    ///
    /// Returns the parser's message for an invalid expression.
    pub fn validate(&self) -> Result<(), String> {
        self.cron
            .parse::<cron::Schedule>()
            .map(|_| ())
            .map_err(|e| format!("invalid refresh.cron '{}': {e}", self.cron))
    }
}
