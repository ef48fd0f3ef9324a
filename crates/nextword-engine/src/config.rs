use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default delay between the last trigger and the prediction request.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// How far [`EngineConfig::slower`] and [`EngineConfig::faster`] move the delay.
pub const DEBOUNCE_STEP_MS: u64 = 50;

/// Upper bound for interactive delay changes.
pub const MAX_DEBOUNCE_MS: u64 = 2000;

/// Engine settings. Every field has a default, so a partial TOML table
/// (`[engine]` with only `smart-space = false`) is valid.
///
/// ```rust,ignore
/// let config = EngineConfig::default()
///     .with_smart_space(false)
///     .with_debounce(Duration::from_millis(150));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineConfig {
    /// Request and show suggestions while typing.
    pub auto_suggest: bool,
    /// Append a space after an accepted word.
    pub smart_space: bool,
    /// Debounce delay in milliseconds.
    pub debounce_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auto_suggest: true,
            smart_space: true,
            debounce_delay_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl EngineConfig {
    /// Enable or disable auto-suggest.
    pub fn with_auto_suggest(mut self, enabled: bool) -> Self {
        self.auto_suggest = enabled;
        self
    }

    /// Enable or disable smart spacing.
    pub fn with_smart_space(mut self, enabled: bool) -> Self {
        self.smart_space = enabled;
        self
    }

    /// Set the debounce delay. Sub-millisecond precision is dropped.
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Lengthen the delay by one step, up to [`MAX_DEBOUNCE_MS`]. A delay
    /// already above the bound (from a config file) is left alone.
    pub fn slower(mut self) -> Self {
        if self.debounce_delay_ms < MAX_DEBOUNCE_MS {
            self.debounce_delay_ms = (self.debounce_delay_ms + DEBOUNCE_STEP_MS).min(MAX_DEBOUNCE_MS);
        }
        self
    }

    /// Shorten the delay by one step, down to zero.
    pub fn faster(mut self) -> Self {
        self.debounce_delay_ms = self.debounce_delay_ms.saturating_sub(DEBOUNCE_STEP_MS);
        self
    }

    /// The debounce delay as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_steps_are_clamped() {
        let config = EngineConfig::default();
        assert_eq!(config.clone().slower().debounce_delay_ms, 350);
        assert_eq!(config.clone().faster().debounce_delay_ms, 250);
        assert_eq!(config.clone().with_debounce(Duration::from_millis(20)).faster().debounce_delay_ms, 0);
        assert_eq!(
            config.clone().with_debounce(Duration::from_millis(1990)).slower().debounce_delay_ms,
            MAX_DEBOUNCE_MS
        );
        assert_eq!(
            config.with_debounce(Duration::from_millis(5000)).slower().debounce_delay_ms,
            5000
        );
    }

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert!(config.auto_suggest);
        assert!(config.smart_space);
        assert_eq!(config.debounce(), Duration::from_millis(300));
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"smart-space": false}"#).unwrap();
        assert_eq!(config, EngineConfig::default().with_smart_space(false));
    }

    #[test]
    fn builder_sets_debounce() {
        let config = EngineConfig::default().with_debounce(Duration::from_millis(120));
        assert_eq!(config.debounce_delay_ms, 120);
    }
}
