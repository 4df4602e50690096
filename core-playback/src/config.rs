//! Player configuration.

use std::time::Duration;

/// Tunables for the player controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Delay before retrying a source scan that could not yet instantiate
    /// every decoder.
    pub scan_retry_delay: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            scan_retry_delay: Duration::from_millis(100),
        }
    }
}

impl PlayerConfig {
    /// Overrides the scan retry delay.
    pub fn with_scan_retry_delay(mut self, delay: Duration) -> Self {
        self.scan_retry_delay = delay;
        self
    }

    /// Checks the configuration for nonsensical values.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.scan_retry_delay.is_zero() {
            return Err("scan_retry_delay must be non-zero".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = PlayerConfig::default();
        assert_eq!(config.scan_retry_delay, Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_retry_delay_is_rejected() {
        let config = PlayerConfig::default().with_scan_retry_delay(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
