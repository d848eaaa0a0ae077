//! Configuration for itinerary chaining.

use chrono::Duration;

/// Parameters controlling how legs are linked into itineraries.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Exclusive upper bound on the ground time between two legs (minutes).
    /// A longer stop means the flight number was reused, not continued.
    pub max_layover_mins: i64,
}

impl ChainConfig {
    pub fn new(max_layover_mins: i64) -> Self {
        Self { max_layover_mins }
    }

    /// Returns the layover ceiling as a Duration.
    pub fn max_layover(&self) -> Duration {
        Duration::minutes(self.max_layover_mins)
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            max_layover_mins: 180, // 3 hours
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChainConfig::default();
        assert_eq!(config.max_layover_mins, 180);
        assert_eq!(config.max_layover(), Duration::hours(3));
    }

    #[test]
    fn custom_config() {
        let config = ChainConfig::new(90);
        assert_eq!(config.max_layover(), Duration::minutes(90));
    }
}
