//! Rules configuration.
//!
//! The standard game is 20 goats, and the tigers win after five captures.
//! Both numbers are configurable so that drivers can run shortened games
//! (for example a one-capture game in tests); everything else about the
//! board is fixed.

use serde::{Deserialize, Serialize};

use super::board::TIGER_COUNT;
use super::node::NODE_COUNT;
use crate::error::ConfigError;

/// Goats available to the goat side in a standard game.
pub const DEFAULT_GOAT_COUNT: u8 = 20;

/// Captures the tigers need to win a standard game.
pub const DEFAULT_CAPTURES_TO_WIN: u8 = 5;

/// Configurable rule parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Goats the goat side places during the placement phase.
    pub goat_count: u8,

    /// Captured goats at which the tigers win.
    pub captures_to_win: u8,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            goat_count: DEFAULT_GOAT_COUNT,
            captures_to_win: DEFAULT_CAPTURES_TO_WIN,
        }
    }
}

impl RulesConfig {
    /// Standard rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of goats to place.
    #[must_use]
    pub fn with_goat_count(mut self, count: u8) -> Self {
        self.goat_count = count;
        self
    }

    /// Set the number of captures that wins the game for the tigers.
    #[must_use]
    pub fn with_captures_to_win(mut self, captures: u8) -> Self {
        self.captures_to_win = captures;
        self
    }

    /// Check the parameters fit the board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let free_nodes = NODE_COUNT - TIGER_COUNT;
        if self.goat_count == 0 || usize::from(self.goat_count) > free_nodes {
            return Err(ConfigError::GoatCount {
                count: self.goat_count,
                max: free_nodes,
            });
        }
        if self.captures_to_win == 0 || self.captures_to_win > self.goat_count {
            return Err(ConfigError::CapturesToWin {
                captures: self.captures_to_win,
                goats: self.goat_count,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RulesConfig::default();
        assert_eq!(config.goat_count, 20);
        assert_eq!(config.captures_to_win, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = RulesConfig::new()
            .with_goat_count(10)
            .with_captures_to_win(2);

        assert_eq!(config.goat_count, 10);
        assert_eq!(config.captures_to_win, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_goat_count_bounds() {
        assert_eq!(
            RulesConfig::new().with_goat_count(0).validate(),
            Err(ConfigError::GoatCount { count: 0, max: 21 })
        );
        assert!(RulesConfig::new().with_goat_count(21).validate().is_ok());
        assert!(RulesConfig::new().with_goat_count(22).validate().is_err());
    }

    #[test]
    fn test_config_captures_bounds() {
        assert_eq!(
            RulesConfig::new().with_captures_to_win(0).validate(),
            Err(ConfigError::CapturesToWin { captures: 0, goats: 20 })
        );
        assert!(RulesConfig::new()
            .with_goat_count(3)
            .with_captures_to_win(4)
            .validate()
            .is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = RulesConfig::new().with_captures_to_win(3);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RulesConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
