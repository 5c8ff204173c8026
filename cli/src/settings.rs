use mislabeled_core::GameConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::storage::StorageKey;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Shuffle box positions for new games.
    pub shuffle_positions: bool,
    /// Treat a rejected move as giving up the game.
    pub errors_forfeit: bool,
    /// How long notices stay on screen in interactive mode.
    pub notice_millis: u64,
}

impl Settings {
    pub(crate) fn game_config(&self) -> GameConfig {
        GameConfig {
            shuffle_positions: self.shuffle_positions,
        }
    }

    pub(crate) fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_millis)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shuffle_positions: false,
            errors_forfeit: false,
            notice_millis: 3000,
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "mislabeled:settings";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"errors_forfeit": true}"#).unwrap();

        assert!(settings.errors_forfeit);
        assert!(!settings.shuffle_positions);
        assert_eq!(settings.notice_duration(), Duration::from_secs(3));
    }
}
