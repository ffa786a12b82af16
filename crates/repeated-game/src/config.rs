//! Session configuration

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Default episode length
pub const DEFAULT_MAX_ROUNDS: usize = 10;

/// Configuration for a repeated game session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Rounds per episode; `step` reports termination on reaching it
    pub max_rounds_per_episode: usize,
    /// Whether `render` forwards snapshots to the sink
    pub render: bool,
    /// Keep accepting steps once an episode has terminated
    ///
    /// When set, the round count runs past the limit, the history slides,
    /// and `terminated` stays true until the next reset.
    pub allow_steps_after_terminal: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl SessionConfig {
    /// Ten-round episodes, no rendering, strict episode boundaries
    pub fn standard() -> Self {
        Self {
            max_rounds_per_episode: DEFAULT_MAX_ROUNDS,
            render: false,
            allow_steps_after_terminal: false,
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds_per_episode = max_rounds;
        self
    }

    pub fn with_render(mut self, render: bool) -> Self {
        self.render = render;
        self
    }

    pub fn with_steps_after_terminal(mut self, allow: bool) -> Self {
        self.allow_steps_after_terminal = allow;
        self
    }

    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.max_rounds_per_episode == 0 {
            return Err(GameError::InvalidMaxRounds);
        }
        Ok(())
    }
}
