//! Error types for session operations.

use thiserror::Error;

use crate::action::Action;

/// Errors that can occur while building or driving a session.
#[derive(Debug, Error)]
pub enum GameError {
    /// An action index outside the shared action set.
    #[error("invalid action {action}: action set has {available} actions")]
    InvalidAction { action: Action, available: usize },

    /// The action set has no actions.
    #[error("action set must contain at least one action")]
    EmptyActionSet,

    /// `max_rounds_per_episode` was zero.
    #[error("max_rounds_per_episode must be at least 1")]
    InvalidMaxRounds,

    /// The payoff source describes a different number of actions than the action set.
    #[error("payoff source covers {payoff} actions but action set has {actions}")]
    PayoffDimensionMismatch { actions: usize, payoff: usize },

    /// A payoff table whose cell count is not N x N.
    #[error("payoff table needs {expected} cells, found {found}")]
    MalformedPayoffTable { expected: usize, found: usize },

    /// `step` was called after the episode terminated without a `reset`.
    #[error("episode {episode} already finished after {max_rounds} rounds; call reset first")]
    EpisodeFinished { episode: u32, max_rounds: usize },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
