//! Round and episode state machine
//!
//! A [`RepeatedGameSession`] owns every counter of a repeated two-player
//! matrix game. The caller picks both agents' actions, calls
//! [`step`](RepeatedGameSession::step) once per round, and calls
//! [`reset`](RepeatedGameSession::reset) between episodes.
//!
//! ```text
//!   Fresh ──reset──▶ InEpisode ──step (round == max)──▶ EpisodeDone
//!                      │  ▲                                 │
//!                      └──┘ step (round < max)              │
//!                      ▲                                    │
//!                      └───────────────reset────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::action::{Action, ActionSet};
use crate::config::SessionConfig;
use crate::counters::{EpisodeCounters, LifetimeCounters};
use crate::error::GameError;
use crate::history::{HistoryBuffer, RoundRecord};
use crate::payoff::{PayoffSource, Reward};
use crate::stats::{LastRound, NullSink, StatisticsSink, StatisticsSnapshot};

/// Where a session is in its episode lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Constructed, never reset
    #[default]
    Fresh,
    /// Accepting steps
    InEpisode,
    /// The round limit was reached; reset to continue
    EpisodeDone,
}

/// Result of one round
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Each agent observes the other's action: `(action_2, action_1)`
    pub observation: (Action, Action),
    pub rewards: (Reward, Reward),
    pub terminated: bool,
    /// Reserved for early stopping; always false
    pub truncated: bool,
    pub info: Map<String, Value>,
}

/// Repeated two-player matrix game with episode and lifetime bookkeeping
///
/// Stepping requires `&mut self`, so one session is never driven from two
/// places at once. A step on a `Fresh` session is accepted and behaves as
/// the first round of episode 1.
pub struct RepeatedGameSession<P, S = NullSink> {
    actions: ActionSet,
    payoff: P,
    sink: S,
    config: SessionConfig,
    episode: u32,
    phase: Phase,
    terminated: bool,
    last_round: Option<(RoundRecord, (Reward, Reward))>,
    episode_counters: EpisodeCounters,
    lifetime_counters: LifetimeCounters,
    history: HistoryBuffer,
}

impl<P: PayoffSource> RepeatedGameSession<P> {
    /// Build a session with no rendering sink attached
    pub fn new(actions: ActionSet, payoff: P, config: SessionConfig) -> Result<Self, GameError> {
        Self::with_sink(actions, payoff, config, NullSink)
    }
}

impl<P: PayoffSource, S: StatisticsSink> RepeatedGameSession<P, S> {
    /// Build a session that renders into `sink`
    pub fn with_sink(
        actions: ActionSet,
        payoff: P,
        config: SessionConfig,
        sink: S,
    ) -> Result<Self, GameError> {
        config.validate()?;
        if actions.is_empty() {
            return Err(GameError::EmptyActionSet);
        }
        if let Some(size) = payoff.num_actions() {
            if size != actions.len() {
                return Err(GameError::PayoffDimensionMismatch {
                    actions: actions.len(),
                    payoff: size,
                });
            }
        }

        tracing::debug!(
            actions = actions.len(),
            max_rounds = config.max_rounds_per_episode,
            render = config.render,
            "created repeated game session"
        );

        Ok(Self {
            history: HistoryBuffer::new(config.max_rounds_per_episode),
            actions,
            payoff,
            sink,
            config,
            episode: 1,
            phase: Phase::Fresh,
            terminated: false,
            last_round: None,
            episode_counters: EpisodeCounters::default(),
            lifetime_counters: LifetimeCounters::default(),
        })
    }

    /// Start a new episode and return the (empty) history as the initial observation
    ///
    /// Lifetime counters and the episode index are left alone. The last
    /// round is cleared too, so a snapshot taken right after a reset shows
    /// no round until the new episode's first step.
    pub fn reset(&mut self) -> Vec<RoundRecord> {
        self.episode_counters = EpisodeCounters::default();
        self.history.clear();
        self.last_round = None;
        self.terminated = false;
        self.phase = Phase::InEpisode;

        tracing::info!(
            episode = self.episode,
            total_rounds = self.lifetime_counters.total_rounds,
            "episode reset"
        );
        self.history.to_vec()
    }

    /// Play one round
    ///
    /// Both actions are checked against the action set before the payoff
    /// source is consulted; a rejected call changes nothing.
    pub fn step(&mut self, action_1: Action, action_2: Action) -> Result<StepOutcome, GameError> {
        let action_1 = self.actions.validate(action_1)?;
        let action_2 = self.actions.validate(action_2)?;

        if self.terminated {
            if !self.config.allow_steps_after_terminal {
                return Err(GameError::EpisodeFinished {
                    episode: self.episode,
                    max_rounds: self.config.max_rounds_per_episode,
                });
            }
            tracing::warn!(
                episode = self.episode,
                round = self.episode_counters.current_round + 1,
                "stepping past the end of the episode"
            );
        }

        let rewards = self.payoff.payoff(action_1, action_2);
        self.episode_counters.record(rewards);
        self.lifetime_counters.record(rewards);

        let round = self.episode_counters.current_round;
        let finished_now = !self.terminated && round >= self.config.max_rounds_per_episode;
        self.terminated = round >= self.config.max_rounds_per_episode;

        let record = RoundRecord::new(action_1, action_2);
        self.history.push(record);
        self.last_round = Some((record, rewards));
        self.phase = if self.terminated {
            Phase::EpisodeDone
        } else {
            Phase::InEpisode
        };

        tracing::debug!(
            episode = self.episode,
            round,
            action_1 = action_1.index(),
            action_2 = action_2.index(),
            reward_1 = rewards.0,
            reward_2 = rewards.1,
            "round played"
        );
        if finished_now {
            tracing::info!(
                episode = self.episode,
                rounds = round,
                cumulative_1 = self.episode_counters.cumulative_reward.0,
                cumulative_2 = self.episode_counters.cumulative_reward.1,
                "episode finished"
            );
        }

        Ok(StepOutcome {
            observation: (action_2, action_1),
            rewards,
            terminated: self.terminated,
            truncated: false,
            info: Map::new(),
        })
    }

    /// Move the displayed episode index forward and return the new value
    pub fn advance_episode(&mut self) -> u32 {
        self.episode = self.episode.saturating_add(1);
        tracing::info!(episode = self.episode, "advanced episode");
        self.episode
    }

    /// Current counters, for presentation
    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            episode: self.episode,
            max_rounds_per_episode: self.config.max_rounds_per_episode,
            last_round: self.last_round.map(|(actions, rewards)| LastRound {
                labels: (
                    self.actions.label(actions.action_1),
                    self.actions.label(actions.action_2),
                ),
                actions,
                rewards,
            }),
            episode_counters: self.episode_counters,
            lifetime_counters: self.lifetime_counters,
        }
    }

    /// Hand a snapshot to the sink, if rendering is enabled
    ///
    /// Sink failures are logged and never reach the counters.
    pub fn render(&mut self) {
        if !self.config.render {
            return;
        }
        let snapshot = self.snapshot();
        if let Err(error) = self.sink.render(&snapshot) {
            tracing::warn!(%error, episode = self.episode, "statistics sink failed to render");
        }
    }

    /// Release the sink's resources
    pub fn close(&mut self) {
        if let Err(error) = self.sink.close() {
            tracing::warn!(%error, "statistics sink failed to close");
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn episode_counters(&self) -> &EpisodeCounters {
        &self.episode_counters
    }

    pub fn lifetime_counters(&self) -> &LifetimeCounters {
        &self.lifetime_counters
    }

    /// Actions and rewards of the latest round in this episode
    pub fn last_round(&self) -> Option<(RoundRecord, (Reward, Reward))> {
        self.last_round
    }

    pub fn action_set(&self) -> &ActionSet {
        &self.actions
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
