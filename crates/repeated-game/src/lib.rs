//! Repeated Matrix Game Sessions
//!
//! Round and episode bookkeeping for repeated two-player matrix games.
//! Each round both agents pick an action, a payoff source maps the pair
//! to a reward pair, and the session accumulates per-episode and lifetime
//! statistics.
//!
//! This crate is compiled to:
//! - Native (for training loops and test harnesses)
//! - WASM (for browser demos and replay, feature `wasm`)

mod action;
mod config;
mod counters;
mod error;
mod history;
mod payoff;
mod random;
mod replay;
mod session;
mod stats;

#[cfg(feature = "wasm")]
mod wasm;

pub use action::{Action, ActionSet};
pub use config::{SessionConfig, DEFAULT_MAX_ROUNDS};
pub use counters::{EpisodeCounters, LifetimeCounters};
pub use error::GameError;
pub use history::{HistoryBuffer, RoundRecord};
pub use payoff::{PayoffMatrix, PayoffSource, Reward};
pub use random::SeededRng;
pub use replay::{replay, sample_rounds, ReplayResult};
pub use session::{Phase, RepeatedGameSession, StepOutcome};
pub use stats::{
    JsonLinesSink, LastRound, NullSink, SinkError, StatisticsSink, StatisticsSnapshot, TextSink,
    TracingSink,
};
