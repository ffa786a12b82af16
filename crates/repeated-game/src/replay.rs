//! Scripted session driver
//!
//! Feeds a fixed sequence of action pairs through a fresh session and
//! collects a snapshot after every round. Used by the WASM replay view
//! and by harnesses that need reproducible runs.

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionSet};
use crate::config::SessionConfig;
use crate::counters::LifetimeCounters;
use crate::error::GameError;
use crate::payoff::PayoffSource;
use crate::random::SeededRng;
use crate::session::RepeatedGameSession;
use crate::stats::StatisticsSnapshot;

/// Result of a complete replay
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayResult {
    /// One snapshot per round, in order
    pub snapshots: Vec<StatisticsSnapshot>,
    /// Number of episodes touched (the last may be incomplete)
    pub episodes: u32,
    pub lifetime: LifetimeCounters,
}

/// Run `rounds` through a fresh session
///
/// Whenever an episode terminates and more rounds remain, the episode
/// index is advanced and the session reset before the next round.
pub fn replay<P: PayoffSource>(
    actions: ActionSet,
    payoff: P,
    config: SessionConfig,
    rounds: &[(Action, Action)],
) -> Result<ReplayResult, GameError> {
    let mut session = RepeatedGameSession::new(actions, payoff, config)?;
    session.reset();

    let mut snapshots = Vec::with_capacity(rounds.len());
    for &(action_1, action_2) in rounds {
        if session.is_terminated() {
            session.advance_episode();
            session.reset();
        }
        session.step(action_1, action_2)?;
        snapshots.push(session.snapshot());
    }

    Ok(ReplayResult {
        snapshots,
        episodes: session.episode(),
        lifetime: *session.lifetime_counters(),
    })
}

/// Draw `count` uniformly random action pairs
///
/// Each agent draws from its own stream, so changing one agent's draws
/// never shifts the other's.
pub fn sample_rounds(actions: &ActionSet, seed: u64, count: usize) -> Vec<(Action, Action)> {
    let base = SeededRng::new(seed);
    let mut rng_1 = base.fork(0);
    let mut rng_2 = base.fork(1);

    (0..count)
        .map(|_| (actions.sample(&mut rng_1), actions.sample(&mut rng_2)))
        .collect()
}
