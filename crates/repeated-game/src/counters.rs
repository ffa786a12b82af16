//! Reward accumulators
//!
//! Episode counters are zeroed by every reset. Lifetime counters live as
//! long as the session and only ever accumulate.

use serde::{Deserialize, Serialize};

use crate::payoff::Reward;

/// Counters scoped to the current episode
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeCounters {
    pub current_round: usize,
    pub cumulative_reward: (Reward, Reward),
    pub average_reward: (Reward, Reward),
}

impl EpisodeCounters {
    /// Count one more round and fold its rewards into the totals
    pub fn record(&mut self, rewards: (Reward, Reward)) {
        self.current_round += 1;
        self.cumulative_reward.0 += rewards.0;
        self.cumulative_reward.1 += rewards.1;
        let rounds = self.current_round as Reward;
        self.average_reward = (
            self.cumulative_reward.0 / rounds,
            self.cumulative_reward.1 / rounds,
        );
    }
}

/// Counters spanning every episode since the session was built
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LifetimeCounters {
    pub total_rounds: u64,
    pub cumulative_reward: (Reward, Reward),
    pub average_reward: (Reward, Reward),
}

impl LifetimeCounters {
    pub fn record(&mut self, rewards: (Reward, Reward)) {
        self.total_rounds += 1;
        self.cumulative_reward.0 += rewards.0;
        self.cumulative_reward.1 += rewards.1;
        let rounds = self.total_rounds as Reward;
        self.average_reward = (
            self.cumulative_reward.0 / rounds,
            self.cumulative_reward.1 / rounds,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_average_tracks_round_count() {
        let mut c = EpisodeCounters::default();
        c.record((3.0, 0.0));
        c.record((1.0, 2.0));

        assert_eq!(c.current_round, 2);
        assert_eq!(c.cumulative_reward, (4.0, 2.0));
        assert_eq!(c.average_reward, (2.0, 1.0));
    }

    #[test]
    fn test_default_is_zeroed() {
        let c = EpisodeCounters::default();
        assert_eq!(c.current_round, 0);
        assert_eq!(c.cumulative_reward, (0.0, 0.0));
        assert_eq!(c.average_reward, (0.0, 0.0));
    }

    #[test]
    fn test_lifetime_negative_rewards() {
        let mut c = LifetimeCounters::default();
        c.record((1.0, -1.0));
        c.record((1.0, -3.0));

        assert_eq!(c.total_rounds, 2);
        assert_eq!(c.cumulative_reward, (2.0, -4.0));
        assert_eq!(c.average_reward, (1.0, -2.0));
    }
}
