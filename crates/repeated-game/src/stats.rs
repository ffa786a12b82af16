//! Statistics snapshots and the sinks that present them

use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::counters::{EpisodeCounters, LifetimeCounters};
use crate::history::RoundRecord;
use crate::payoff::Reward;

/// The most recent round, as shown to a renderer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LastRound {
    pub actions: RoundRecord,
    /// Action names, in agent order
    pub labels: (String, String),
    pub rewards: (Reward, Reward),
}

/// Read-only view of every counter after a step
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub episode: u32,
    pub max_rounds_per_episode: usize,
    /// `None` until the first step of the episode
    pub last_round: Option<LastRound>,
    pub episode_counters: EpisodeCounters,
    pub lifetime_counters: LifetimeCounters,
}

impl StatisticsSnapshot {
    pub fn current_round(&self) -> usize {
        self.episode_counters.current_round
    }
}

/// Errors raised by a sink; sessions log them and carry on
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("sink is closed")]
    Closed,
}

/// Presentation collaborator for session statistics
pub trait StatisticsSink {
    fn render(&mut self, snapshot: &StatisticsSnapshot) -> Result<(), SinkError>;

    /// Release whatever the sink holds
    fn close(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: StatisticsSink + ?Sized> StatisticsSink for Box<S> {
    fn render(&mut self, snapshot: &StatisticsSnapshot) -> Result<(), SinkError> {
        (**self).render(snapshot)
    }

    fn close(&mut self) -> Result<(), SinkError> {
        (**self).close()
    }
}

/// Discards every snapshot
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl StatisticsSink for NullSink {
    fn render(&mut self, _snapshot: &StatisticsSnapshot) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Emits each snapshot as a structured `tracing` event
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl StatisticsSink for TracingSink {
    fn render(&mut self, snapshot: &StatisticsSnapshot) -> Result<(), SinkError> {
        let episode = &snapshot.episode_counters;
        let lifetime = &snapshot.lifetime_counters;
        let (action_1, action_2) = snapshot
            .last_round
            .as_ref()
            .map(|r| (r.labels.0.as_str(), r.labels.1.as_str()))
            .unwrap_or(("-", "-"));
        let rewards = snapshot.last_round.as_ref().map(|r| r.rewards).unwrap_or_default();

        tracing::info!(
            episode = snapshot.episode,
            round = episode.current_round,
            action_1,
            action_2,
            reward_1 = rewards.0,
            reward_2 = rewards.1,
            cumulative_1 = episode.cumulative_reward.0,
            cumulative_2 = episode.cumulative_reward.1,
            average_1 = episode.average_reward.0,
            average_2 = episode.average_reward.1,
            total_rounds = lifetime.total_rounds,
            total_1 = lifetime.cumulative_reward.0,
            total_2 = lifetime.cumulative_reward.1,
            total_average_1 = lifetime.average_reward.0,
            total_average_2 = lifetime.average_reward.1,
            "round statistics"
        );
        Ok(())
    }
}

/// Human-readable text block per snapshot
#[derive(Debug)]
pub struct TextSink<W: Write> {
    out: Option<W>,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out: Some(out) }
    }

    /// Take back the writer; `None` once closed
    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}

impl<W: Write> StatisticsSink for TextSink<W> {
    fn render(&mut self, snapshot: &StatisticsSnapshot) -> Result<(), SinkError> {
        let out = self.out.as_mut().ok_or(SinkError::Closed)?;
        let episode = &snapshot.episode_counters;
        let lifetime = &snapshot.lifetime_counters;

        writeln!(
            out,
            "Episode {} | Round {}/{}",
            snapshot.episode, episode.current_round, snapshot.max_rounds_per_episode
        )?;
        if let Some(last) = &snapshot.last_round {
            writeln!(out, "  Agent 1 played {} -> {}", last.labels.0, last.rewards.0)?;
            writeln!(out, "  Agent 2 played {} -> {}", last.labels.1, last.rewards.1)?;
        }
        writeln!(
            out,
            "  Episode cumulative: {} / {} (avg {:.2} / {:.2})",
            episode.cumulative_reward.0,
            episode.cumulative_reward.1,
            episode.average_reward.0,
            episode.average_reward.1
        )?;
        writeln!(
            out,
            "  Lifetime cumulative: {} / {} (avg {:.2} / {:.2}) over {} rounds",
            lifetime.cumulative_reward.0,
            lifetime.cumulative_reward.1,
            lifetime.average_reward.0,
            lifetime.average_reward.1,
            lifetime.total_rounds
        )?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        if let Some(mut out) = self.out.take() {
            out.flush()?;
        }
        Ok(())
    }
}

/// One JSON object per snapshot, newline separated
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StatisticsSink for JsonLinesSink<W> {
    fn render(&mut self, snapshot: &StatisticsSnapshot) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.out, snapshot)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.out.flush()?;
        Ok(())
    }
}
