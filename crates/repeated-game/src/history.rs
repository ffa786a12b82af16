//! Sliding window of completed rounds

use std::collections::{vec_deque, VecDeque};

use serde::{Deserialize, Serialize};

use crate::action::Action;

/// Actions played in one completed round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub action_1: Action,
    pub action_2: Action,
}

impl RoundRecord {
    pub fn new(action_1: Action, action_2: Action) -> Self {
        Self { action_1, action_2 }
    }

    /// The record as seen by the other agent
    pub fn swapped(self) -> Self {
        Self {
            action_1: self.action_2,
            action_2: self.action_1,
        }
    }
}

impl From<(Action, Action)> for RoundRecord {
    fn from((action_1, action_2): (Action, Action)) -> Self {
        Self::new(action_1, action_2)
    }
}

/// Bounded, chronologically ordered round history
///
/// Once full, each push evicts the oldest record.
#[derive(Clone, Debug)]
pub struct HistoryBuffer {
    records: VecDeque<RoundRecord>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Storage grows on demand, so `capacity` only bounds the window.
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            capacity,
        }
    }

    /// Append a record, returning the evicted one if the buffer was full
    pub fn push(&mut self, record: RoundRecord) -> Option<RoundRecord> {
        if self.capacity == 0 {
            return Some(record);
        }
        let evicted = if self.records.len() == self.capacity {
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        evicted
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<&RoundRecord> {
        self.records.back()
    }

    /// Oldest first
    pub fn iter(&self) -> vec_deque::Iter<'_, RoundRecord> {
        self.records.iter()
    }

    pub fn to_vec(&self) -> Vec<RoundRecord> {
        self.records.iter().copied().collect()
    }
}
