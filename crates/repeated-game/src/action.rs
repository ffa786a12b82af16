//! Actions and the action set shared by both agents

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::random::SeededRng;

/// Index of an action within an [`ActionSet`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(pub usize);

impl Action {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for Action {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered, named set of actions available to both agents
///
/// Action and observation spaces of both agents have the same size,
/// since each agent observes the other's action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ActionSet {
    names: Vec<String>,
}

impl ActionSet {
    /// Create an action set from its action names, in index order
    pub fn new<I, S>(names: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(GameError::EmptyActionSet);
        }
        Ok(Self { names })
    }

    /// Number of actions (N)
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false; an action set holds at least one action.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, action: Action) -> bool {
        action.0 < self.names.len()
    }

    /// Check that `action` belongs to this set
    pub fn validate(&self, action: Action) -> Result<Action, GameError> {
        if self.contains(action) {
            Ok(action)
        } else {
            Err(GameError::InvalidAction {
                action,
                available: self.len(),
            })
        }
    }

    /// Name of an action, if it is in range
    pub fn name(&self, action: Action) -> Option<&str> {
        self.names.get(action.0).map(String::as_str)
    }

    /// Look up an action by name
    pub fn position(&self, name: &str) -> Option<Action> {
        self.names.iter().position(|n| n == name).map(Action)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// All actions in index order
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        (0..self.names.len()).map(Action)
    }

    /// Draw a uniformly random action
    pub fn sample(&self, rng: &mut SeededRng) -> Action {
        Action(rng.next_range(self.names.len()))
    }

    /// Render an action as its name, falling back to the raw index
    pub fn label(&self, action: Action) -> String {
        self.name(action)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("#{}", action.0))
    }
}

impl TryFrom<Vec<String>> for ActionSet {
    type Error = GameError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<ActionSet> for Vec<String> {
    fn from(set: ActionSet) -> Self {
        set.names
    }
}
