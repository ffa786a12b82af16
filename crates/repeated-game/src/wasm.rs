//! WASM bindings for browser demos and session replay

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::{replay, Action, ActionSet, PayoffMatrix, RepeatedGameSession, SessionConfig};

fn parse_game(actions_json: &str, payoff_json: &str) -> Result<(ActionSet, PayoffMatrix), JsError> {
    let actions: ActionSet = serde_json::from_str(actions_json)
        .map_err(|e| JsError::new(&format!("Invalid action set: {}", e)))?;
    let payoff: PayoffMatrix = serde_json::from_str(payoff_json)
        .map_err(|e| JsError::new(&format!("Invalid payoff matrix: {}", e)))?;
    Ok((actions, payoff))
}

fn parse_config(config_json: &str) -> Result<SessionConfig, JsError> {
    SessionConfig::from_json(config_json).map_err(|e| JsError::new(&e.to_string()))
}

/// A session driven from JavaScript
///
/// Construct with JSON for the action names (`["Cooperate","Defect"]`),
/// the payoff rows (`[[[3,3],[0,5]],[[5,0],[1,1]]]`) and the config.
#[wasm_bindgen]
pub struct WasmSession {
    inner: RepeatedGameSession<PayoffMatrix>,
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new(
        actions_json: &str,
        payoff_json: &str,
        config_json: &str,
    ) -> Result<WasmSession, JsError> {
        let (actions, payoff) = parse_game(actions_json, payoff_json)?;
        let config = parse_config(config_json)?;
        let inner = RepeatedGameSession::new(actions, payoff, config)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { inner })
    }

    /// Start a new episode; returns the empty history
    pub fn reset(&mut self) -> Result<JsValue, JsError> {
        let history = self.inner.reset();
        serde_wasm_bindgen::to_value(&history)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Play one round; returns the step outcome as a JS object
    pub fn step(&mut self, action_1: usize, action_2: usize) -> Result<JsValue, JsError> {
        let outcome = self
            .inner
            .step(Action(action_1), Action(action_2))
            .map_err(|e| JsError::new(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&outcome)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = advanceEpisode)]
    pub fn advance_episode(&mut self) -> u32 {
        self.inner.advance_episode()
    }

    /// Current statistics snapshot
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.inner.snapshot())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Round history of the current episode, oldest first
    pub fn history(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.inner.history().to_vec())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(getter)]
    pub fn terminated(&self) -> bool {
        self.inner.is_terminated()
    }

    #[wasm_bindgen(getter)]
    pub fn episode(&self) -> u32 {
        self.inner.episode()
    }
}

/// Replay a scripted session with full per-round snapshots
///
/// # Arguments
/// * `actions_json` - JSON array of action names
/// * `payoff_json` - JSON payoff rows
/// * `config_json` - JSON session config (missing fields take defaults)
/// * `rounds` - flat `[a1, a2, a1, a2, ...]` action indices
#[wasm_bindgen]
pub fn replay_session(
    actions_json: &str,
    payoff_json: &str,
    config_json: &str,
    rounds: &[u32],
) -> Result<JsValue, JsError> {
    if rounds.len() % 2 != 0 {
        return Err(JsError::new("Rounds must hold an even number of actions"));
    }
    let (actions, payoff) = parse_game(actions_json, payoff_json)?;
    let config = parse_config(config_json)?;
    let pairs: Vec<(Action, Action)> = rounds
        .chunks_exact(2)
        .map(|pair| (Action(pair[0] as usize), Action(pair[1] as usize)))
        .collect();

    let result = replay(actions, payoff, config, &pairs).map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Random action pairs for a demo run, reproducible from `seed`
#[wasm_bindgen]
pub fn sample_session_rounds(actions_json: &str, seed: u64, count: usize) -> Result<Vec<u32>, JsError> {
    let actions: ActionSet = serde_json::from_str(actions_json)
        .map_err(|e| JsError::new(&format!("Invalid action set: {}", e)))?;
    Ok(crate::sample_rounds(&actions, seed, count)
        .into_iter()
        .flat_map(|(a, b)| [a.index() as u32, b.index() as u32])
        .collect())
}
