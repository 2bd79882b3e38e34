//! Per-step signal bundles exchanged between the actor and its collaborators.
//!
//! Perception reports which features just became active (and which slots were
//! structurally invalidated). The prediction model reports, for every
//! candidate goal, its curiosity, expected reward and expected resulting
//! feature activity. Both arrive as plain numeric arrays; how they are computed
//! is not the actor's concern.

use serde::{Deserialize, Serialize};

/// What perception observed since the previous step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// One value per goal slot, conventionally in [0.0, 1.0].
    pub feature_activities: Vec<f32>,
    /// Slots whose outstanding goal must be cleared.
    #[serde(default)]
    pub resets: Vec<usize>,
}

impl Observation {
    /// An observation with nothing active and nothing reset.
    pub fn quiet(size: usize) -> Self {
        Self {
            feature_activities: vec![0.0; size],
            resets: Vec::new(),
        }
    }
}

/// Conditional estimates for every candidate goal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateSignals {
    pub curiosities: Vec<f32>,
    /// Row `i` is the expected feature activity if slot `i` is chosen.
    pub predictions: Vec<Vec<f32>>,
    pub rewards: Vec<f32>,
}

impl CandidateSignals {
    /// All-zero signals: no curiosity, no reward and predictions that add no
    /// value to any candidate.
    pub fn neutral(size: usize) -> Self {
        Self {
            curiosities: vec![0.0; size],
            predictions: vec![vec![0.0; size]; size],
            rewards: vec![0.0; size],
        }
    }

    /// Number of candidates described, taken from the curiosity vector.
    pub fn len(&self) -> usize {
        self.curiosities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curiosities.is_empty()
    }
}

/// Upstream collaborators that feed the actor once per step.
pub trait SignalSource {
    fn observe(&mut self, step: u64) -> anyhow::Result<Observation>;
    fn candidates(&mut self, step: u64) -> anyhow::Result<CandidateSignals>;
    fn name(&self) -> &'static str;
}
