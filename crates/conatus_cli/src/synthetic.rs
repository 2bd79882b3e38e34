//! Seeded stand-in for the perception and prediction collaborators.
//!
//! Produces plausible-looking signals (sparse activity, occasional resets,
//! noisy curiosity/reward, sparse predictions) so the selector can be run
//! without a world attached.

use conatus_core::{CandidateSignals, Observation, SignalSource};
use rand::rngs::StdRng;
use rand::Rng;

pub struct SyntheticSource {
    size: usize,
    rng: StdRng,
    /// Probability that a slot is observed active in a step.
    activity_rate: f64,
    /// Probability that a step carries one reset.
    reset_rate: f64,
}

impl SyntheticSource {
    pub fn new(size: usize, rng: StdRng) -> Self {
        Self {
            size,
            rng,
            activity_rate: 0.2,
            reset_rate: 0.02,
        }
    }
}

impl SignalSource for SyntheticSource {
    fn observe(&mut self, _step: u64) -> anyhow::Result<Observation> {
        let mut feature_activities = vec![0.0; self.size];
        for activity in feature_activities.iter_mut() {
            if self.rng.gen_bool(self.activity_rate) {
                *activity = self.rng.gen_range(0.5..=1.0);
            }
        }
        let mut resets = Vec::new();
        if self.size > 0 && self.rng.gen_bool(self.reset_rate) {
            resets.push(self.rng.gen_range(0..self.size));
        }
        Ok(Observation {
            feature_activities,
            resets,
        })
    }

    fn candidates(&mut self, _step: u64) -> anyhow::Result<CandidateSignals> {
        let n = self.size;
        let curiosities = (0..n).map(|_| self.rng.gen_range(0.0..1.0)).collect();
        let rewards = (0..n).map(|_| self.rng.gen_range(-0.5..1.0)).collect();
        let mut predictions = vec![vec![0.0; n]; n];
        for row in predictions.iter_mut() {
            for p in row.iter_mut() {
                if self.rng.gen_bool(0.1) {
                    *p = self.rng.gen_range(0.0..1.0);
                }
            }
        }
        Ok(CandidateSignals {
            curiosities,
            predictions,
            rewards,
        })
    }

    fn name(&self) -> &'static str {
        "synthetic"
    }
}
