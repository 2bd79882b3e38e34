use conatus_core::{ActorConfig, CandidateSignals, Observation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{check_len, GoalError};
use crate::votes::{ExpectedValueVotes, VotePolicy};

/// Outcome of one `choose`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalChoice {
    /// One-hot over all goal slots.
    pub goal_vector: Vec<f32>,
    pub index: usize,
}

/// Read-only copy of the selector state for observers and visualizers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSnapshot {
    /// Number of completed `choose` calls.
    pub step: u64,
    pub activation: Vec<f32>,
    pub goal_vector: Option<Vec<f32>>,
    pub goal_index: Option<usize>,
}

/// Owns the goal memory and picks one goal per step.
///
/// `activation[i]` in [0.0, 1.0] is how strongly slot `i` is an outstanding,
/// unsatisfied goal. It is only written by `fulfill`, `reset`, `choose` and
/// `step`, and every one of them validates its inputs before writing.
pub struct GoalSelector {
    n_features: usize,
    activation: Vec<f32>,
    decay_rate: f32,
    policy: Box<dyn VotePolicy>,
    last_choice: Option<GoalChoice>,
    steps: u64,
}

impl GoalSelector {
    pub fn new(n_features: usize) -> Self {
        Self::with_config(n_features, &ActorConfig::default())
    }

    pub fn with_config(n_features: usize, config: &ActorConfig) -> Self {
        let size = slot_count(n_features, config.extra_slots);
        Self {
            n_features,
            activation: vec![0.0; size],
            decay_rate: sanitize_decay_rate(config.decay_rate),
            policy: Box::new(ExpectedValueVotes),
            last_choice: None,
            steps: 0,
        }
    }

    /// Replace the vote combination strategy.
    pub fn with_policy(mut self, policy: Box<dyn VotePolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Total number of goal slots (features plus reserved slots).
    pub fn size(&self) -> usize {
        self.activation.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn decay_rate(&self) -> f32 {
        self.decay_rate
    }

    pub fn activation(&self) -> &[f32] {
        &self.activation
    }

    pub fn last_choice(&self) -> Option<&GoalChoice> {
        self.last_choice.as_ref()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn snapshot(&self) -> GoalSnapshot {
        GoalSnapshot {
            step: self.steps,
            activation: self.activation.clone(),
            goal_vector: self.last_choice.as_ref().map(|c| c.goal_vector.clone()),
            goal_index: self.last_choice.as_ref().map(|c| c.index),
        }
    }

    /// Discharge goals in proportion to how active their feature now is.
    ///
    /// `activation[i] <- activation[i] * (1 - feature_activities[i])`, kept in
    /// [0.0, 1.0]. Full activity clears the goal, zero activity leaves it.
    pub fn fulfill(&mut self, feature_activities: &[f32]) -> Result<(), GoalError> {
        check_len("feature_activities", self.size(), feature_activities.len())?;
        for (goal, activity) in self.activation.iter_mut().zip(feature_activities) {
            // max() before min() so a NaN product collapses to 0
            *goal = (*goal * (1.0 - activity)).max(0.0).min(1.0);
        }
        tracing::trace!("GoalSelector: fulfilled, activation={:?}", self.activation);
        Ok(())
    }

    /// Clear the listed slots. The whole batch is checked first, so an out of
    /// range index leaves every slot untouched.
    pub fn reset(&mut self, resets: &[usize]) -> Result<(), GoalError> {
        self.check_resets(resets)?;
        for &index in resets {
            self.activation[index] = 0.0;
        }
        if !resets.is_empty() {
            tracing::trace!("GoalSelector: reset slots {:?}", resets);
        }
        Ok(())
    }

    /// Decay the goal memory, vote, break ties uniformly with `rng` and commit
    /// the winner as a fully outstanding goal.
    pub fn choose<R: Rng + ?Sized>(
        &mut self,
        curiosities: &[f32],
        predictions: &[Vec<f32>],
        rewards: &[f32],
        rng: &mut R,
    ) -> Result<GoalChoice, GoalError> {
        self.check_candidates(curiosities, predictions, rewards)?;
        if self.activation.is_empty() {
            return Err(GoalError::NoCandidates);
        }

        // Work on a copy until the votes are known to be usable.
        let retained = 1.0 - self.decay_rate;
        let decayed: Vec<f32> = self.activation.iter().map(|a| a * retained).collect();

        let votes = self.policy.combine(curiosities, predictions, rewards, &decayed);
        check_len("votes", self.size(), votes.len())?;
        if let Some(index) = votes.iter().position(|v| v.is_nan()) {
            return Err(GoalError::InvalidVote { index });
        }

        let max_vote = votes.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let candidates: Vec<usize> = votes
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == max_vote)
            .map(|(i, _)| i)
            .collect();
        let index = candidates[rng.gen_range(0..candidates.len())];

        self.activation = decayed;
        self.activation[index] = 1.0;

        let mut goal_vector = vec![0.0; self.size()];
        goal_vector[index] = 1.0;
        let choice = GoalChoice { goal_vector, index };

        self.steps += 1;
        self.last_choice = Some(choice.clone());

        tracing::debug!(
            "GoalSelector: step {} chose goal {} (vote={:.3}, ties={}, policy={})",
            self.steps,
            index,
            max_vote,
            candidates.len(),
            self.policy.name(),
        );

        Ok(choice)
    }

    /// One full control-loop step: fulfill, reset, then choose.
    ///
    /// All inputs are validated up front; if the vote policy misbehaves the
    /// memory is rolled back, so an error never leaves a half-applied step.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        observation: &Observation,
        signals: &CandidateSignals,
        rng: &mut R,
    ) -> Result<GoalChoice, GoalError> {
        check_len(
            "feature_activities",
            self.size(),
            observation.feature_activities.len(),
        )?;
        self.check_resets(&observation.resets)?;
        self.check_candidates(&signals.curiosities, &signals.predictions, &signals.rewards)?;

        let saved = self.activation.clone();
        let result = self.fulfill(&observation.feature_activities).and_then(|_| {
            self.reset(&observation.resets)?;
            self.choose(&signals.curiosities, &signals.predictions, &signals.rewards, rng)
        });
        if result.is_err() {
            self.activation = saved;
        }
        result
    }

    fn check_resets(&self, resets: &[usize]) -> Result<(), GoalError> {
        let size = self.size();
        match resets.iter().find(|&&index| index >= size) {
            Some(&index) => Err(GoalError::IndexOutOfRange { index, size }),
            None => Ok(()),
        }
    }

    fn check_candidates(
        &self,
        curiosities: &[f32],
        predictions: &[Vec<f32>],
        rewards: &[f32],
    ) -> Result<(), GoalError> {
        let size = self.size();
        check_len("curiosities", size, curiosities.len())?;
        check_len("rewards", size, rewards.len())?;
        check_len("predictions", size, predictions.len())?;
        for row in predictions {
            check_len("predictions row", size, row.len())?;
        }
        Ok(())
    }
}

impl Default for GoalSelector {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Debug for GoalSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoalSelector")
            .field("n_features", &self.n_features)
            .field("decay_rate", &self.decay_rate)
            .field("policy", &self.policy.name())
            .field("steps", &self.steps)
            .field("activation", &self.activation)
            .finish()
    }
}

fn slot_count(n_features: usize, extra_slots: usize) -> usize {
    match n_features.checked_add(extra_slots) {
        Some(size) => size,
        None => {
            tracing::warn!(
                "extra_slots {} overflows with {} features, reserving none",
                extra_slots,
                n_features
            );
            n_features
        }
    }
}

fn sanitize_decay_rate(rate: f32) -> f32 {
    if !rate.is_finite() {
        let fallback = ActorConfig::default().decay_rate;
        tracing::warn!("decay_rate {} is not finite, using {}", rate, fallback);
        fallback
    } else if !(0.0..=1.0).contains(&rate) {
        let clamped = rate.clamp(0.0, 1.0);
        tracing::warn!("decay_rate {} outside [0, 1], clamped to {}", rate, clamped);
        clamped
    } else {
        rate
    }
}
