//! Vote combination policies.
//!
//! A policy folds the three per-candidate signals and the current goal memory
//! into one score per slot. Whatever the arithmetic, a policy must:
//! - grow (or at least not shrink) with `curiosities[i]` and `rewards[i]`
//! - weaken slot `i` as `activation[i]` rises, so a goal already being
//!   pursued is not re-selected at full strength

/// Replaceable strategy that turns candidate signals into votes.
///
/// The selector has already checked every input has `activation.len()`
/// entries (and rows) before calling `combine`. The returned vector must have
/// the same length and contain no NaN.
pub trait VotePolicy: Send + Sync {
    fn combine(
        &self,
        curiosities: &[f32],
        predictions: &[Vec<f32>],
        rewards: &[f32],
        activation: &[f32],
    ) -> Vec<f32>;

    fn name(&self) -> &'static str;
}

/// Default policy.
///
/// `base[i] = curiosity[i] + reward[i] + Σ_{j≠i} prediction[i][j] * activation[j]`
///
/// `vote[i] = base[i] * (1 - activation[i])` when `base[i] >= 0`, else
/// `base[i] * (1 + activation[i])`
///
/// The sum credits a candidate for every other outstanding goal it is
/// expected to bring about. The trailing factor suppresses candidates that are
/// already outstanding goals themselves: a positive score shrinks toward zero,
/// a negative one grows more negative, so suppression never raises a vote.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectedValueVotes;

impl VotePolicy for ExpectedValueVotes {
    fn combine(
        &self,
        curiosities: &[f32],
        predictions: &[Vec<f32>],
        rewards: &[f32],
        activation: &[f32],
    ) -> Vec<f32> {
        curiosities
            .iter()
            .zip(rewards)
            .zip(predictions)
            .zip(activation)
            .enumerate()
            .map(|(i, (((&curiosity, &reward), row), &own))| {
                let goal_value: f32 = row
                    .iter()
                    .zip(activation)
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, (p, a))| p * a)
                    .sum();
                suppress(curiosity + reward + goal_value, own)
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "ExpectedValueVotes"
    }
}

/// Push `base` down as `own` rises, whatever its sign.
fn suppress(base: f32, own: f32) -> f32 {
    if base >= 0.0 {
        base * (1.0 - own)
    } else {
        base * (1.0 + own)
    }
}
