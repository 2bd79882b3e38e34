//! conatus_bench — trajectory simulation tests for goal selection.
//!
//! Validates behavior that only shows up over many steps:
//! - Tie-break fairness (empirical frequencies approach 1/n)
//! - Suppression makes an unfulfilled agent alternate between its best goals,
//!   including when every candidate looks costly
//! - Perfect execution keeps the best goal selectable every step
//! - Goal memory stays bounded by the decay geometry over long runs

use conatus_actor::{GoalChoice, GoalError, GoalSelector};
use conatus_core::{CandidateSignals, Observation};
use rand::Rng;

/// Run `steps` control-loop iterations, asking `world` for the observation
/// and candidate signals that follow each previous choice.
pub fn simulate<R, F>(
    selector: &mut GoalSelector,
    steps: usize,
    rng: &mut R,
    mut world: F,
) -> Result<Vec<usize>, GoalError>
where
    R: Rng,
    F: FnMut(Option<&GoalChoice>, usize) -> (Observation, CandidateSignals),
{
    let mut chosen = Vec::with_capacity(steps);
    for _ in 0..steps {
        let (observation, signals) = world(selector.last_choice(), selector.size());
        chosen.push(selector.step(&observation, &signals, rng)?.index);
    }
    Ok(chosen)
}

/// Curiosity on the listed slots, nothing else.
pub fn curious_about(size: usize, slots: &[(usize, f32)]) -> CandidateSignals {
    let mut signals = CandidateSignals::neutral(size);
    for &(i, c) in slots {
        signals.curiosities[i] = c;
    }
    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// 4-way tie, 20k fresh trials: each tied slot wins ~25% of the time and
    /// nothing else ever wins.
    #[test]
    fn test_tie_break_fairness() {
        let tied = [1usize, 3, 4, 6];
        let signals = curious_about(8, &tied.map(|i| (i, 0.5)));
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 20_000;
        let mut counts = [0usize; 8];

        for _ in 0..trials {
            let mut selector = GoalSelector::new(6);
            let choice = selector
                .choose(&signals.curiosities, &signals.predictions, &signals.rewards, &mut rng)
                .unwrap();
            counts[choice.index] += 1;
        }

        for (i, &count) in counts.iter().enumerate() {
            let freq = count as f64 / trials as f64;
            if tied.contains(&i) {
                assert!(
                    (freq - 0.25).abs() < 0.02,
                    "slot {} won {:.3} of trials, expected ~0.25",
                    i,
                    freq
                );
            } else {
                assert_eq!(count, 0, "slot {} is not tied but won {} times", i, count);
            }
        }
    }

    /// Nothing ever gets fulfilled: the chosen goal is suppressed next step,
    /// so the agent alternates between its two most interesting features.
    #[test]
    fn test_unfulfilled_agent_alternates() {
        let mut selector = GoalSelector::new(4);
        let mut rng = StdRng::seed_from_u64(1);
        let chosen = simulate(&mut selector, 50, &mut rng, |_, size| {
            (Observation::quiet(size), curious_about(size, &[(0, 0.9), (1, 0.8)]))
        })
        .unwrap();

        assert_eq!(chosen[0], 0);
        assert!(chosen.iter().all(|&i| i < 2), "wandered off: {:?}", chosen);
        assert!(
            chosen.windows(2).all(|w| w[0] != w[1]),
            "expected strict alternation: {:?}",
            chosen
        );
    }

    /// Every candidate carries the same negative reward and nothing is ever
    /// fulfilled: the last goal is always the least attractive, so the agent
    /// tours every slot before revisiting any and never repeats back to back.
    #[test]
    fn test_costly_candidates_do_not_lock_on() {
        let mut selector = GoalSelector::new(4);
        let mut rng = StdRng::seed_from_u64(6);
        let chosen = simulate(&mut selector, 60, &mut rng, |_, size| {
            let mut signals = CandidateSignals::neutral(size);
            signals.rewards = vec![-0.5; size];
            (Observation::quiet(size), signals)
        })
        .unwrap();

        assert!(
            chosen.windows(2).all(|w| w[0] != w[1]),
            "repeated a goal back to back: {:?}",
            chosen
        );
        let mut first_tour = chosen[..6].to_vec();
        first_tour.sort_unstable();
        assert_eq!(first_tour, vec![0, 1, 2, 3, 4, 5], "{:?}", chosen);
    }

    /// The chosen feature always becomes fully active right away: every goal
    /// is discharged before the next choice, so the best one stays on top.
    #[test]
    fn test_perfect_execution_repeats_best_goal() {
        let mut selector = GoalSelector::new(4);
        let mut rng = StdRng::seed_from_u64(2);
        let chosen = simulate(&mut selector, 30, &mut rng, |last, size| {
            let observation = Observation {
                feature_activities: last
                    .map(|c| c.goal_vector.clone())
                    .unwrap_or_else(|| vec![0.0; size]),
                resets: Vec::new(),
            };
            (observation, curious_about(size, &[(0, 0.9), (1, 0.8)]))
        })
        .unwrap();

        assert!(chosen.iter().all(|&i| i == 0), "{:?}", chosen);
        assert!(selector.activation().iter().skip(1).all(|&a| a == 0.0));
    }

    /// An outstanding goal makes candidates predicted to reach it attractive.
    #[test]
    fn test_prediction_steers_toward_outstanding_goal() {
        let mut selector = GoalSelector::new(3);
        let mut rng = StdRng::seed_from_u64(3);

        // Step 1: slot 4 wins on curiosity and becomes a goal.
        let first = curious_about(5, &[(4, 1.0)]);
        let choice = selector
            .choose(&first.curiosities, &first.predictions, &first.rewards, &mut rng)
            .unwrap();
        assert_eq!(choice.index, 4);

        // Step 2: slot 2 is expected to activate slot 4; slot 1 is merely curious.
        let mut second = curious_about(5, &[(1, 0.3)]);
        second.predictions[2][4] = 0.9;
        let choice = selector
            .choose(&second.curiosities, &second.predictions, &second.rewards, &mut rng)
            .unwrap();
        // 0.9 * 0.8 = 0.72 > 0.3
        assert_eq!(choice.index, 2);
    }

    /// 10k noisy steps with resets: memory stays in [0, 1] and its total never
    /// exceeds the geometric bound 1 / decay_rate.
    #[test]
    fn test_long_run_memory_bounded() {
        let mut selector = GoalSelector::new(16);
        let mut rng = StdRng::seed_from_u64(4);
        let mut noise = StdRng::seed_from_u64(5);
        let bound = 1.0 / selector.decay_rate() + 1e-3;

        for step in 0..10_000u64 {
            let size = selector.size();
            let observation = Observation {
                feature_activities: (0..size).map(|_| noise.gen_range(0.0..0.3)).collect(),
                resets: if step % 97 == 0 {
                    vec![noise.gen_range(0..size)]
                } else {
                    Vec::new()
                },
            };
            let signals = CandidateSignals {
                curiosities: (0..size).map(|_| noise.gen_range(0.0..1.0)).collect(),
                predictions: (0..size)
                    .map(|_| (0..size).map(|_| noise.gen_range(0.0..1.0)).collect())
                    .collect(),
                rewards: (0..size).map(|_| noise.gen_range(-1.0..1.0)).collect(),
            };
            selector.step(&observation, &signals, &mut rng).unwrap();

            let activation = selector.activation();
            assert!(activation.iter().all(|&a| (0.0..=1.0).contains(&a)));
            let total: f32 = activation.iter().sum();
            assert!(total <= bound, "step {}: total {} > {}", step, total, bound);
        }
        assert_eq!(selector.steps(), 10_000);
    }
}
