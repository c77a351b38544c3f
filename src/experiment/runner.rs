//! Trial execution and accumulation.
//!
//! Each trial is a pure function of the configuration and the RNG
//! stream; the runner owns accumulation across trials explicitly, so
//! repeated runs never share mutable state.

use color_eyre::Result;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::Config;
use crate::ip::AddressBlock;
use crate::matching::{stable_match, PreferenceTable};

use super::baseline::{count_aggregations, random_assignment};
use super::generator::generate_instance;

/// Outcome of a single trial
#[derive(Debug, Clone, Serialize)]
pub struct TrialOutcome {
    /// Aggregatable pairs under the stable matching
    pub stable_aggregations: usize,
    /// Aggregatable pairs under the random baseline
    pub random_aggregations: usize,
    /// Requesters that received a block
    pub matched: usize,
    /// Proposals the engine made
    pub proposals: usize,
}

/// Accumulated results across all trials
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentResults {
    pub trials: Vec<TrialOutcome>,
    pub stable_total: usize,
    pub random_total: usize,
    pub stable_mean: f64,
    pub random_mean: f64,
}

impl ExperimentResults {
    fn from_trials(trials: Vec<TrialOutcome>) -> Self {
        let stable_total: usize = trials.iter().map(|t| t.stable_aggregations).sum();
        let random_total: usize = trials.iter().map(|t| t.random_aggregations).sum();
        let count = trials.len().max(1) as f64;
        ExperimentResults {
            stable_mean: stable_total as f64 / count,
            random_mean: random_total as f64 / count,
            trials,
            stable_total,
            random_total,
        }
    }
}

/// Run one trial: generate an instance, rank both sides, match, and
/// score the stable and random assignments with the same predicate.
pub fn run_trial<R: Rng>(
    bases: &[AddressBlock],
    config: &Config,
    rng: &mut R,
) -> Result<TrialOutcome> {
    let (requesters, blocks) =
        generate_instance(bases, &config.experiment, &config.generation, rng)?;

    let prefs = PreferenceTable::build(&requesters, &blocks)?;
    let matching = stable_match(&prefs);
    let stable_aggregations = count_aggregations(&requesters, &blocks, matching.assignments());

    let random = random_assignment(requesters.len(), blocks.len(), rng);
    let random_aggregations = count_aggregations(&requesters, &blocks, &random);

    Ok(TrialOutcome {
        stable_aggregations,
        random_aggregations,
        matched: matching.matched_count(),
        proposals: matching.proposals(),
    })
}

/// Run the configured number of trials and accumulate their outcomes.
pub fn run_experiment(config: &Config) -> Result<ExperimentResults> {
    let bases = config.generation.base_blocks()?;
    let mut rng = match config.experiment.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(
        "Running {} trials with {} ASes and {} blocks each",
        config.experiment.trials, config.experiment.as_count, config.experiment.block_count
    );

    let mut trials = Vec::with_capacity(config.experiment.trials);
    for trial in 1..=config.experiment.trials {
        let outcome = run_trial(&bases, config, &mut rng)?;
        info!(
            "Trial {}: {} aggregatable pairs stable, {} random",
            trial, outcome.stable_aggregations, outcome.random_aggregations
        );
        trials.push(outcome);
    }

    Ok(ExperimentResults::from_trials(trials))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_trial_scores_both_strategies() {
        let config = Config::default();
        let bases = config.generation.base_blocks().unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = run_trial(&bases, &config, &mut rng).unwrap();
        assert_eq!(outcome.matched, 10);
        assert!(outcome.proposals >= 10);
        assert!(outcome.proposals <= 100);
        assert!(outcome.stable_aggregations <= 10);
        assert!(outcome.random_aggregations <= 10);
    }

    #[test]
    fn test_run_experiment_accumulates_all_trials() {
        let mut config = Config::default();
        config.experiment.trials = 4;
        config.experiment.seed = Some(9);

        let results = run_experiment(&config).unwrap();
        assert_eq!(results.trials.len(), 4);
        assert_eq!(
            results.stable_total,
            results
                .trials
                .iter()
                .map(|t| t.stable_aggregations)
                .sum::<usize>()
        );
        assert!((results.stable_mean - results.stable_total as f64 / 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_seeded_experiments_are_reproducible() {
        let mut config = Config::default();
        config.experiment.trials = 3;
        config.experiment.seed = Some(21);

        let a = run_experiment(&config).unwrap();
        let b = run_experiment(&config).unwrap();
        assert_eq!(a.stable_total, b.stable_total);
        assert_eq!(a.random_total, b.random_total);
    }
}
