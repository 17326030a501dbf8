//! Seeded ensemble runs over the ratio simulation.
//!
//! Runs many simulations off a single seeded stream and summarizes how often
//! the critical-ratio alert fires and where the final ratio lands.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::{Result, TokensimError};
use crate::simulation::ratio::{simulate, SimulationConfig};

/// Configuration for an ensemble of simulation runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleConfig {
    /// Number of simulation runs.
    pub n_runs: usize,
    /// Seed for the shared generator stream.
    pub seed: u64,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            n_runs: 1000,
            seed: 42,
        }
    }
}

/// Summary of an ensemble of simulation runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleResult {
    /// Final drains/sources ratio of every run, sorted ascending.
    pub final_ratios: Vec<f64>,
    /// Fraction of runs in which the alert fired.
    pub alert_probability: f64,
    /// Mean final ratio across runs.
    pub mean_final_ratio: f64,
    /// (percentile, final ratio) pairs at 5/25/50/75/95.
    pub ratio_percentiles: Vec<(f64, f64)>,
    /// Mean 1-based alert period over alerting runs, if any run alerted.
    pub mean_alert_period: Option<f64>,
}

/// Run `ensemble.n_runs` simulations sequentially off one seeded stream.
pub fn run_ensemble(config: &SimulationConfig, ensemble: &EnsembleConfig) -> Result<EnsembleResult> {
    if ensemble.n_runs == 0 {
        return Err(TokensimError::invalid_config("n_runs must be at least 1"));
    }
    config.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(ensemble.seed);
    let mut final_ratios = Vec::with_capacity(ensemble.n_runs);
    let mut alert_count = 0usize;
    let mut alert_period_sum = 0usize;

    for _ in 0..ensemble.n_runs {
        let result = simulate(config, &mut rng)?;
        final_ratios.push(result.final_ratio);
        if let Some(period) = result.alert_period {
            alert_count += 1;
            alert_period_sum += period;
        }
    }

    final_ratios.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = final_ratios.len();
    let mean_final_ratio = final_ratios.iter().sum::<f64>() / n as f64;

    let percentiles = [5.0, 25.0, 50.0, 75.0, 95.0];
    let ratio_percentiles = percentiles
        .iter()
        .map(|&pct| {
            let idx = ((pct / 100.0) * (n as f64 - 1.0)).round() as usize;
            (pct, final_ratios[idx.min(n - 1)])
        })
        .collect();

    let alert_probability = alert_count as f64 / n as f64;
    let mean_alert_period = if alert_count > 0 {
        Some(alert_period_sum as f64 / alert_count as f64)
    } else {
        None
    };

    Ok(EnsembleResult {
        final_ratios,
        alert_probability,
        mean_final_ratio,
        ratio_percentiles,
        mean_alert_period,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensemble_shape() {
        let config = SimulationConfig::default();
        let ensemble = EnsembleConfig {
            n_runs: 50,
            seed: 9,
        };
        let result = run_ensemble(&config, &ensemble).unwrap();

        assert_eq!(result.final_ratios.len(), 50);
        assert_eq!(result.ratio_percentiles.len(), 5);
        assert!(result.alert_probability >= 0.0 && result.alert_probability <= 1.0);
        // Sorted ascending
        assert!(result
            .final_ratios
            .windows(2)
            .all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_ensemble_deterministic() {
        let config = SimulationConfig::default();
        let ensemble = EnsembleConfig {
            n_runs: 20,
            seed: 123,
        };
        let a = run_ensemble(&config, &ensemble).unwrap();
        let b = run_ensemble(&config, &ensemble).unwrap();
        assert_eq!(a.final_ratios, b.final_ratios);
        assert_eq!(a.alert_probability, b.alert_probability);
    }

    #[test]
    fn test_ensemble_rejects_zero_runs() {
        let config = SimulationConfig::default();
        let ensemble = EnsembleConfig { n_runs: 0, seed: 1 };
        assert!(run_ensemble(&config, &ensemble).is_err());
    }
}
