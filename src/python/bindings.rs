//! PyO3 function bindings for tokensim.

use numpy::PyArray1;
use pyo3::prelude::*;

use crate::allocation::depletion::{
    run_depletion, AllocationPool, DepletionResult, DEFAULT_TOKEN_PRICE,
};
use crate::allocation::phase::{
    base_coefficient, bonus_coefficient, MarketCompetitiveness, PerformanceRating, Phase,
    ProjectImportance, RoleImpact, SeniorityLevel, SkillScarcity, TalentAvailability,
};
use crate::allocation::bands;
use crate::simulation::ensemble::{run_ensemble, EnsembleConfig, EnsembleResult};
use crate::simulation::ratio::{simulate_seeded, SimulationConfig, SimulationResult};

use super::numpy_bridge::vec_to_numpy_f64;

// ============================================================================
// Configuration Classes
// ============================================================================

/// Python-exposed ratio simulation configuration.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PySimulationConfig {
    #[pyo3(get, set)]
    pub periods: usize,
    #[pyo3(get, set)]
    pub critical_ratio: f64,
    #[pyo3(get, set)]
    pub opex: f64,
    #[pyo3(get, set)]
    pub burn_rate_pct: f64,
    #[pyo3(get, set)]
    pub adoption_lambda: f64,
    #[pyo3(get, set)]
    pub rewards_rate_pct: f64,
    #[pyo3(get, set)]
    pub vesting_alpha: f64,
    #[pyo3(get, set)]
    pub vesting_beta: f64,
    #[pyo3(get, set)]
    pub minting_per_period: f64,
}

#[pymethods]
impl PySimulationConfig {
    #[new]
    #[pyo3(signature = (
        periods=10, critical_ratio=1.5, opex=150.0, burn_rate_pct=0.05,
        adoption_lambda=15.0, rewards_rate_pct=0.03, vesting_alpha=4.0,
        vesting_beta=3.0, minting_per_period=60.0
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        periods: usize,
        critical_ratio: f64,
        opex: f64,
        burn_rate_pct: f64,
        adoption_lambda: f64,
        rewards_rate_pct: f64,
        vesting_alpha: f64,
        vesting_beta: f64,
        minting_per_period: f64,
    ) -> Self {
        Self {
            periods,
            critical_ratio,
            opex,
            burn_rate_pct,
            adoption_lambda,
            rewards_rate_pct,
            vesting_alpha,
            vesting_beta,
            minting_per_period,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SimulationConfig(periods={}, critical_ratio={})",
            self.periods, self.critical_ratio
        )
    }
}

impl From<&PySimulationConfig> for SimulationConfig {
    fn from(py_config: &PySimulationConfig) -> Self {
        SimulationConfig {
            periods: py_config.periods,
            critical_ratio: py_config.critical_ratio,
            opex: py_config.opex,
            burn_rate_pct: py_config.burn_rate_pct,
            adoption_lambda: py_config.adoption_lambda,
            rewards_rate_pct: py_config.rewards_rate_pct,
            vesting_alpha: py_config.vesting_alpha,
            vesting_beta: py_config.vesting_beta,
            minting_per_period: py_config.minting_per_period,
        }
    }
}

/// Python-exposed ensemble configuration.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PyEnsembleConfig {
    #[pyo3(get, set)]
    pub n_runs: usize,
    #[pyo3(get, set)]
    pub seed: u64,
}

#[pymethods]
impl PyEnsembleConfig {
    #[new]
    #[pyo3(signature = (n_runs=1000, seed=42))]
    fn new(n_runs: usize, seed: u64) -> Self {
        Self { n_runs, seed }
    }
}

impl From<&PyEnsembleConfig> for EnsembleConfig {
    fn from(py_config: &PyEnsembleConfig) -> Self {
        EnsembleConfig {
            n_runs: py_config.n_runs,
            seed: py_config.seed,
        }
    }
}

/// Python-exposed hiring phase.
///
/// Adjustment selections are passed as labels and resolved against the fixed
/// weight tables; unknown labels raise ValueError.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PyPhase {
    pub(crate) inner: Phase,
}

#[pymethods]
impl PyPhase {
    #[new]
    #[pyo3(signature = (
        name, employee_count, risk_coefficient=1.0, seniority="Mid",
        role_impact="Core", scarcity="Moderate", performance="Meets",
        importance="Standard", competitiveness="Average", availability="Balanced"
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        name: String,
        employee_count: u32,
        risk_coefficient: f64,
        seniority: &str,
        role_impact: &str,
        scarcity: &str,
        performance: &str,
        importance: &str,
        competitiveness: &str,
        availability: &str,
    ) -> PyResult<Self> {
        let inner = Phase {
            name,
            employee_count,
            risk_coefficient,
            seniority: SeniorityLevel::from_label(seniority)?,
            role_impact: RoleImpact::from_label(role_impact)?,
            scarcity: SkillScarcity::from_label(scarcity)?,
            performance: PerformanceRating::from_label(performance)?,
            importance: ProjectImportance::from_label(importance)?,
            competitiveness: MarketCompetitiveness::from_label(competitiveness)?,
            availability: TalentAvailability::from_label(availability)?,
        };
        inner.validate()?;
        Ok(Self { inner })
    }

    #[getter]
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    #[getter]
    fn employee_count(&self) -> u32 {
        self.inner.employee_count
    }

    #[getter]
    fn risk_coefficient(&self) -> f64 {
        self.inner.risk_coefficient
    }

    /// Base-grant adjustment coefficient for this phase.
    fn base_coefficient(&self) -> f64 {
        base_coefficient(&self.inner)
    }

    /// Bonus-grant adjustment coefficient for this phase.
    fn bonus_coefficient(&self) -> f64 {
        bonus_coefficient(&self.inner)
    }

    fn __repr__(&self) -> String {
        format!(
            "Phase(name={:?}, employee_count={})",
            self.inner.name, self.inner.employee_count
        )
    }
}

// ============================================================================
// Result Classes
// ============================================================================

/// Python-exposed simulation result.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PySimulationResult {
    inner: SimulationResult,
}

#[pymethods]
impl PySimulationResult {
    #[getter]
    fn cumulative_drains<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        vec_to_numpy_f64(py, self.inner.cumulative_drains.clone())
    }

    #[getter]
    fn cumulative_sources<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        vec_to_numpy_f64(py, self.inner.cumulative_sources.clone())
    }

    #[getter]
    fn alert_period(&self) -> Option<usize> {
        self.inner.alert_period
    }

    #[getter]
    fn alert_triggered(&self) -> bool {
        self.inner.alert_triggered()
    }

    #[getter]
    fn final_ratio(&self) -> f64 {
        self.inner.final_ratio
    }

    fn __repr__(&self) -> String {
        format!(
            "SimulationResult(periods={}, alert_period={:?}, final_ratio={:.4})",
            self.inner.periods(),
            self.inner.alert_period,
            self.inner.final_ratio
        )
    }
}

/// Python-exposed ensemble result.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PyEnsembleResult {
    inner: EnsembleResult,
}

#[pymethods]
impl PyEnsembleResult {
    #[getter]
    fn final_ratios<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        vec_to_numpy_f64(py, self.inner.final_ratios.clone())
    }

    #[getter]
    fn alert_probability(&self) -> f64 {
        self.inner.alert_probability
    }

    #[getter]
    fn mean_final_ratio(&self) -> f64 {
        self.inner.mean_final_ratio
    }

    #[getter]
    fn ratio_percentiles(&self) -> Vec<(f64, f64)> {
        self.inner.ratio_percentiles.clone()
    }

    #[getter]
    fn mean_alert_period(&self) -> Option<f64> {
        self.inner.mean_alert_period
    }

    fn __repr__(&self) -> String {
        format!(
            "EnsembleResult(runs={}, alert_probability={:.3})",
            self.inner.final_ratios.len(),
            self.inner.alert_probability
        )
    }
}

/// Python-exposed depletion result.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PyDepletionResult {
    inner: DepletionResult,
}

#[pymethods]
impl PyDepletionResult {
    /// Remaining pool balance in millions, one entry per employee, each
    /// recorded before that employee's deduction.
    #[getter]
    fn remaining_allocation<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        vec_to_numpy_f64(py, self.inner.remaining_allocation.clone())
    }

    #[getter]
    fn final_reserve(&self) -> f64 {
        self.inner.final_reserve
    }

    #[getter]
    fn display_reserve(&self) -> f64 {
        self.inner.display_reserve()
    }

    #[getter]
    fn phase_names(&self) -> Vec<String> {
        self.inner
            .phase_allocations
            .iter()
            .map(|a| a.name.clone())
            .collect()
    }

    #[getter]
    fn tokens_per_employee<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        vec_to_numpy_f64(
            py,
            self.inner
                .phase_allocations
                .iter()
                .map(|a| a.tokens_per_employee)
                .collect(),
        )
    }

    #[getter]
    fn adjusted_coefficients<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        vec_to_numpy_f64(
            py,
            self.inner
                .phase_allocations
                .iter()
                .map(|a| a.adjusted_coefficient)
                .collect(),
        )
    }

    /// Per-phase compensation figure at `token_price`.
    #[pyo3(signature = (token_price=DEFAULT_TOKEN_PRICE))]
    fn compensation(&self, token_price: f64) -> Vec<f64> {
        self.inner
            .phase_allocations
            .iter()
            .map(|a| a.compensation(token_price))
            .collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "DepletionResult(employees={}, final_reserve={:.4})",
            self.inner.total_employees(),
            self.inner.final_reserve
        )
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Run a single seeded ratio simulation.
#[pyfunction]
#[pyo3(signature = (config, seed=42))]
pub fn run_ratio_simulation(config: &PySimulationConfig, seed: u64) -> PyResult<PySimulationResult> {
    let inner = simulate_seeded(&config.into(), seed)?;
    Ok(PySimulationResult { inner })
}

/// Run a seeded ensemble of ratio simulations.
#[pyfunction]
pub fn run_ratio_ensemble(
    config: &PySimulationConfig,
    ensemble: &PyEnsembleConfig,
) -> PyResult<PyEnsembleResult> {
    let inner = run_ensemble(&config.into(), &ensemble.into())?;
    Ok(PyEnsembleResult { inner })
}

fn run_depletion_with<F>(
    total_tokens: f64,
    phases: Vec<PyPhase>,
    adjust: F,
) -> PyResult<PyDepletionResult>
where
    F: Fn(&Phase) -> f64,
{
    let pool = AllocationPool::new(total_tokens)?;
    let phases: Vec<Phase> = phases.into_iter().map(|p| p.inner).collect();
    let inner = run_depletion(&pool, &phases, adjust)?;
    Ok(PyDepletionResult { inner })
}

/// Deplete a pool across phases using base-grant coefficients.
#[pyfunction]
pub fn run_base_depletion(total_tokens: f64, phases: Vec<PyPhase>) -> PyResult<PyDepletionResult> {
    run_depletion_with(total_tokens, phases, base_coefficient)
}

/// Deplete a pool across phases using bonus-grant coefficients.
#[pyfunction]
pub fn run_bonus_depletion(total_tokens: f64, phases: Vec<PyPhase>) -> PyResult<PyDepletionResult> {
    run_depletion_with(total_tokens, phases, bonus_coefficient)
}

/// Resolve the hiring band coefficient for an employee count.
#[pyfunction]
pub fn band_coefficient(employee_count: u32) -> f64 {
    bands::band_coefficient(employee_count)
}
