// Suppress warning from PyO3 macro expansion (fixed in newer PyO3 versions)
#![allow(non_local_definitions)]

//! tokensim - Tokenomics modeling core.
//!
//! This crate provides the computation behind a tokenomics dashboard:
//! - Drain/source ratio simulation with a critical-ratio alert
//! - Seeded ensemble runs with alert-probability summaries
//! - Allocation depletion across hiring phases with adjustment coefficients
//! - Hiring band lookup
//!
//! All randomness is injected through seeded generators; the Python host
//! only supplies configuration and renders results.

use pyo3::prelude::*;

pub mod allocation;
pub mod core;
pub mod python;
pub mod simulation;

/// Python module entry point
#[pymodule]
fn _tokensim(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    // Register config classes
    m.add_class::<python::bindings::PySimulationConfig>()?;
    m.add_class::<python::bindings::PyEnsembleConfig>()?;
    m.add_class::<python::bindings::PyPhase>()?;

    // Register result classes
    m.add_class::<python::bindings::PySimulationResult>()?;
    m.add_class::<python::bindings::PyEnsembleResult>()?;
    m.add_class::<python::bindings::PyDepletionResult>()?;

    // Register simulation functions
    m.add_function(wrap_pyfunction!(python::bindings::run_ratio_simulation, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::run_ratio_ensemble, m)?)?;

    // Register allocation functions
    m.add_function(wrap_pyfunction!(python::bindings::run_base_depletion, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::run_bonus_depletion, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::band_coefficient, m)?)?;

    Ok(())
}
