//! Drain/source ratio simulation.

pub mod ensemble;
pub mod ratio;

pub use ensemble::{run_ensemble, EnsembleConfig, EnsembleResult};
pub use ratio::{
    first_crossing, simulate, simulate_seeded, SimulationConfig, SimulationResult,
};
