//! Allocation depletion modeling.

pub mod bands;
pub mod depletion;
pub mod phase;

pub use bands::{band_coefficient, Band, HIRING_BANDS};
pub use depletion::{
    run_depletion, AllocationPool, DepletionResult, PhaseAllocation, DEFAULT_TOKEN_PRICE,
};
pub use phase::{base_coefficient, bonus_coefficient, Phase};
