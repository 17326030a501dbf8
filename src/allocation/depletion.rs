//! Allocation depletion model.
//!
//! Distributes a fixed token pool across hiring phases. Each phase prices an
//! employee grant from the pool-wide base amount, the phase risk coefficient
//! and an adjustment coefficient, then the pool is drawn down one employee at
//! a time while the remaining balance is recorded.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::allocation::phase::Phase;
use crate::core::{Result, TokensimError};

/// Output sequences are reported in millions of tokens.
const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// Reference token price for the derived compensation figure.
pub const DEFAULT_TOKEN_PRICE: f64 = 0.08;

/// A fixed token budget to distribute.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AllocationPool {
    /// Total tokens in the pool.
    pub total_tokens: f64,
}

impl AllocationPool {
    /// Create a pool; the budget must be non-negative.
    pub fn new(total_tokens: f64) -> Result<Self> {
        if total_tokens < 0.0 {
            return Err(TokensimError::out_of_domain(format!(
                "total_tokens must be non-negative, got {total_tokens}"
            )));
        }
        Ok(Self { total_tokens })
    }

    /// Unadjusted per-employee share of the pool.
    pub fn base_tokens_per_unit(&self, total_headcount: u32) -> Result<f64> {
        if total_headcount == 0 {
            return Err(TokensimError::invalid_config(
                "total employee count across phases must be positive",
            ));
        }
        Ok(self.total_tokens / total_headcount as f64)
    }
}

/// Per-phase pricing produced by a depletion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseAllocation {
    /// Phase name.
    pub name: String,
    /// Adjustment coefficient applied to this phase.
    pub adjusted_coefficient: f64,
    /// Tokens granted per employee in this phase.
    pub tokens_per_employee: f64,
}

impl PhaseAllocation {
    /// Derived compensation figure in currency. Presentation only, not part
    /// of the depletion contract.
    pub fn compensation(&self, token_price: f64) -> f64 {
        self.tokens_per_employee * token_price
    }
}

/// Result of a depletion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepletionResult {
    /// Per-phase pricing, in phase order.
    pub phase_allocations: Vec<PhaseAllocation>,
    /// Remaining pool balance in millions, one entry per employee hired, in
    /// phase order. Each entry is the balance *before* that employee's
    /// deduction.
    pub remaining_allocation: Vec<f64>,
    /// Pool balance left after all deductions, in millions. May be negative
    /// when the pool is overdrawn.
    pub final_reserve: f64,
}

impl DepletionResult {
    /// Final reserve capped at zero for display.
    #[inline]
    pub fn display_reserve(&self) -> f64 {
        self.final_reserve.max(0.0)
    }

    /// Total number of employees covered by the run.
    #[inline]
    pub fn total_employees(&self) -> usize {
        self.remaining_allocation.len()
    }
}

/// Deplete `pool` across `phases` in declared order.
///
/// `adjust` maps a phase to its adjustment coefficient; pass
/// [`base_coefficient`](crate::allocation::phase::base_coefficient) or
/// [`bonus_coefficient`](crate::allocation::phase::bonus_coefficient) for the
/// standard grant kinds.
///
/// The recorded balance for the Nth employee is the balance before that
/// employee's cost is deducted. Consumers depend on this ordering; do not
/// flip it to balance-after-hiring.
pub fn run_depletion<F>(pool: &AllocationPool, phases: &[Phase], adjust: F) -> Result<DepletionResult>
where
    F: Fn(&Phase) -> f64,
{
    let mut names = HashSet::new();
    for phase in phases {
        phase.validate()?;
        if !names.insert(phase.name.as_str()) {
            return Err(TokensimError::invalid_config(format!(
                "duplicate phase name {:?}",
                phase.name
            )));
        }
    }

    let total_headcount: u32 = phases.iter().map(|p| p.employee_count).sum();
    let base = pool.base_tokens_per_unit(total_headcount)?;

    let mut remaining = pool.total_tokens;
    let mut remaining_allocation = Vec::with_capacity(total_headcount as usize);
    let mut phase_allocations = Vec::with_capacity(phases.len());

    for phase in phases {
        let adjusted_coefficient = adjust(phase);
        let tokens_per_employee = base * phase.risk_coefficient * adjusted_coefficient;

        for _ in 0..phase.employee_count {
            if remaining > 0.0 {
                remaining_allocation.push(remaining / TOKENS_PER_MILLION);
                remaining -= tokens_per_employee;
            } else {
                remaining_allocation.push(0.0);
            }
        }

        phase_allocations.push(PhaseAllocation {
            name: phase.name.clone(),
            adjusted_coefficient,
            tokens_per_employee,
        });
    }

    Ok(DepletionResult {
        phase_allocations,
        remaining_allocation,
        final_reserve: remaining / TOKENS_PER_MILLION,
    })
}
