//! Hiring band lookup.
//!
//! Maps an employee count to a bracket coefficient through half-open
//! `[min, max)` integer ranges. Brackets are non-overlapping and ordered by
//! `min`; counts outside every bracket fall back to 1.0.

/// A single `[min, max)` bracket.
#[derive(Debug, Clone, Copy)]
pub struct Band {
    pub min: u32,
    pub max: u32,
    pub coefficient: f64,
}

/// Fixed bracket table. Boundaries are part of the compatibility contract.
pub const HIRING_BANDS: [Band; 5] = [
    Band { min: 0, max: 10, coefficient: 1.15 },
    Band { min: 10, max: 25, coefficient: 1.05 },
    Band { min: 25, max: 50, coefficient: 0.95 },
    Band { min: 50, max: 100, coefficient: 0.90 },
    Band { min: 100, max: 250, coefficient: 0.85 },
];

/// Resolve the bracket coefficient for an employee count.
pub fn band_coefficient(employee_count: u32) -> f64 {
    HIRING_BANDS
        .iter()
        .find(|band| employee_count >= band.min && employee_count < band.max)
        .map(|band| band.coefficient)
        .unwrap_or(1.0)
}
