//! Hiring phases and categorical adjustment weight tables.
//!
//! Each phase carries one selection per adjustment dimension. Dimensions are
//! closed enums mapped to fixed numeric weights; an unknown label is a
//! configuration error at parse time, never a silent default. The weights
//! here are a compatibility contract with existing consumers and must not be
//! retuned casually.

use serde::{Deserialize, Serialize};

use crate::allocation::bands::band_coefficient;
use crate::core::{Result, TokensimError};

macro_rules! weight_table {
    (
        $(#[$meta:meta])*
        $name:ident, $dimension:literal {
            $($variant:ident = $label:literal => $weight:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Numeric weight used in coefficient averaging.
            #[inline]
            pub fn weight(self) -> f64 {
                match self {
                    $(Self::$variant => $weight),+
                }
            }

            /// Canonical label for this selection.
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            /// Resolve a label (case-insensitive), rejecting unknown values.
            pub fn from_label(label: &str) -> Result<Self> {
                match label {
                    $(l if l.eq_ignore_ascii_case($label) => Ok(Self::$variant),)+
                    _ => Err(TokensimError::unknown_label($dimension, label)),
                }
            }
        }
    };
}

weight_table! {
    /// Seniority of the roles hired in a phase.
    SeniorityLevel, "seniority level" {
        Junior = "Junior" => 0.8,
        Mid = "Mid" => 1.0,
        Senior = "Senior" => 1.2,
        Lead = "Lead" => 1.35,
        Executive = "Executive" => 1.5,
    }
}

weight_table! {
    /// How central the roles are to the product.
    RoleImpact, "role impact" {
        Support = "Support" => 0.85,
        Core = "Core" => 1.0,
        Critical = "Critical" => 1.25,
    }
}

weight_table! {
    /// Scarcity of the required skill set on the market.
    SkillScarcity, "skill scarcity" {
        Common = "Common" => 0.9,
        Moderate = "Moderate" => 1.0,
        Rare = "Rare" => 1.2,
        VeryRare = "VeryRare" => 1.4,
    }
}

weight_table! {
    /// Individual performance rating, bonus side.
    PerformanceRating, "performance rating" {
        Below = "Below" => 0.75,
        Meets = "Meets" => 1.0,
        Exceeds = "Exceeds" => 1.2,
        Outstanding = "Outstanding" => 1.4,
    }
}

weight_table! {
    /// Importance of the project the phase staffs, bonus side.
    ProjectImportance, "project importance" {
        Standard = "Standard" => 0.9,
        Strategic = "Strategic" => 1.1,
        Flagship = "Flagship" => 1.3,
    }
}

weight_table! {
    /// Competitive pressure on compensation in the segment, bonus side.
    MarketCompetitiveness, "market competitiveness" {
        Low = "Low" => 0.9,
        Average = "Average" => 1.0,
        High = "High" => 1.15,
        Extreme = "Extreme" => 1.3,
    }
}

weight_table! {
    /// Availability of matching talent, bonus side.
    TalentAvailability, "talent availability" {
        Abundant = "Abundant" => 0.85,
        Balanced = "Balanced" => 1.0,
        Tight = "Tight" => 1.15,
        Scarce = "Scarce" => 1.3,
    }
}

/// A hiring phase with its adjustment selections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    /// Phase name, unique across a run.
    pub name: String,
    /// Number of employees hired in this phase.
    pub employee_count: u32,
    /// Risk discount in (0, 1] applied to every grant in the phase.
    pub risk_coefficient: f64,
    pub seniority: SeniorityLevel,
    pub role_impact: RoleImpact,
    pub scarcity: SkillScarcity,
    pub performance: PerformanceRating,
    pub importance: ProjectImportance,
    pub competitiveness: MarketCompetitiveness,
    pub availability: TalentAvailability,
}

impl Phase {
    /// Create a phase with neutral adjustment selections.
    pub fn new(name: impl Into<String>, employee_count: u32, risk_coefficient: f64) -> Self {
        Self {
            name: name.into(),
            employee_count,
            risk_coefficient,
            seniority: SeniorityLevel::Mid,
            role_impact: RoleImpact::Core,
            scarcity: SkillScarcity::Moderate,
            performance: PerformanceRating::Meets,
            importance: ProjectImportance::Standard,
            competitiveness: MarketCompetitiveness::Average,
            availability: TalentAvailability::Balanced,
        }
    }

    /// Validate the phase record.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(TokensimError::invalid_config("phase name must be non-empty"));
        }
        if !(self.risk_coefficient > 0.0 && self.risk_coefficient <= 1.0) {
            return Err(TokensimError::out_of_domain(format!(
                "risk_coefficient for phase {:?} must be in (0, 1], got {}",
                self.name, self.risk_coefficient
            )));
        }
        Ok(())
    }
}

fn mean4(a: f64, b: f64, c: f64, d: f64) -> f64 {
    (a + b + c + d) / 4.0
}

/// Base-grant coefficient: mean of seniority, role impact, scarcity and the
/// hiring band resolved from the phase's employee count.
pub fn base_coefficient(phase: &Phase) -> f64 {
    mean4(
        phase.seniority.weight(),
        phase.role_impact.weight(),
        phase.scarcity.weight(),
        band_coefficient(phase.employee_count),
    )
}

/// Bonus-grant coefficient: mean of the four bonus-side dimensions.
pub fn bonus_coefficient(phase: &Phase) -> f64 {
    mean4(
        phase.performance.weight(),
        phase.importance.weight(),
        phase.competitiveness.weight(),
        phase.availability.weight(),
    )
}
