//! Typed form inputs for both flows.
//!
//! Hosts deserialize or prompt for these structs and call `validate` before anything reaches the
//! prompt builders, so the builders can treat every value as well formed.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

pub const PROFILE_MIN_AGE: u8 = 18;
pub const PROFILE_MAX_AGE: u8 = 100;
pub const CRITERIA_MIN_AGE: u8 = 18;
pub const CRITERIA_MAX_AGE: u8 = 80;

/// Kind of insurance the user is interested in (advisor flow)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceType {
    Health,
    Life,
    Auto,
    Home,
    Travel,
    Investment,
    Other,
}

impl InsuranceType {
    pub const ALL: [InsuranceType; 7] = [
        InsuranceType::Health,
        InsuranceType::Life,
        InsuranceType::Auto,
        InsuranceType::Home,
        InsuranceType::Travel,
        InsuranceType::Investment,
        InsuranceType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InsuranceType::Health => "Salud",
            InsuranceType::Life => "Vida",
            InsuranceType::Auto => "Automóvil",
            InsuranceType::Home => "Hogar",
            InsuranceType::Travel => "Viajes",
            InsuranceType::Investment => "Inversión",
            InsuranceType::Other => "Otro",
        }
    }
}

impl fmt::Display for InsuranceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Personal and financial profile collected by the advisor form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u8,
    pub occupation: String,
    /// Monthly income in BOB
    pub monthly_income: f64,
    pub insurance_type: InsuranceType,
    #[serde(default)]
    pub specific_needs: String,
}

impl UserProfile {
    /// Range checks the form enforces before a profile is stored.
    pub fn validate(&self) -> Result<()> {
        check_age(self.age, PROFILE_MIN_AGE, PROFILE_MAX_AGE)?;
        check_amount("monthly_income", self.monthly_income)
    }
}

impl Default for UserProfile {
    /// Values the form is pre-filled with.
    fn default() -> Self {
        Self {
            name: "Juan Pérez".to_string(),
            age: 30,
            occupation: "Ingeniero de Software".to_string(),
            monthly_income: 5000.0,
            insurance_type: InsuranceType::Health,
            specific_needs:
                "Busco un seguro que cubra gastos médicos mayores y tenga opción de inversión."
                    .to_string(),
        }
    }
}

/// How long the user wants the life insurance coverage to last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageDuration {
    Short,
    Long,
    Unsure,
}

impl CoverageDuration {
    pub const ALL: [CoverageDuration; 3] = [
        CoverageDuration::Short,
        CoverageDuration::Long,
        CoverageDuration::Unsure,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CoverageDuration::Short => "Corta (ej. 10-20 años)",
            CoverageDuration::Long => "Larga (ej. 30+ años o de por vida)",
            CoverageDuration::Unsure => "No estoy seguro",
        }
    }
}

impl fmt::Display for CoverageDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What matters most to the user in a life insurance policy.
///
/// Ordering follows declaration order, which is the order priorities are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    LowCost,
    LifetimeCoverage,
    CashValueAccumulation,
    FastProcess,
    CriticalIllnessProtection,
    Flexibility,
}

impl Priority {
    pub const ALL: [Priority; 6] = [
        Priority::LowCost,
        Priority::LifetimeCoverage,
        Priority::CashValueAccumulation,
        Priority::FastProcess,
        Priority::CriticalIllnessProtection,
        Priority::Flexibility,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Priority::LowCost => "Costo bajo",
            Priority::LifetimeCoverage => "Cobertura de por vida",
            Priority::CashValueAccumulation => "Acumulación de valor en efectivo",
            Priority::FastProcess => "Proceso rápido",
            Priority::CriticalIllnessProtection => "Protección ante enfermedades graves",
            Priority::Flexibility => "Flexibilidad",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Preference criteria collected by the comparator form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonCriteria {
    pub age: u8,
    /// Estimated annual income in USD
    pub annual_income: f64,
    pub coverage_duration: CoverageDuration,
    #[serde(default)]
    pub priorities: BTreeSet<Priority>,
    #[serde(default)]
    pub additional_comments: String,
}

impl ComparisonCriteria {
    pub fn validate(&self) -> Result<()> {
        check_age(self.age, CRITERIA_MIN_AGE, CRITERIA_MAX_AGE)?;
        check_amount("annual_income", self.annual_income)
    }
}

impl Default for ComparisonCriteria {
    fn default() -> Self {
        Self {
            age: 30,
            annual_income: 30000.0,
            coverage_duration: CoverageDuration::Short,
            priorities: BTreeSet::new(),
            additional_comments: String::new(),
        }
    }
}

fn check_age(age: u8, min: u8, max: u8) -> Result<()> {
    if (min..=max).contains(&age) {
        Ok(())
    } else {
        Err(AdvisorError::InvalidInput(format!(
            "age must be between {min} and {max}, got {age}"
        )))
    }
}

fn check_amount(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AdvisorError::InvalidInput(format!(
            "{field} must be a non-negative number, got {value}"
        )))
    }
}
