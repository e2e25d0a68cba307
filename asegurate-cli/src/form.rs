//! Terminal renditions of the two forms. Range and enum constraints are enforced while typing.

use asegurate_core::{
    ComparisonCriteria, CoverageDuration, InsuranceType, Priority, UserProfile,
    profile::{CRITERIA_MAX_AGE, CRITERIA_MIN_AGE, PROFILE_MAX_AGE, PROFILE_MIN_AGE},
};
use dialoguer::{Input, MultiSelect, Select};

pub fn ask_profile(defaults: &UserProfile) -> anyhow::Result<UserProfile> {
    let name: String = Input::new()
        .with_prompt("Nombre completo")
        .default(defaults.name.clone())
        .interact_text()?;

    let age: u8 = Input::new()
        .with_prompt("Edad")
        .default(defaults.age)
        .validate_with(|age: &u8| within(*age, PROFILE_MIN_AGE, PROFILE_MAX_AGE))
        .interact_text()?;

    let occupation: String = Input::new()
        .with_prompt("Ocupación")
        .default(defaults.occupation.clone())
        .interact_text()?;

    let monthly_income: f64 = Input::new()
        .with_prompt("Ingresos mensuales (BOB)")
        .default(defaults.monthly_income)
        .validate_with(|amount: &f64| non_negative(*amount))
        .interact_text()?;

    let insurance_type = choose(
        "¿En qué tipo de seguro estás interesado?",
        &InsuranceType::ALL,
        defaults.insurance_type,
        InsuranceType::label,
    )?;

    let specific_needs: String = Input::new()
        .with_prompt("¿Hay alguna necesidad o preocupación específica que tengas sobre el seguro?")
        .default(defaults.specific_needs.clone())
        .allow_empty(true)
        .interact_text()?;

    Ok(UserProfile {
        name,
        age,
        occupation,
        monthly_income,
        insurance_type,
        specific_needs,
    })
}

pub fn ask_criteria(defaults: &ComparisonCriteria) -> anyhow::Result<ComparisonCriteria> {
    let age: u8 = Input::new()
        .with_prompt("Tu edad")
        .default(defaults.age)
        .validate_with(|age: &u8| within(*age, CRITERIA_MIN_AGE, CRITERIA_MAX_AGE))
        .interact_text()?;

    let annual_income: f64 = Input::new()
        .with_prompt("Ingresos anuales estimados (USD)")
        .default(defaults.annual_income)
        .validate_with(|amount: &f64| non_negative(*amount))
        .interact_text()?;

    let coverage_duration = choose(
        "¿Por cuánto tiempo deseas la cobertura?",
        &CoverageDuration::ALL,
        defaults.coverage_duration,
        CoverageDuration::label,
    )?;

    let labels: Vec<&str> = Priority::ALL.iter().map(Priority::label).collect();
    let checked: Vec<bool> = Priority::ALL
        .iter()
        .map(|p| defaults.priorities.contains(p))
        .collect();
    let picked = MultiSelect::new()
        .with_prompt("¿Qué es lo más importante para ti en un seguro de vida?")
        .items(&labels)
        .defaults(&checked)
        .interact()?;
    let priorities = picked.into_iter().map(|i| Priority::ALL[i]).collect();

    let additional_comments: String = Input::new()
        .with_prompt("¿Algún comentario adicional o necesidad específica?")
        .default(defaults.additional_comments.clone())
        .allow_empty(true)
        .interact_text()?;

    Ok(ComparisonCriteria {
        age,
        annual_income,
        coverage_duration,
        priorities,
        additional_comments,
    })
}

/// Pick one of `options`, starting on `current`.
pub fn choose<T: Copy + PartialEq>(
    prompt: &str,
    options: &[T],
    current: T,
    label: fn(&T) -> &'static str,
) -> anyhow::Result<T> {
    let labels: Vec<&str> = options.iter().map(label).collect();
    let default = options.iter().position(|o| *o == current).unwrap_or(0);
    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(options[index])
}

fn within(value: u8, min: u8, max: u8) -> Result<(), String> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(format!("Debe estar entre {min} y {max}"))
    }
}

fn non_negative(value: f64) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err("Debe ser un número mayor o igual a 0".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_validator_matches_form_bounds() {
        assert!(within(18, PROFILE_MIN_AGE, PROFILE_MAX_AGE).is_ok());
        assert!(within(100, PROFILE_MIN_AGE, PROFILE_MAX_AGE).is_ok());
        assert!(within(17, PROFILE_MIN_AGE, PROFILE_MAX_AGE).is_err());
        assert!(within(81, CRITERIA_MIN_AGE, CRITERIA_MAX_AGE).is_err());
    }

    #[test]
    fn income_validator_rejects_negative() {
        assert!(non_negative(0.0).is_ok());
        assert!(non_negative(-10.0).is_err());
        assert!(non_negative(f64::NAN).is_err());
    }
}
