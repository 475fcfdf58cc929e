//! Vital sign and dose unit validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Systolic/diastolic reading, e.g. `120/80`.
static BLOOD_PRESSURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2,3})/(\d{2,3})$").expect("valid regex"));

/// Maximum length of a dose unit description.
pub const MAX_DOSE_DESCRIPTION_LENGTH: usize = 128;

const TEMPERATURE_RANGE: (f64, f64) = (25.0, 45.0);
const PULSE_RANGE: (i32, i32) = (0, 300);
const RESPIRATION_RANGE: (i32, i32) = (0, 100);

/// A parsed blood pressure reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloodPressure {
    pub systolic: u16,
    pub diastolic: u16,
}

pub fn parse_blood_pressure(value: &str) -> Result<BloodPressure, CoreError> {
    let invalid = || {
        CoreError::Validation(format!(
            "Invalid blood pressure '{value}'. Use systolic/diastolic, e.g. 120/80"
        ))
    };
    let caps = BLOOD_PRESSURE_RE.captures(value.trim()).ok_or_else(invalid)?;
    let systolic: u16 = caps[1].parse().map_err(|_| invalid())?;
    let diastolic: u16 = caps[2].parse().map_err(|_| invalid())?;
    if diastolic >= systolic {
        return Err(invalid());
    }
    Ok(BloodPressure {
        systolic,
        diastolic,
    })
}

/// Optional readings of a vital sign record, checked for plausibility.
pub fn validate_vitals(
    temperature: Option<f64>,
    pulse: Option<i32>,
    respiration_rate: Option<i32>,
    blood_pressure: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(t) = temperature {
        if !(TEMPERATURE_RANGE.0..=TEMPERATURE_RANGE.1).contains(&t) {
            return Err(CoreError::Validation(format!(
                "Temperature {t} °C is outside {}..{} °C",
                TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1
            )));
        }
    }
    if let Some(p) = pulse {
        if !(PULSE_RANGE.0..=PULSE_RANGE.1).contains(&p) {
            return Err(CoreError::Validation(format!(
                "Pulse {p} is outside {}..{}",
                PULSE_RANGE.0, PULSE_RANGE.1
            )));
        }
    }
    if let Some(r) = respiration_rate {
        if !(RESPIRATION_RANGE.0..=RESPIRATION_RANGE.1).contains(&r) {
            return Err(CoreError::Validation(format!(
                "Respiration rate {r} is outside {}..{}",
                RESPIRATION_RANGE.0, RESPIRATION_RANGE.1
            )));
        }
    }
    if let Some(bp) = blood_pressure {
        parse_blood_pressure(bp)?;
    }
    Ok(())
}

/// Dose unit: a unit name and a required description of at most 128
/// characters.
pub fn validate_dose_unit(name: &str, description: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Unit is required".to_string()));
    }
    if description.trim().is_empty() {
        return Err(CoreError::Validation("Description is required".to_string()));
    }
    if description.chars().count() > MAX_DOSE_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DOSE_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blood_pressure_parses_systolic_over_diastolic() {
        assert_eq!(
            parse_blood_pressure("120/80").unwrap(),
            BloodPressure {
                systolic: 120,
                diastolic: 80
            }
        );
        assert!(parse_blood_pressure("120-80").is_err());
        assert!(parse_blood_pressure("80/120").is_err());
        assert!(parse_blood_pressure("1200/80").is_err());
    }

    #[test]
    fn implausible_readings_are_rejected() {
        assert!(validate_vitals(Some(37.2), Some(72), Some(16), Some("118/76")).is_ok());
        assert!(validate_vitals(Some(60.0), None, None, None).is_err());
        assert!(validate_vitals(None, Some(-1), None, None).is_err());
        assert!(validate_vitals(None, None, Some(400), None).is_err());
        assert!(validate_vitals(None, None, None, None).is_ok());
    }

    #[test]
    fn dose_unit_description_is_required_and_bounded() {
        assert!(validate_dose_unit("mg", "Milligram").is_ok());
        assert!(validate_dose_unit("mg", "").is_err());
        assert!(validate_dose_unit("", "Milligram").is_err());
        let exact = "d".repeat(MAX_DOSE_DESCRIPTION_LENGTH);
        assert!(validate_dose_unit("mg", &exact).is_ok());
        let long = "d".repeat(MAX_DOSE_DESCRIPTION_LENGTH + 1);
        assert!(validate_dose_unit("mg", &long).is_err());
    }
}
