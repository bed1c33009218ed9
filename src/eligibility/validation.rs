use serde::Serialize;
use crate::eligibility::{disruption::RawDisruption, jurisdiction::Route};

/// Structural problems found in a claim before it reaches the rules engine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ClaimValidation {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

fn check_hours_field(errors: &mut Vec<String>, label: &str, value: Option<f64>) {
    if let Some(hours) = value {
        if !hours.is_finite() || hours < 0.0 {
            errors.push(format!("{} must be a non-negative number of hours", label));
        }
    }
}

/// Check a claim's shape without deciding eligibility
///
/// Never fails; every problem found is reported in `errors`.
pub fn validate_claim(route: &Route, disruption: &RawDisruption, distance_km: f64) -> ClaimValidation {
    let mut errors = Vec::new();

    if route.departure_country.trim().is_empty() {
        errors.push("Departure country is required".to_string());
    }
    if route.arrival_country.trim().is_empty() {
        errors.push("Arrival country is required".to_string());
    }
    if route.airline_country.trim().is_empty() {
        errors.push("Airline country is required".to_string());
    }

    let kind = disruption.kind.as_deref().map(|k| k.trim().to_ascii_lowercase());
    match kind.as_deref() {
        None | Some("") => errors.push("Disruption type is required".to_string()),
        Some("delay") if disruption.delay_duration.is_none() => {
            errors.push("Delay duration is required for delay disruptions".to_string());
        }
        Some(_) => {}
    }

    check_hours_field(&mut errors, "Delay duration", disruption.delay_duration);
    check_hours_field(&mut errors, "Notice period", disruption.notice_given);

    if !distance_km.is_finite() || distance_km <= 0.0 {
        errors.push("Distance must be greater than zero".to_string());
    }

    ClaimValidation::from_errors(errors)
}
