use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use crate::{
    eligibility::{CompensationResult, Regulation, Route},
    flight::Assessment,
};

/// A stored eligibility decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: i64,
    pub flight_number: Option<String>,
    pub flight_date: Option<NaiveDate>,
    pub departure_country: String,
    pub arrival_country: String,
    pub airline_country: String,
    pub distance_km: f64,
    pub disruption_type: String,
    pub is_eligible: bool,
    pub amount: u32,
    pub regulation: Regulation,
    pub reason: String,
    pub assessed_at: DateTime<Utc>,
}

impl AssessmentRecord {
    /// Record for a claim checked directly, without a resolved flight
    pub fn from_check(
        route: &Route,
        disruption_type: &str,
        distance_km: f64,
        result: &CompensationResult,
    ) -> Self {
        Self {
            id: 0,
            flight_number: None,
            flight_date: None,
            departure_country: route.departure_country.clone(),
            arrival_country: route.arrival_country.clone(),
            airline_country: route.airline_country.clone(),
            distance_km,
            disruption_type: disruption_type.to_string(),
            is_eligible: result.is_eligible,
            amount: result.amount,
            regulation: result.regulation,
            reason: result.reason.clone(),
            assessed_at: Utc::now(),
        }
    }

    pub fn currency(&self) -> &'static str {
        self.regulation.currency()
    }
}

impl From<&Assessment> for AssessmentRecord {
    fn from(assessment: &Assessment) -> Self {
        Self {
            flight_number: Some(assessment.flight_number.clone()),
            flight_date: Some(assessment.date),
            assessed_at: assessment.assessed_at,
            ..Self::from_check(
                &assessment.route,
                &assessment.disruption_type,
                assessment.distance_km,
                &assessment.result,
            )
        }
    }
}
