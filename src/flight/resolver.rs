use std::path::Path;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};
use crate::{
    eligibility::{CompensationResult, DisruptionDetails, EligibilityChecker, Route},
    error::{ClaimError, Result},
    flight::types::FlightRecord,
};

/// Source of resolved flight data
#[cfg_attr(test, mockall::automock)]
pub trait FlightDataSource {
    fn fetch_flight(&self, flight_number: &str, date: NaiveDate) -> Result<Option<FlightRecord>>;
}

/// Flight records loaded from a JSON array on disk
pub struct JsonFlightSource {
    records: Vec<FlightRecord>,
}

impl JsonFlightSource {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let records: Vec<FlightRecord> = serde_json::from_str(&contents)?;
        info!("Loaded {} flight records from {}", records.len(), path.display());
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FlightDataSource for JsonFlightSource {
    fn fetch_flight(&self, flight_number: &str, date: NaiveDate) -> Result<Option<FlightRecord>> {
        let wanted = normalize_flight_number(flight_number);
        Ok(self
            .records
            .iter()
            .find(|r| r.date == date && normalize_flight_number(&r.flight_number) == wanted)
            .cloned())
    }
}

/// Flight numbers compare without spaces and case ("ba 117" == "BA117")
pub fn normalize_flight_number(flight_number: &str) -> String {
    flight_number
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Everything derived while assessing one flight
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub flight_number: String,
    pub date: NaiveDate,
    pub route: Route,
    pub distance_km: f64,
    pub disruption_type: String,
    pub result: CompensationResult,
    pub assessed_at: DateTime<Utc>,
}

/// Resolves flights from a data source and runs them through the rules engine
pub struct ClaimAssessor<S: FlightDataSource> {
    source: S,
    checker: EligibilityChecker,
}

impl<S: FlightDataSource> ClaimAssessor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            checker: EligibilityChecker::new(),
        }
    }

    pub fn assess(
        &self,
        flight_number: &str,
        date: NaiveDate,
        denied_boarding: bool,
    ) -> Result<Assessment> {
        let flight = self
            .source
            .fetch_flight(flight_number, date)?
            .ok_or_else(|| ClaimError::FlightNotFound(format!("{} on {}", flight_number, date)))?;

        let route = flight.route()?;
        let distance_km = flight.distance_km();
        let disruption: DisruptionDetails = flight.disruption(denied_boarding)?;

        debug!(
            "Assessing {} {} -> {}: {} over {:.0} km",
            flight.flight_number,
            flight.departure.iata,
            flight.arrival.iata,
            disruption.kind(),
            distance_km
        );

        let result = self.checker.check_eligibility(&route, &disruption, distance_km)?;

        Ok(Assessment {
            flight_number: flight.flight_number,
            date: flight.date,
            route,
            distance_km,
            disruption_type: disruption.kind().to_string(),
            result,
            assessed_at: Utc::now(),
        })
    }
}
