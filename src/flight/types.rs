use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use crate::{
    eligibility::{DisruptionDetails, DisruptionReason, Route},
    error::{ClaimError, Result},
    geo::{country_for_timezone, normalize_country_code, DistanceCalculator},
};

/// Airport as described by flight data providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportInfo {
    pub iata: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    #[serde(default)]
    pub country: Option<String>,
}

impl AirportInfo {
    /// Country from metadata, falling back to the airport's timezone
    pub fn country_code(&self) -> Option<String> {
        self.country
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(normalize_country_code)
            .or_else(|| country_for_timezone(&self.timezone).map(str::to_string))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlineInfo {
    pub iata: String,
    pub country: String,
}

/// Operational status reported for a flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightStatus {
    Scheduled,
    Active,
    Landed,
    Cancelled,
    Incident,
    Diverted,
}

/// A resolved flight, as handed over by the flight-data integration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub flight_number: String,
    pub date: NaiveDate,
    pub airline: AirlineInfo,
    pub departure: AirportInfo,
    pub arrival: AirportInfo,
    pub scheduled_departure: DateTime<Utc>,
    pub scheduled_arrival: DateTime<Utc>,
    #[serde(default)]
    pub actual_departure: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_arrival: Option<DateTime<Utc>>,
    pub status: FlightStatus,
    /// Hours between the cancellation notice and scheduled departure
    #[serde(default)]
    pub cancellation_notice_hours: Option<f64>,
    #[serde(default)]
    pub disruption_reason: Option<DisruptionReason>,
}

impl FlightRecord {
    pub fn route(&self) -> Result<Route> {
        let departure_country = self.departure.country_code().ok_or_else(|| {
            ClaimError::NotAssessable(format!(
                "unknown country for departure airport {}",
                self.departure.iata
            ))
        })?;
        let arrival_country = self.arrival.country_code().ok_or_else(|| {
            ClaimError::NotAssessable(format!(
                "unknown country for arrival airport {}",
                self.arrival.iata
            ))
        })?;

        Ok(Route {
            departure_country,
            arrival_country,
            airline_country: normalize_country_code(&self.airline.country),
        })
    }

    pub fn distance_km(&self) -> f64 {
        DistanceCalculator::distance(
            self.departure.latitude,
            self.departure.longitude,
            self.arrival.latitude,
            self.arrival.longitude,
        )
    }

    /// Hours late at arrival; early arrivals count as zero
    pub fn arrival_delay_hours(&self) -> Option<f64> {
        self.actual_arrival.map(|actual| {
            let minutes = (actual - self.scheduled_arrival).num_minutes().max(0);
            minutes as f64 / 60.0
        })
    }

    /// Classify the disruption suffered on this flight
    ///
    /// A passenger-reported denied boarding wins over the flight's own status.
    pub fn disruption(&self, denied_boarding: bool) -> Result<DisruptionDetails> {
        let reason = self.disruption_reason;

        if denied_boarding {
            return Ok(DisruptionDetails::DeniedBoarding { reason });
        }

        match self.status {
            FlightStatus::Cancelled => Ok(DisruptionDetails::Cancellation {
                notice_hours: self.cancellation_notice_hours,
                reason,
            }),
            FlightStatus::Landed | FlightStatus::Incident | FlightStatus::Diverted => {
                let hours = self.arrival_delay_hours().ok_or_else(|| {
                    ClaimError::NotAssessable(format!(
                        "flight {} has no recorded arrival time",
                        self.flight_number
                    ))
                })?;
                Ok(DisruptionDetails::Delay { hours, reason })
            }
            FlightStatus::Scheduled | FlightStatus::Active => Err(ClaimError::NotAssessable(
                format!("flight {} has not completed yet", self.flight_number),
            )),
        }
    }
}
