use serde::{Deserialize, Serialize};
use crate::error::{ClaimError, Result};

/// Hours of delay at arrival that open a compensation claim
pub const DELAY_THRESHOLD_HOURS: f64 = 3.0;

/// Cancellation notice that removes any claim (14 days)
pub const FULL_NOTICE_HOURS: f64 = 14.0 * 24.0;

/// Cancellation notice that removes the claim on short flights (7 days)
pub const SHORT_FLIGHT_NOTICE_HOURS: f64 = 7.0 * 24.0;

/// Cause category reported for a disruption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum DisruptionReason {
    Weather,
    Security,
    Political,
    ExternalStrike,
    AirTrafficControl,
    MedicalEmergency,
    BirdStrike,
    Technical,
    AirlineStrike,
    CrewShortage,
    Overbooking,
    Operational,
    Other,
}

/// Causes that exempt the airline from compensation liability
pub const EXTRAORDINARY_CIRCUMSTANCES: [DisruptionReason; 7] = [
    DisruptionReason::Weather,
    DisruptionReason::Security,
    DisruptionReason::Political,
    DisruptionReason::ExternalStrike,
    DisruptionReason::AirTrafficControl,
    DisruptionReason::MedicalEmergency,
    DisruptionReason::BirdStrike,
];

impl DisruptionReason {
    pub fn is_extraordinary(&self) -> bool {
        EXTRAORDINARY_CIRCUMSTANCES.contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisruptionReason::Weather => "weather",
            DisruptionReason::Security => "security",
            DisruptionReason::Political => "political",
            DisruptionReason::ExternalStrike => "external_strike",
            DisruptionReason::AirTrafficControl => "air_traffic_control",
            DisruptionReason::MedicalEmergency => "medical_emergency",
            DisruptionReason::BirdStrike => "bird_strike",
            DisruptionReason::Technical => "technical",
            DisruptionReason::AirlineStrike => "airline_strike",
            DisruptionReason::CrewShortage => "crew_shortage",
            DisruptionReason::Overbooking => "overbooking",
            DisruptionReason::Operational => "operational",
            DisruptionReason::Other => "other",
        }
    }

    /// Human-readable label used in decision messages
    pub fn label(&self) -> &'static str {
        match self {
            DisruptionReason::Weather => "adverse weather",
            DisruptionReason::Security => "security risk",
            DisruptionReason::Political => "political instability",
            DisruptionReason::ExternalStrike => "strike outside the airline",
            DisruptionReason::AirTrafficControl => "air traffic control restriction",
            DisruptionReason::MedicalEmergency => "medical emergency",
            DisruptionReason::BirdStrike => "bird strike",
            DisruptionReason::Technical => "technical fault",
            DisruptionReason::AirlineStrike => "airline staff strike",
            DisruptionReason::CrewShortage => "crew shortage",
            DisruptionReason::Overbooking => "overbooking",
            DisruptionReason::Operational => "operational issue",
            DisruptionReason::Other => "other",
        }
    }
}

impl std::fmt::Display for DisruptionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DisruptionReason {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "weather" => Ok(DisruptionReason::Weather),
            "security" => Ok(DisruptionReason::Security),
            "political" => Ok(DisruptionReason::Political),
            "external_strike" => Ok(DisruptionReason::ExternalStrike),
            "air_traffic_control" | "atc" => Ok(DisruptionReason::AirTrafficControl),
            "medical_emergency" => Ok(DisruptionReason::MedicalEmergency),
            "bird_strike" => Ok(DisruptionReason::BirdStrike),
            "technical" => Ok(DisruptionReason::Technical),
            "airline_strike" => Ok(DisruptionReason::AirlineStrike),
            "crew_shortage" => Ok(DisruptionReason::CrewShortage),
            "overbooking" => Ok(DisruptionReason::Overbooking),
            "operational" => Ok(DisruptionReason::Operational),
            "other" => Ok(DisruptionReason::Other),
            other => Err(format!("unknown disruption reason: {}", other)),
        }
    }
}

impl TryFrom<String> for DisruptionReason {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// A disruption with the fields its type requires
#[derive(Debug, Clone, PartialEq)]
pub enum DisruptionDetails {
    Delay {
        hours: f64,
        reason: Option<DisruptionReason>,
    },
    Cancellation {
        /// Hours between notification and scheduled departure; `None` when no notice was given
        notice_hours: Option<f64>,
        reason: Option<DisruptionReason>,
    },
    DeniedBoarding {
        reason: Option<DisruptionReason>,
    },
    /// A disruption type the rules do not recognise
    Other {
        kind: String,
        reason: Option<DisruptionReason>,
    },
}

impl DisruptionDetails {
    pub fn delay(hours: f64) -> Self {
        DisruptionDetails::Delay { hours, reason: None }
    }

    pub fn cancellation(notice_hours: Option<f64>) -> Self {
        DisruptionDetails::Cancellation { notice_hours, reason: None }
    }

    pub fn denied_boarding() -> Self {
        DisruptionDetails::DeniedBoarding { reason: None }
    }

    pub fn with_reason(mut self, new_reason: DisruptionReason) -> Self {
        match &mut self {
            DisruptionDetails::Delay { reason, .. }
            | DisruptionDetails::Cancellation { reason, .. }
            | DisruptionDetails::DeniedBoarding { reason }
            | DisruptionDetails::Other { reason, .. } => *reason = Some(new_reason),
        }
        self
    }

    pub fn reason(&self) -> Option<DisruptionReason> {
        match self {
            DisruptionDetails::Delay { reason, .. }
            | DisruptionDetails::Cancellation { reason, .. }
            | DisruptionDetails::DeniedBoarding { reason }
            | DisruptionDetails::Other { reason, .. } => *reason,
        }
    }

    /// Wire name of the disruption type
    pub fn kind(&self) -> &str {
        match self {
            DisruptionDetails::Delay { .. } => "delay",
            DisruptionDetails::Cancellation { .. } => "cancellation",
            DisruptionDetails::DeniedBoarding { .. } => "denied_boarding",
            DisruptionDetails::Other { kind, .. } => kind.as_str(),
        }
    }
}

/// Disruption as received from callers, every field optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDisruption {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub delay_duration: Option<f64>,
    #[serde(default)]
    pub notice_given: Option<f64>,
    #[serde(default)]
    pub reason: Option<DisruptionReason>,
}

fn check_hours(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(ClaimError::InvalidDisruptionData(format!(
            "{} must be a non-negative number of hours, got {}",
            field, value
        )));
    }
    Ok(value)
}

impl TryFrom<&RawDisruption> for DisruptionDetails {
    type Error = ClaimError;

    fn try_from(raw: &RawDisruption) -> Result<Self> {
        let kind = raw
            .kind
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| ClaimError::InvalidInput("disruption type is required".to_string()))?;

        let reason = raw.reason;
        let details = match kind.as_str() {
            "delay" => {
                let hours = raw.delay_duration.ok_or_else(|| {
                    ClaimError::InvalidDisruptionData(
                        "delayDuration is required for delay disruptions".to_string(),
                    )
                })?;
                DisruptionDetails::Delay {
                    hours: check_hours("delayDuration", hours)?,
                    reason,
                }
            }
            "cancellation" => DisruptionDetails::Cancellation {
                notice_hours: raw
                    .notice_given
                    .map(|n| check_hours("noticeGiven", n))
                    .transpose()?,
                reason,
            },
            "denied_boarding" => DisruptionDetails::DeniedBoarding { reason },
            _ => DisruptionDetails::Other { kind, reason },
        };

        Ok(details)
    }
}

impl TryFrom<RawDisruption> for DisruptionDetails {
    type Error = ClaimError;

    fn try_from(raw: RawDisruption) -> Result<Self> {
        DisruptionDetails::try_from(&raw)
    }
}

impl From<&DisruptionDetails> for RawDisruption {
    fn from(details: &DisruptionDetails) -> Self {
        let mut raw = RawDisruption {
            kind: Some(details.kind().to_string()),
            reason: details.reason(),
            ..Default::default()
        };
        match details {
            DisruptionDetails::Delay { hours, .. } => raw.delay_duration = Some(*hours),
            DisruptionDetails::Cancellation { notice_hours, .. } => raw.notice_given = *notice_hours,
            DisruptionDetails::DeniedBoarding { .. } | DisruptionDetails::Other { .. } => {}
        }
        raw
    }
}
