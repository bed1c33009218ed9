use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::{
    error::{ClaimError, Result},
    eligibility::{
        disruption::{
            DisruptionDetails, DisruptionReason, DELAY_THRESHOLD_HOURS, FULL_NOTICE_HOURS,
            SHORT_FLIGHT_NOTICE_HOURS,
        },
        jurisdiction::{is_eu_flight, is_uk_flight, Regulation, Route},
    },
};

/// Upper bound (inclusive) of the short-haul band
pub const SHORT_HAUL_MAX_KM: f64 = 1500.0;

/// Upper bound (inclusive) of the medium-haul band
pub const MEDIUM_HAUL_MAX_KM: f64 = 3500.0;

pub const NOT_COVERED_REASON: &str = "Flight not covered by EU or UK regulations";
pub const NOT_QUALIFIED_REASON: &str = "Disruption does not qualify for compensation";

/// Outcome of a single eligibility check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationResult {
    pub is_eligible: bool,
    /// Whole units of the regulation's currency
    pub amount: u32,
    pub reason: String,
    pub regulation: Regulation,
}

impl CompensationResult {
    fn ineligible(reason: impl Into<String>, regulation: Regulation) -> Self {
        Self {
            is_eligible: false,
            amount: 0,
            reason: reason.into(),
            regulation,
        }
    }

    pub fn currency(&self) -> &'static str {
        self.regulation.currency()
    }
}

/// Distance band that fixes the compensation amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceTier {
    Short,
    Medium,
    Long,
}

impl DistanceTier {
    pub fn from_distance(distance_km: f64) -> Self {
        if distance_km <= SHORT_HAUL_MAX_KM {
            DistanceTier::Short
        } else if distance_km <= MEDIUM_HAUL_MAX_KM {
            DistanceTier::Medium
        } else {
            DistanceTier::Long
        }
    }

    pub fn amount(&self, regulation: Regulation) -> u32 {
        match (regulation, self) {
            (Regulation::Eu261, DistanceTier::Short) => 250,
            (Regulation::Eu261, DistanceTier::Medium) => 400,
            (Regulation::Eu261, DistanceTier::Long) => 600,
            (Regulation::Uk261, DistanceTier::Short) => 220,
            (Regulation::Uk261, DistanceTier::Medium) => 350,
            (Regulation::Uk261, DistanceTier::Long) => 520,
        }
    }
}

pub fn compensation_amount(distance_km: f64, regulation: Regulation) -> u32 {
    DistanceTier::from_distance(distance_km).amount(regulation)
}

/// Why a disruption does or does not open a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualification {
    Qualifies,
    Extraordinary(DisruptionReason),
    DoesNotQualify,
}

/// Stateless EU261/UK261 rules engine
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityChecker;

impl EligibilityChecker {
    pub fn new() -> Self {
        Self
    }

    /// Decide whether a disruption on a route entitles the passenger to compensation
    ///
    /// Uncovered routes are a normal negative result. Errors are reserved for
    /// malformed input: blank route codes, a negative or non-finite distance,
    /// or hour fields that are negative or non-finite.
    pub fn check_eligibility(
        &self,
        route: &Route,
        disruption: &DisruptionDetails,
        distance_km: f64,
    ) -> Result<CompensationResult> {
        let missing = route.missing_fields();
        if !missing.is_empty() {
            return Err(ClaimError::InvalidInput(format!(
                "route is missing {}",
                missing.join(", ")
            )));
        }

        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(ClaimError::InvalidInput(format!(
                "distance must be a non-negative number of kilometers, got {}",
                distance_km
            )));
        }

        Self::check_disruption_hours(disruption)?;

        let regulation = Regulation::for_route(route);

        if !is_eu_flight(route) && !is_uk_flight(route) {
            debug!(
                "Route {} -> {} (carrier {}) not covered",
                route.departure_country, route.arrival_country, route.airline_country
            );
            return Ok(CompensationResult::ineligible(NOT_COVERED_REASON, regulation));
        }

        match self.is_eligible_for_compensation(disruption, distance_km)? {
            Qualification::Qualifies => {}
            Qualification::Extraordinary(reason) => {
                debug!("Disruption excused by extraordinary circumstance: {}", reason);
                return Ok(CompensationResult::ineligible(
                    format!("Disruption caused by extraordinary circumstances ({})", reason.label()),
                    regulation,
                ));
            }
            Qualification::DoesNotQualify => {
                debug!("{} disruption does not qualify", disruption.kind());
                return Ok(CompensationResult::ineligible(NOT_QUALIFIED_REASON, regulation));
            }
        }

        let amount = compensation_amount(distance_km, regulation);
        debug!(
            "Eligible under {}: {} {} for {:.0} km",
            regulation,
            amount,
            regulation.currency(),
            distance_km
        );

        Ok(CompensationResult {
            is_eligible: true,
            amount,
            reason: Self::eligible_reason(disruption),
            regulation,
        })
    }

    /// Apply the per-type rules, ignoring jurisdiction
    pub fn is_eligible_for_compensation(
        &self,
        disruption: &DisruptionDetails,
        distance_km: f64,
    ) -> Result<Qualification> {
        if let Some(reason) = disruption.reason() {
            if reason.is_extraordinary() {
                return Ok(Qualification::Extraordinary(reason));
            }
        }

        let qualifies = match disruption {
            DisruptionDetails::Delay { hours, .. } => {
                Self::check_hours("delay", *hours)?;
                *hours >= DELAY_THRESHOLD_HOURS
            }
            DisruptionDetails::Cancellation { notice_hours, .. } => match notice_hours {
                Some(notice) => {
                    Self::check_hours("notice", *notice)?;
                    let full_notice = *notice >= FULL_NOTICE_HOURS;
                    let short_flight_notice =
                        *notice >= SHORT_FLIGHT_NOTICE_HOURS && distance_km <= SHORT_HAUL_MAX_KM;
                    !(full_notice || short_flight_notice)
                }
                None => true,
            },
            DisruptionDetails::DeniedBoarding { .. } => true,
            DisruptionDetails::Other { .. } => false,
        };

        Ok(if qualifies {
            Qualification::Qualifies
        } else {
            Qualification::DoesNotQualify
        })
    }

    fn check_disruption_hours(disruption: &DisruptionDetails) -> Result<()> {
        match disruption {
            DisruptionDetails::Delay { hours, .. } => Self::check_hours("delay", *hours),
            DisruptionDetails::Cancellation { notice_hours: Some(notice), .. } => {
                Self::check_hours("notice", *notice)
            }
            _ => Ok(()),
        }
    }

    fn check_hours(field: &str, hours: f64) -> Result<()> {
        if hours.is_finite() && hours >= 0.0 {
            Ok(())
        } else {
            Err(ClaimError::InvalidDisruptionData(format!(
                "{} hours must be a non-negative number, got {}",
                field, hours
            )))
        }
    }

    fn eligible_reason(disruption: &DisruptionDetails) -> String {
        match disruption {
            DisruptionDetails::Delay { hours, .. } => {
                format!("Flight delayed by {} hours", format_hours(*hours))
            }
            DisruptionDetails::Cancellation { .. } => {
                "Flight cancelled with insufficient notice".to_string()
            }
            DisruptionDetails::DeniedBoarding { .. } => "Involuntarily denied boarding".to_string(),
            DisruptionDetails::Other { kind, .. } => format!("Disruption ({})", kind),
        }
    }
}

/// Rounded to one decimal place; whole hours print without decimals
fn format_hours(hours: f64) -> String {
    let rounded = (hours * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::disruption::EXTRAORDINARY_CIRCUMSTANCES;

    fn check(route: &Route, disruption: &DisruptionDetails, distance: f64) -> CompensationResult {
        EligibilityChecker::new()
            .check_eligibility(route, disruption, distance)
            .unwrap()
    }

    #[test]
    fn test_scenario_eu_long_delay() {
        let result = check(&Route::new("FRA", "USA", "FRA"), &DisruptionDetails::delay(4.0), 2000.0);
        assert!(result.is_eligible);
        assert_eq!(result.amount, 400);
        assert_eq!(result.regulation, Regulation::Eu261);
        assert_eq!(result.reason, "Flight delayed by 4 hours");
    }

    #[test]
    fn test_scenario_uk_short_delay() {
        let result = check(&Route::new("GBR", "ESP", "GBR"), &DisruptionDetails::delay(2.0), 1200.0);
        assert!(!result.is_eligible);
        assert_eq!(result.amount, 0);
        assert_eq!(result.regulation, Regulation::Uk261);
        assert_eq!(result.reason, NOT_QUALIFIED_REASON);
    }

    #[test]
    fn test_scenario_cancellation_fourteen_days_notice() {
        let route = Route::new("DEU", "FRA", "DEU");
        let result = check(&route, &DisruptionDetails::cancellation(Some(336.0)), 480.0);
        assert!(!result.is_eligible);
        assert_eq!(result.amount, 0);

        // Also defeats long-haul claims
        let result = check(&route, &DisruptionDetails::cancellation(Some(336.0)), 5000.0);
        assert!(!result.is_eligible);
    }

    #[test]
    fn test_scenario_short_flight_week_notice() {
        let route = Route::new("DEU", "FRA", "DEU");
        let result = check(&route, &DisruptionDetails::cancellation(Some(200.0)), 1000.0);
        assert!(!result.is_eligible);

        // Same notice on a longer flight still qualifies
        let result = check(&route, &DisruptionDetails::cancellation(Some(200.0)), 1600.0);
        assert!(result.is_eligible);
        assert_eq!(result.amount, 400);
        assert_eq!(result.reason, "Flight cancelled with insufficient notice");
    }

    #[test]
    fn test_cancellation_without_notice_qualifies() {
        let route = Route::new("DEU", "FRA", "DEU");
        let result = check(&route, &DisruptionDetails::cancellation(None), 480.0);
        assert!(result.is_eligible);
        assert_eq!(result.amount, 250);

        let result = check(&route, &DisruptionDetails::cancellation(Some(167.9)), 480.0);
        assert!(result.is_eligible);
    }

    #[test]
    fn test_scenario_uncovered_route() {
        let route = Route::new("USA", "USA", "USA");
        for disruption in [
            DisruptionDetails::delay(10.0),
            DisruptionDetails::cancellation(None),
            DisruptionDetails::denied_boarding(),
        ] {
            let result = check(&route, &disruption, 4000.0);
            assert!(!result.is_eligible);
            assert_eq!(result.amount, 0);
            assert_eq!(result.reason, NOT_COVERED_REASON);
            assert_eq!(result.regulation, Regulation::Eu261);
        }
    }

    #[test]
    fn test_scenario_denied_boarding_long_haul() {
        let result = check(
            &Route::new("NLD", "JPN", "NLD"),
            &DisruptionDetails::denied_boarding(),
            5000.0,
        );
        assert!(result.is_eligible);
        assert_eq!(result.amount, 600);
        assert_eq!(result.regulation, Regulation::Eu261);
        assert_eq!(result.reason, "Involuntarily denied boarding");
    }

    #[test]
    fn test_uk_amounts() {
        let route = Route::new("GBR", "USA", "GBR");
        let denied = DisruptionDetails::denied_boarding();
        assert_eq!(check(&route, &denied, 900.0).amount, 220);
        assert_eq!(check(&route, &denied, 3000.0).amount, 350);
        assert_eq!(check(&route, &denied, 6000.0).amount, 520);
        assert_eq!(check(&route, &denied, 6000.0).currency(), "GBP");
    }

    #[test]
    fn test_extraordinary_circumstances_always_defeat() {
        let route = Route::new("FRA", "USA", "FRA");
        for reason in EXTRAORDINARY_CIRCUMSTANCES {
            for disruption in [
                DisruptionDetails::delay(12.0),
                DisruptionDetails::cancellation(None),
                DisruptionDetails::denied_boarding(),
            ] {
                for distance in [500.0, 2500.0, 8000.0] {
                    let result = check(&route, &disruption.clone().with_reason(reason), distance);
                    assert!(!result.is_eligible, "{:?} {:?}", reason, disruption);
                    assert_eq!(result.amount, 0);
                    assert!(result.reason.contains("extraordinary circumstances"));
                }
            }
        }
    }

    #[test]
    fn test_airline_caused_reason_still_qualifies() {
        let disruption = DisruptionDetails::delay(5.0).with_reason(DisruptionReason::Technical);
        let result = check(&Route::new("ITA", "ESP", "ITA"), &disruption, 1200.0);
        assert!(result.is_eligible);
        assert_eq!(result.amount, 250);
    }

    #[test]
    fn test_delay_reason_formatting() {
        let route = Route::new("FRA", "USA", "FRA");
        let result = check(&route, &DisruptionDetails::delay(245.0 / 60.0), 6000.0);
        assert_eq!(result.reason, "Flight delayed by 4.1 hours");
        let result = check(&route, &DisruptionDetails::delay(12.0), 6000.0);
        assert_eq!(result.reason, "Flight delayed by 12 hours");
        let result = check(&route, &DisruptionDetails::delay(3.96), 6000.0);
        assert_eq!(result.reason, "Flight delayed by 4 hours");
        let result = check(&route, &DisruptionDetails::delay(3.04), 6000.0);
        assert_eq!(result.reason, "Flight delayed by 3 hours");
    }

    #[test]
    fn test_delay_threshold_is_inclusive() {
        let route = Route::new("FRA", "USA", "FRA");
        assert!(check(&route, &DisruptionDetails::delay(3.0), 1000.0).is_eligible);
        assert!(!check(&route, &DisruptionDetails::delay(2.99), 1000.0).is_eligible);
    }

    #[test]
    fn test_unknown_disruption_type_not_eligible() {
        let disruption = DisruptionDetails::Other {
            kind: "diversion".to_string(),
            reason: None,
        };
        let result = check(&Route::new("FRA", "USA", "FRA"), &disruption, 1000.0);
        assert!(!result.is_eligible);
        assert_eq!(result.reason, NOT_QUALIFIED_REASON);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(DistanceTier::from_distance(1500.0), DistanceTier::Short);
        assert_eq!(DistanceTier::from_distance(1500.0001), DistanceTier::Medium);
        assert_eq!(DistanceTier::from_distance(3500.0), DistanceTier::Medium);
        assert_eq!(DistanceTier::from_distance(3500.0001), DistanceTier::Long);
        assert_eq!(compensation_amount(1500.0, Regulation::Eu261), 250);
        assert_eq!(compensation_amount(1500.0001, Regulation::Eu261), 400);
    }

    #[test]
    fn test_amount_monotonic_in_distance() {
        for regulation in [Regulation::Eu261, Regulation::Uk261] {
            let mut previous = 0;
            let mut distance = 0.0;
            while distance < 10_000.0 {
                let amount = compensation_amount(distance, regulation);
                assert!(amount >= previous, "{} at {} km", regulation, distance);
                previous = amount;
                distance += 37.5;
            }
        }
        // Constant within a band
        assert_eq!(
            compensation_amount(10.0, Regulation::Eu261),
            compensation_amount(1499.0, Regulation::Eu261)
        );
        assert_eq!(
            compensation_amount(3600.0, Regulation::Uk261),
            compensation_amount(15_000.0, Regulation::Uk261)
        );
    }

    #[test]
    fn test_repeat_calls_identical() {
        let route = Route::new("GBR", "FRA", "GBR");
        let disruption = DisruptionDetails::cancellation(Some(100.0));
        let first = check(&route, &disruption, 2200.0);
        let second = check(&route, &disruption, 2200.0);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_concurrent_calls() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                std::thread::spawn(move || {
                    let route = Route::new("ESP", "USA", "ESP");
                    let hours = 2.0 + i as f64;
                    check(&route, &DisruptionDetails::delay(hours), 6000.0)
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.join().unwrap();
            assert_eq!(result.is_eligible, i >= 1);
            assert_eq!(result.amount, if i >= 1 { 600 } else { 0 });
        }
    }

    #[test]
    fn test_invalid_input_is_an_error() {
        let checker = EligibilityChecker::new();
        let delay = DisruptionDetails::delay(4.0);

        assert!(matches!(
            checker.check_eligibility(&Route::new("", "USA", "FRA"), &delay, 1000.0),
            Err(ClaimError::InvalidInput(_))
        ));
        assert!(matches!(
            checker.check_eligibility(&Route::new("FRA", "USA", "FRA"), &delay, f64::NAN),
            Err(ClaimError::InvalidInput(_))
        ));
        assert!(matches!(
            checker.check_eligibility(
                &Route::new("FRA", "USA", "FRA"),
                &DisruptionDetails::delay(f64::NAN),
                1000.0
            ),
            Err(ClaimError::InvalidDisruptionData(_))
        ));
    }

    #[test]
    fn test_bad_hours_rejected_on_uncovered_routes() {
        let checker = EligibilityChecker::new();
        let domestic = Route::new("USA", "USA", "USA");

        assert!(matches!(
            checker.check_eligibility(&domestic, &DisruptionDetails::delay(f64::NAN), 1000.0),
            Err(ClaimError::InvalidDisruptionData(_))
        ));
        assert!(matches!(
            checker.check_eligibility(&domestic, &DisruptionDetails::cancellation(Some(-2.0)), 1000.0),
            Err(ClaimError::InvalidDisruptionData(_))
        ));
        assert!(!check(&domestic, &DisruptionDetails::delay(5.0), 1000.0).is_eligible);
    }

    #[test]
    fn test_regulation_matches_route_label() {
        for route in [
            Route::new("GBR", "FRA", "GBR"),
            Route::new("FRA", "GBR", "FRA"),
            Route::new("USA", "USA", "USA"),
        ] {
            let result = check(&route, &DisruptionDetails::denied_boarding(), 1000.0);
            assert_eq!(result.regulation, Regulation::for_route(&route));
        }
    }

    #[test]
    fn test_result_wire_format() {
        let result = check(&Route::new("FRA", "USA", "FRA"), &DisruptionDetails::delay(4.0), 2000.0);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isEligible"], true);
        assert_eq!(json["amount"], 400);
        assert_eq!(json["regulation"], "EU261");
    }
}
