pub mod config;
pub mod eligibility;
pub mod error;
pub mod flight;
pub mod geo;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use eligibility::{
    validate_claim, ClaimValidation, CompensationResult, DisruptionDetails, DisruptionReason,
    EligibilityChecker, RawDisruption, Regulation, Route,
};
pub use error::{ClaimError, Result};

/// Decide eligibility and compensation for one disruption
pub fn check_eligibility(
    route: &Route,
    disruption: &DisruptionDetails,
    distance_km: f64,
) -> Result<CompensationResult> {
    EligibilityChecker::new().check_eligibility(route, disruption, distance_km)
}

/// Great-circle distance in kilometers between two coordinates in decimal degrees
pub fn calculate_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    geo::DistanceCalculator::distance(lat1, lon1, lat2, lon2)
}
