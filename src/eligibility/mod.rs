pub mod batch;
pub mod checker;
pub mod disruption;
pub mod jurisdiction;
pub mod validation;

pub use batch::{evaluate_claim, load_claims, BatchEvaluator, BatchSummary, ClaimRequest, LoadedClaim};
pub use checker::{compensation_amount, CompensationResult, DistanceTier, EligibilityChecker, Qualification};
pub use disruption::{DisruptionDetails, DisruptionReason, RawDisruption};
pub use jurisdiction::{is_eu_flight, is_uk_flight, Jurisdiction, Regulation, Route};
pub use validation::{validate_claim, ClaimValidation};
