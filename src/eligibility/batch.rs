use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use crate::{
    error::{ClaimError, Result},
    eligibility::{
        checker::{CompensationResult, EligibilityChecker},
        disruption::{DisruptionDetails, RawDisruption},
        jurisdiction::{Regulation, Route},
        validation::validate_claim,
    },
};

/// One claim as submitted by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub route: Route,
    #[serde(default)]
    pub disruption: RawDisruption,
    pub distance_km: f64,
}

/// A claim read from a file, or the reason it could not be decoded
#[derive(Debug)]
pub struct LoadedClaim {
    pub id: Option<String>,
    pub request: Result<ClaimRequest>,
}

impl LoadedClaim {
    fn decode<E: std::fmt::Display>(
        id: Option<String>,
        decoded: std::result::Result<ClaimRequest, E>,
    ) -> Self {
        Self {
            id,
            request: decoded.map_err(|e| ClaimError::InvalidInput(format!("malformed claim: {}", e))),
        }
    }
}

impl From<ClaimRequest> for LoadedClaim {
    fn from(request: ClaimRequest) -> Self {
        Self {
            id: request.id.clone(),
            request: Ok(request),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ClaimFile {
    claims: Vec<toml::Value>,
}

/// Validate a claim, then run it through the rules engine
pub fn evaluate_claim(claim: &ClaimRequest) -> Result<CompensationResult> {
    let validation = validate_claim(&claim.route, &claim.disruption, claim.distance_km);
    if !validation.is_valid {
        return Err(ClaimError::InvalidInput(validation.errors.join("; ")));
    }

    let disruption = DisruptionDetails::try_from(&claim.disruption)?;
    EligibilityChecker::new().check_eligibility(&claim.route, &disruption, claim.distance_km)
}

/// Read claims from a JSON array or a TOML file of `[[claims]]` tables
///
/// Only an unreadable file or a malformed container fails the whole load.
/// Each claim is decoded on its own.
pub fn load_claims(path: &Path) -> Result<Vec<LoadedClaim>> {
    let contents = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    if is_toml {
        let file: ClaimFile = toml::from_str(&contents)?;
        Ok(file
            .claims
            .into_iter()
            .map(|value| {
                let id = value.get("id").and_then(|v| v.as_str()).map(str::to_string);
                LoadedClaim::decode(id, ClaimRequest::deserialize(value))
            })
            .collect())
    } else {
        let values: Vec<serde_json::Value> = serde_json::from_str(&contents)?;
        Ok(values
            .into_iter()
            .map(|value| {
                let id = value.get("id").and_then(|v| v.as_str()).map(str::to_string);
                LoadedClaim::decode(id, ClaimRequest::deserialize(value))
            })
            .collect())
    }
}

/// Evaluates many claims and tallies the outcome
#[derive(Debug, Default)]
pub struct BatchEvaluator;

impl BatchEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate_all(&self, claims: &[ClaimRequest]) -> BatchSummary {
        self.evaluate_loaded(claims.iter().cloned().map(LoadedClaim::from).collect())
    }

    /// Claims that failed to decode count as invalid
    pub fn evaluate_loaded(&self, claims: Vec<LoadedClaim>) -> BatchSummary {
        info!("Evaluating {} claims", claims.len());

        let mut summary = BatchSummary {
            total_claims: claims.len(),
            ..Default::default()
        };

        for (index, claim) in claims.into_iter().enumerate() {
            let id = claim.id.unwrap_or_else(|| format!("claim-{}", index + 1));

            let result = claim.request.and_then(|request| evaluate_claim(&request));
            match &result {
                Ok(decision) if decision.is_eligible => {
                    summary.eligible += 1;
                    match decision.regulation {
                        Regulation::Eu261 => summary.total_eur += u64::from(decision.amount),
                        Regulation::Uk261 => summary.total_gbp += u64::from(decision.amount),
                    }
                }
                Ok(_) => summary.ineligible += 1,
                Err(e) => {
                    summary.invalid += 1;
                    warn!("Claim {} rejected: {}", id, e);
                }
            }
            summary.results.push((id, result));
        }

        info!(
            "Batch complete: {} eligible, {} ineligible, {} invalid",
            summary.eligible, summary.ineligible, summary.invalid
        );

        summary
    }
}

/// Summary of a batch evaluation
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub total_claims: usize,
    pub eligible: usize,
    pub ineligible: usize,
    pub invalid: usize,
    pub total_eur: u64,
    pub total_gbp: u64,
    pub results: Vec<(String, Result<CompensationResult>)>,
}

impl BatchSummary {
    /// Print a formatted summary to console
    pub fn print_summary(&self) {
        println!("\n=== Claim Batch Summary ===");
        println!("Total Claims:    {}", self.total_claims);
        println!("Eligible:        {} ✓", self.eligible);
        println!("Not Eligible:    {}", self.ineligible);
        println!("Invalid:         {} ✗", self.invalid);
        println!("Total (EUR):     {}", self.total_eur);
        println!("Total (GBP):     {}", self.total_gbp);
        println!("===========================");
    }

    /// Share of all claims that were eligible, as a percentage
    pub fn eligibility_rate(&self) -> f64 {
        if self.total_claims == 0 {
            0.0
        } else {
            (self.eligible as f64 / self.total_claims as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn claim(id: &str, route: Route, kind: &str, hours: Option<f64>, distance_km: f64) -> ClaimRequest {
        ClaimRequest {
            id: Some(id.to_string()),
            route,
            disruption: RawDisruption {
                kind: Some(kind.to_string()),
                delay_duration: hours,
                ..Default::default()
            },
            distance_km,
        }
    }

    #[test]
    fn test_evaluate_claim_rejects_invalid() {
        let bad = claim("bad", Route::new("FRA", "USA", "FRA"), "delay", None, 2000.0);
        match evaluate_claim(&bad) {
            Err(ClaimError::InvalidInput(msg)) => assert!(msg.contains("Delay duration is required")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_batch_tallies() {
        let claims = vec![
            claim("a", Route::new("FRA", "USA", "FRA"), "delay", Some(4.0), 2000.0),
            claim("b", Route::new("GBR", "USA", "GBR"), "denied_boarding", None, 5500.0),
            claim("c", Route::new("USA", "USA", "USA"), "delay", Some(9.0), 3000.0),
            claim("d", Route::new("FRA", "USA", "FRA"), "delay", None, 2000.0),
        ];

        let summary = BatchEvaluator::new().evaluate_all(&claims);
        assert_eq!(summary.total_claims, 4);
        assert_eq!(summary.eligible, 2);
        assert_eq!(summary.ineligible, 1);
        assert_eq!(summary.invalid, 1);
        assert_eq!(summary.total_eur, 400);
        assert_eq!(summary.total_gbp, 520);
        assert_eq!(summary.eligibility_rate(), 50.0);
        assert_eq!(summary.results[3].0, "d");
        assert!(summary.results[3].1.is_err());
    }

    #[test]
    fn test_missing_ids_are_numbered() {
        let mut unnamed = claim("x", Route::new("FRA", "USA", "FRA"), "delay", Some(1.0), 100.0);
        unnamed.id = None;
        let summary = BatchEvaluator::new().evaluate_all(&[unnamed]);
        assert_eq!(summary.results[0].0, "claim-1");
    }

    #[test]
    fn test_empty_batch() {
        let summary = BatchEvaluator::new().evaluate_all(&[]);
        assert_eq!(summary.eligibility_rate(), 0.0);
    }

    #[test]
    fn test_load_json_claims() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claims.json");
        std::fs::write(
            &path,
            r#"[{"id":"j1","route":{"departureCountry":"FRA","arrivalCountry":"USA","airlineCountry":"FRA"},
                "disruption":{"type":"delay","delayDuration":4},"distanceKm":2000}]"#,
        )
        .unwrap();

        let claims = load_claims(&path).unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].id.as_deref(), Some("j1"));
        let request = claims[0].request.as_ref().unwrap();
        assert_eq!(evaluate_claim(request).unwrap().amount, 400);
    }

    #[test]
    fn test_one_bad_claim_does_not_reject_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claims.json");
        std::fs::write(
            &path,
            r#"[
                {"id":"ok","route":{"departureCountry":"FRA","arrivalCountry":"USA","airlineCountry":"FRA"},
                 "disruption":{"type":"delay","delayDuration":4,"reason":"ATC"},"distanceKm":2000},
                {"id":"strange-reason","route":{"departureCountry":"FRA","arrivalCountry":"USA","airlineCountry":"FRA"},
                 "disruption":{"type":"delay","delayDuration":4,"reason":"aliens"},"distanceKm":2000},
                {"route":{"departureCountry":"DEU","arrivalCountry":"FRA","airlineCountry":"DEU"},
                 "disruption":{"type":"Denied_Boarding"}},
                {"id":"denied","route":{"departureCountry":"DEU","arrivalCountry":"FRA","airlineCountry":"DEU"},
                 "disruption":{"type":"Denied_Boarding"},"distanceKm":500}
            ]"#,
        )
        .unwrap();

        let claims = load_claims(&path).unwrap();
        assert_eq!(claims.len(), 4);
        assert!(claims[0].request.is_ok());
        assert!(claims[1].request.is_err());
        assert!(claims[2].request.is_err());

        let summary = BatchEvaluator::new().evaluate_loaded(claims);
        assert_eq!(summary.total_claims, 4);
        assert_eq!(summary.eligible, 1);
        assert_eq!(summary.ineligible, 1);
        assert_eq!(summary.invalid, 2);
        assert_eq!(summary.total_eur, 250);

        assert_eq!(summary.results[1].0, "strange-reason");
        match &summary.results[1].1 {
            Err(ClaimError::InvalidInput(msg)) => assert!(msg.contains("malformed claim")),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(summary.results[2].0, "claim-3");
        // ATC is extraordinary, so the first claim is decoded but not eligible
        assert!(!summary.results[0].1.as_ref().unwrap().is_eligible);
    }

    #[test]
    fn test_malformed_file_fails_whole_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claims.json");
        std::fs::write(&path, r#"{"claims": "#).unwrap();
        assert!(matches!(load_claims(&path), Err(ClaimError::JsonError(_))));
    }

    #[test]
    fn test_bundled_claims() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/claims.json");
        let summary = BatchEvaluator::new().evaluate_loaded(load_claims(&path).unwrap());
        assert_eq!(summary.total_claims, 5);
        assert_eq!(summary.eligible, 2);
        assert_eq!(summary.invalid, 0);
        assert_eq!(summary.total_eur, 1000);
    }

    #[test]
    fn test_load_toml_claims() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claims.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"[[claims]]
id = "t1"
distanceKm = 1000.0

[claims.route]
departureCountry = "DEU"
arrivalCountry = "FRA"
airlineCountry = "DEU"

[claims.disruption]
type = "cancellation"
noticeGiven = 200.0
"#
        )
        .unwrap();

        let claims = load_claims(&path).unwrap();
        assert_eq!(claims[0].id.as_deref(), Some("t1"));
        let request = claims[0].request.as_ref().unwrap();
        assert!(!evaluate_claim(request).unwrap().is_eligible);
    }
}
