use serde::Deserialize;
use crate::error::{ClaimError, Result};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub flights: FlightsConfig,
    pub assessment: AssessmentConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FlightsConfig {
    /// JSON file holding resolved flight records
    pub data_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssessmentConfig {
    /// Persist every evaluated claim to the history database
    pub save_results: bool,
}

impl Config {
    /// Load configuration from an optional file, overlaid by `FLIGHTCLAIM__*` env vars
    pub fn load(path: &str) -> Result<Self> {
        dotenv::dotenv().ok();

        let config = config::Config::builder()
            .set_default("database.path", "flightclaim.db")
            .and_then(|b| b.set_default("flights.data_path", "data/flights.json"))
            .and_then(|b| b.set_default("assessment.save_results", false))
            .map_err(|e| ClaimError::Config(e.to_string()))?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("FLIGHTCLAIM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ClaimError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ClaimError::Config(e.to_string()))
    }
}
