use clap::{Args, Parser, Subcommand};
use flight_compensation::{DisruptionReason, RawDisruption, Route};

#[derive(Parser)]
#[command(name = "flightclaim")]
#[command(about = "EU261/UK261 flight compensation eligibility checker")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config/default")]
    pub config: String,
}

/// Route, disruption and distance of a single claim
#[derive(Args, Debug, Clone)]
pub struct ClaimArgs {
    /// Departure country (ISO alpha-3 or alpha-2)
    #[arg(long, default_value = "")]
    pub departure: String,

    /// Arrival country
    #[arg(long, default_value = "")]
    pub arrival: String,

    /// Operating airline's home country
    #[arg(long, default_value = "")]
    pub airline: String,

    /// Great-circle distance in kilometers
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub distance: f64,

    /// Disruption type: delay, cancellation or denied_boarding
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Arrival delay in hours
    #[arg(long)]
    pub delay_hours: Option<f64>,

    /// Hours of notice given before scheduled departure
    #[arg(long)]
    pub notice_hours: Option<f64>,

    /// Cause of the disruption (weather, security, technical, ...)
    #[arg(long)]
    pub reason: Option<DisruptionReason>,
}

impl ClaimArgs {
    pub fn route(&self) -> Route {
        Route::new(&self.departure, &self.arrival, &self.airline)
    }

    pub fn disruption(&self) -> RawDisruption {
        RawDisruption {
            kind: self.kind.clone(),
            delay_duration: self.delay_hours,
            notice_given: self.notice_hours,
            reason: self.reason,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a disruption qualifies for compensation
    Check {
        #[command(flatten)]
        claim: ClaimArgs,

        /// Output format: table or json
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Save the decision to the history database
        #[arg(long)]
        save: bool,
    },

    /// Report structural problems in a claim without deciding it
    Validate {
        #[command(flatten)]
        claim: ClaimArgs,
    },

    /// Great-circle distance between two coordinates
    Distance {
        #[arg(long, allow_negative_numbers = true)]
        lat1: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon1: f64,
        #[arg(long, allow_negative_numbers = true)]
        lat2: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon2: f64,
    },

    /// Evaluate every claim in a JSON or TOML file
    Batch {
        /// Claims file
        file: String,

        /// Show every claim's decision
        #[arg(short, long)]
        verbose: bool,

        /// Output format: table or json
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Assess a flight from the configured flight data
    Assess {
        /// Flight number, e.g. BA117
        flight_number: String,

        /// Flight date (YYYY-MM-DD)
        date: String,

        /// Passenger was involuntarily denied boarding
        #[arg(long)]
        denied_boarding: bool,

        /// Output format: table or json
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Save the decision to the history database
        #[arg(long)]
        save: bool,
    },

    /// Show recently saved decisions
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show statistics over saved decisions
    Stats {
        /// Output format: table or json
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Initialize database and show configuration
    Init,
}
