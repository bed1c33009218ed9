mod cli;

use std::path::Path;
use chrono::NaiveDate;
use clap::Parser;
use cli::{ClaimArgs, Cli, Commands};
use colored::*;
use flight_compensation::{
    eligibility::{self, ClaimRequest},
    error::{self, ClaimError},
    flight::{Assessment, ClaimAssessor, JsonFlightSource},
    storage::{self, AssessmentRecord},
    utils, Config,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Library and binary progress at info, everything else at warn
const DEFAULT_LOG_FILTER: &str = "flight_compensation=info,flightclaim=info,warn";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Check { claim, format, save } => check_claim(&config, &claim, &format, save),

        Commands::Validate { claim } => validate_claim(&claim),

        Commands::Distance { lat1, lon1, lat2, lon2 } => {
            let distance = flight_compensation::calculate_distance(lat1, lon1, lat2, lon2);
            println!("{} ({:.3} km)", utils::format_km(distance).cyan(), distance);
            Ok(())
        }

        Commands::Batch { file, verbose, format } => {
            info!("Evaluating claims from {}", file);
            run_batch(&file, verbose, &format)
        }

        Commands::Assess { flight_number, date, denied_boarding, format, save } => {
            info!("Assessing flight {} on {}", flight_number, date);
            assess_flight(&config, &flight_number, &date, denied_boarding, &format, save)
        }

        Commands::History { limit } => show_history(&config, limit),

        Commands::Stats { format } => show_stats(&config, &format),

        Commands::Init => initialize(&config),
    };

    if let Err(e) = result {
        error!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn check_claim(config: &Config, args: &ClaimArgs, format: &str, save: bool) -> error::Result<()> {
    let request = ClaimRequest {
        id: None,
        route: args.route(),
        disruption: args.disruption(),
        distance_km: args.distance,
    };

    let result = eligibility::evaluate_claim(&request)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", "=== Eligibility Decision ===".cyan().bold());
        println!(
            "Route:        {} -> {} (carrier {})",
            request.route.departure_country, request.route.arrival_country, request.route.airline_country
        );
        println!("Distance:     {}", utils::format_km(request.distance_km));
        utils::print_result(&result);
    }

    if save || config.assessment.save_results {
        let db = storage::Database::new(&config.database.path)?;
        let kind = request.disruption.kind.as_deref().unwrap_or("unknown");
        let id = db.save_assessment(&AssessmentRecord::from_check(
            &request.route,
            kind,
            request.distance_km,
            &result,
        ))?;
        info!("Decision saved as assessment #{}", id);
    }

    Ok(())
}

fn validate_claim(args: &ClaimArgs) -> error::Result<()> {
    let validation = flight_compensation::validate_claim(&args.route(), &args.disruption(), args.distance);

    if validation.is_valid {
        println!("{}", "✓ Claim is structurally valid".green());
        return Ok(());
    }

    println!("{}", "Claim has problems:".yellow());
    for problem in &validation.errors {
        println!("  ✗ {}", problem);
    }
    Err(ClaimError::InvalidInput(format!(
        "{} validation error(s)",
        validation.errors.len()
    )))
}

fn run_batch(file: &str, verbose: bool, format: &str) -> error::Result<()> {
    let claims = eligibility::load_claims(Path::new(file))?;
    let summary = eligibility::BatchEvaluator::new().evaluate_loaded(claims);

    if format == "json" {
        let decisions: Vec<_> = summary
            .results
            .iter()
            .map(|(id, result)| match result {
                Ok(decision) => serde_json::json!({ "id": id, "result": decision }),
                Err(e) => serde_json::json!({ "id": id, "error": e.to_string() }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&decisions)?);
        return Ok(());
    }

    if verbose {
        println!("\n{}", "Decisions:".yellow());
        utils::print_table_border(100);
        utils::print_table_row(&["Claim", "Regulation", "Decision", "Amount", "Reason"], &[16, 10, 12, 10, 44]);
        utils::print_table_border(100);

        for (id, result) in &summary.results {
            match result {
                Ok(decision) => utils::print_table_row(
                    &[
                        id.as_str(),
                        decision.regulation.to_string().as_str(),
                        if decision.is_eligible { "Eligible" } else { "Not eligible" },
                        format!("{} {}", decision.amount, decision.currency()).as_str(),
                        decision.reason.as_str(),
                    ],
                    &[16, 10, 12, 10, 44],
                ),
                Err(e) => utils::print_table_row(
                    &[id.as_str(), "-", "Invalid", "-", e.to_string().as_str()],
                    &[16, 10, 12, 10, 44],
                ),
            }
        }
        utils::print_table_border(100);
    }

    summary.print_summary();
    println!("Eligibility Rate: {:.1}%", summary.eligibility_rate());
    Ok(())
}

fn assess_flight(
    config: &Config,
    flight_number: &str,
    date: &str,
    denied_boarding: bool,
    format: &str,
    save: bool,
) -> error::Result<()> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| ClaimError::InvalidInput(format!("Invalid date {}: {}", date, e)))?;

    let source = JsonFlightSource::from_file(Path::new(&config.flights.data_path))?;
    let assessment: Assessment = ClaimAssessor::new(source).assess(flight_number, date, denied_boarding)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        println!("{}", format!("=== {} on {} ===", assessment.flight_number, assessment.date).cyan().bold());
        println!(
            "Route:        {} -> {} (carrier {})",
            assessment.route.departure_country,
            assessment.route.arrival_country,
            assessment.route.airline_country
        );
        println!("Distance:     {}", utils::format_km(assessment.distance_km));
        println!("Disruption:   {}", assessment.disruption_type);
        utils::print_result(&assessment.result);
    }

    if save || config.assessment.save_results {
        let db = storage::Database::new(&config.database.path)?;
        let id = db.save_assessment(&AssessmentRecord::from(&assessment))?;
        info!("Assessment saved as #{}", id);
    }

    Ok(())
}

fn show_history(config: &Config, limit: usize) -> error::Result<()> {
    let db = storage::Database::new(&config.database.path)?;
    let history = db.get_history(Some(limit))?;

    if history.is_empty() {
        println!("{}", "No saved assessments".yellow());
        return Ok(());
    }

    println!("{}", "Recent Assessments:".yellow());
    utils::print_table_border(110);
    utils::print_table_row(
        &["Assessed", "Flight", "Route", "Type", "Decision", "Amount"],
        &[24, 10, 20, 16, 12, 10],
    );
    utils::print_table_border(110);

    for record in history {
        utils::print_table_row(
            &[
                utils::format_timestamp(&record.assessed_at).as_str(),
                record.flight_number.as_deref().unwrap_or("-"),
                format!("{}->{}/{}", record.departure_country, record.arrival_country, record.airline_country).as_str(),
                record.disruption_type.as_str(),
                if record.is_eligible { "Eligible" } else { "Not eligible" },
                format!("{} {}", record.amount, record.currency()).as_str(),
            ],
            &[24, 10, 20, 16, 12, 10],
        );
    }
    utils::print_table_border(110);

    Ok(())
}

fn show_stats(config: &Config, format: &str) -> error::Result<()> {
    let db = storage::Database::new(&config.database.path)?;
    let stats = db.get_stats()?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "=== Compensation Statistics ===".cyan().bold());
    println!("\nAssessments:");
    println!("  Total:        {}", stats.total_assessments);
    println!("  Eligible:     {}", stats.eligible.to_string().green());
    println!("  Not eligible: {}", stats.ineligible.to_string().red());
    println!("\nCompensation Owed:");
    println!("  EU261:        {}", utils::format_amount(stats.total_eur, "EUR"));
    println!("  UK261:        {}", utils::format_amount(stats.total_gbp, "GBP"));

    Ok(())
}

fn initialize(config: &Config) -> error::Result<()> {
    println!("{}", "Initializing flight compensation checker...".green());
    let _db = storage::Database::new(&config.database.path)?;
    println!("{}", "✓ Database initialized".green());
    println!("{}", "✓ Configuration loaded".green());
    println!("\n{}", "Configuration:".cyan());
    println!("  Database:       {}", config.database.path);
    println!("  Flight data:    {}", config.flights.data_path);
    println!("  Save results:   {}", config.assessment.save_results);

    println!("\n{}", "Ready to use! Try running:".cyan());
    println!(
        "  {} to check a claim",
        "flightclaim check --departure FRA --arrival USA --airline FRA --distance 2000 --type delay --delay-hours 4".yellow()
    );
    println!("  {} to assess a known flight", "flightclaim assess AF6 2024-06-01".yellow());
    println!("  {} to view statistics", "flightclaim stats".yellow());
    Ok(())
}
