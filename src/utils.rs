use colored::Colorize;
use crate::eligibility::CompensationResult;

/// Format an amount with its currency, colored for the terminal
pub fn format_amount(amount: u64, currency: &str) -> String {
    format!("{} {}", amount, currency).yellow().to_string()
}

/// Format a distance in whole kilometers
pub fn format_km(distance_km: f64) -> String {
    format!("{:.0} km", distance_km)
}

/// Format timestamp in human-readable format
pub fn format_timestamp(timestamp: &chrono::DateTime<chrono::Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// One-word verdict for tables
pub fn format_verdict(is_eligible: bool) -> String {
    if is_eligible {
        "Eligible".green().to_string()
    } else {
        "Not eligible".red().to_string()
    }
}

/// Print a decision as a short report
pub fn print_result(result: &CompensationResult) {
    println!("Regulation:   {}", result.regulation);
    println!("Decision:     {}", format_verdict(result.is_eligible));
    println!(
        "Compensation: {}",
        format_amount(u64::from(result.amount), result.currency())
    );
    println!("Reason:       {}", result.reason);
}

/// Print a formatted table border
pub fn print_table_border(width: usize) {
    println!("{}", "=".repeat(width));
}

/// Print a table row with columns
pub fn print_table_row(columns: &[&str], widths: &[usize]) {
    let mut row = String::new();
    for (i, col) in columns.iter().enumerate() {
        if i < widths.len() {
            row.push_str(&format!("{:<width$}  ", col, width = widths[i]));
        }
    }
    println!("{}", row.trim_end());
}
