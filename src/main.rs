//! Loan Switch CLI
//!
//! Command-line interface for weekly amortization and rate-switch analysis

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;

use loan_switch::analysis::{Analysis, Analyzer};
use loan_switch::config::LoanParams;
use loan_switch::report;
use loan_switch::schedule::{Schedule, ScheduleSummary};

/// Weekly loan amortization and the gain from switching interest rates
#[derive(Parser, Debug)]
#[command(name = "loan-switch", version, about)]
struct Cli {
    /// JSON parameter file, applied before the flags below
    #[arg(long)]
    config: Option<PathBuf>,

    /// Loan start date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Maturity date (YYYY-MM-DD), defaults to 13 months after start
    #[arg(long)]
    maturity: Option<NaiveDate>,

    #[arg(long)]
    principal: Option<f64>,

    /// Current annual interest rate (%)
    #[arg(long)]
    rate: Option<f64>,

    /// Comparison annual interest rate (%)
    #[arg(long)]
    comparison_rate: Option<f64>,

    /// New annual interest rate (%)
    #[arg(long)]
    new_rate: Option<f64>,

    /// Fixed weekly payment
    #[arg(long)]
    payment: Option<f64>,

    /// Zero-based week in which the new rate takes effect
    #[arg(long)]
    switch_period: Option<usize>,

    /// Minimum-charge reference window in months
    #[arg(long)]
    penalty_window_months: Option<u32>,

    /// Print the full analysis as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Write the switched schedule to this CSV file
    #[arg(long)]
    schedule_csv: Option<PathBuf>,

    /// Write the sensitivity series to this CSV file
    #[arg(long)]
    sweep_csv: Option<PathBuf>,

    /// Schedule rows to print
    #[arg(long, default_value_t = 20)]
    rows: usize,

    /// Run the sensitivity sweep in parallel
    #[arg(long)]
    parallel: bool,
}

impl Cli {
    fn params(&self) -> Result<LoanParams> {
        let mut params = match &self.config {
            Some(path) => LoanParams::from_json_file(path)
                .with_context(|| format!("loading parameters from {}", path.display()))?,
            None => LoanParams::default(),
        };

        if let Some(start) = self.start {
            // Keep the default term relative to an overridden start
            if self.config.is_none() && self.maturity.is_none() {
                params = LoanParams::starting(start)?;
            }
            params.start = start;
        }
        if let Some(maturity) = self.maturity {
            params.maturity = maturity;
        }
        if let Some(principal) = self.principal {
            params.principal = principal;
        }
        if let Some(rate) = self.rate {
            params.interest_rate = rate;
        }
        if let Some(rate) = self.comparison_rate {
            params.comparison_rate = rate;
        }
        if let Some(rate) = self.new_rate {
            params.new_rate = rate;
        }
        if let Some(payment) = self.payment {
            params.payment = payment;
        }
        if let Some(period) = self.switch_period {
            params.switch_period = period;
        }
        if let Some(months) = self.penalty_window_months {
            params.penalty_window_months = months;
        }

        Ok(params)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let params = cli.params()?;

    let analysis = Analyzer::new()
        .parallel(cli.parallel)
        .analyze(&params)
        .context("running rate-switch analysis")?;

    if let Some(path) = &cli.schedule_csv {
        report::save_schedule_csv(path, &analysis.switched)
            .with_context(|| format!("writing schedule to {}", path.display()))?;
    }
    if let Some(path) = &cli.sweep_csv {
        report::save_sensitivity_csv(path, &analysis.sensitivity)
            .with_context(|| format!("writing sensitivity series to {}", path.display()))?;
    }

    if cli.json {
        report::write_analysis_json(io::stdout().lock(), &analysis)?;
        println!();
        return Ok(());
    }

    print_analysis(&analysis, cli.rows);

    if let Some(path) = &cli.schedule_csv {
        println!("\nSchedule written to: {}", path.display());
    }
    if let Some(path) = &cli.sweep_csv {
        println!("Sensitivity series written to: {}", path.display());
    }

    Ok(())
}

fn print_analysis(analysis: &Analysis, rows: usize) {
    let params = &analysis.params;

    println!("Loan Switch v{}", env!("CARGO_PKG_VERSION"));
    println!("================\n");

    println!("Start:            {}", params.start);
    println!("Maturity:         {} ({} weeks)", params.maturity, analysis.periods);
    println!("Principal:        ${:.2}", params.principal);
    println!("Payment:          ${:.2}/week", params.payment);
    println!("Current rate:     {}%", params.interest_rate);
    println!("Comparison rate:  {}%", params.comparison_rate);
    println!("New rate:         {}%", params.new_rate);
    println!("Switch in period: {} ({})", params.switch_period, analysis.switch_date);
    println!();

    println!("Total payments:   ${:.2}", analysis.original_summary.total_payments);
    println!();

    println!("Gain:");
    println!("  Benefit (additional paydown): ${:+.2}", analysis.benefit);
    println!(
        "  Cost (penalty):               ${:.2}{}",
        analysis.penalty.amount,
        if analysis.penalty.floor_applies() { " (minimum charge)" } else { "" }
    );
    println!("  Total:                        ${:.2}", analysis.gain);

    if let Some(best) = &analysis.best_switch {
        println!(
            "  Best switch: period {} ({}) gains ${:.2}",
            best.period, best.date, best.gain
        );
    }
    println!();

    print_summary("Original", &analysis.original_summary);
    print_summary("New", &analysis.switched_summary);

    for warning in analysis.original_warning.iter().chain(analysis.switched_warning.iter()) {
        println!("Warning: {}", warning);
    }

    println!("\nNew schedule ({} weeks):", analysis.switched.len());
    print_schedule(&analysis.switched, params.switch_period, rows);
}

fn print_summary(label: &str, summary: &ScheduleSummary) {
    println!("{}:", label);
    println!("  Total interest:        ${:.2}", summary.total_interest);
    println!("  Total principal:       ${:.2}", summary.total_principal);
    println!("  Remaining at maturity: ${:.2}", summary.final_remaining);
}

fn print_schedule(schedule: &Schedule, switch_period: usize, rows: usize) {
    println!(
        "{:>2} {:>10} {:>14} {:>10} {:>6} {:>10} {:>10} {:>14}",
        "", "Date", "Initial", "Payment", "Rate", "Interest", "Principal", "Remaining"
    );
    println!("{}", "-".repeat(84));

    for (i, row) in schedule.iter().enumerate().take(rows) {
        println!(
            "{:>2} {:>10} {:>14.2} {:>10.2} {:>5}% {:>10.2} {:>10.2} {:>14.2}",
            if i == switch_period { "->" } else { "" },
            row.date,
            row.initial,
            row.payment,
            row.rate,
            row.interest_payment,
            row.principal_payment,
            row.remaining,
        );
    }

    if schedule.len() > rows {
        println!("... ({} more weeks)", schedule.len() - rows);
    }
}
