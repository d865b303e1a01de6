//! Rehabilitation System CLI
//!
//! Command-line interface for evaluating repayment plans

use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};

use rehabilitation_system::{
    case::load_cases,
    household::LoadedLivingCosts,
    BatchRunner, CalculationResult, EligibilityConfig, EligibilityPolicy, LivingCostTable,
    MonetarySnapshot,
};

/// Individual rehabilitation repayment estimator
#[derive(Parser)]
#[command(name = "rehab", version, about = "Estimate debt reduction under a rehabilitation repayment plan")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with statutory parameters (defaults apply to missing fields)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Living cost table year (defaults to the current year)
    #[arg(long, global = true)]
    year: Option<i32>,

    /// CSV file with year-keyed living cost tables
    #[arg(long, global = true)]
    living_costs: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single debtor
    Evaluate {
        /// Total unsecured debt
        #[arg(long)]
        total_debt: f64,
        /// Monthly income
        #[arg(long)]
        monthly_income: f64,
        /// Forced-liquidation value of assets
        #[arg(long, default_value_t = 0.0)]
        liquidation_value: f64,
        /// Household size, fractional values allowed
        #[arg(long, default_value_t = 1.0)]
        dependents: f64,
    },
    /// Evaluate every case in a CSV file
    Batch {
        /// Input CSV (CaseId,TotalDebt,MonthlyIncome,LiquidationValue,DependentCount)
        input: PathBuf,
        /// Output CSV (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Present value of a monthly payment for every allowed plan length
    Schedule {
        /// Monthly plan payment
        monthly_payment: f64,
    },
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    match cli.command {
        Commands::Evaluate {
            total_debt,
            monthly_income,
            liquidation_value,
            dependents,
        } => {
            let snapshot =
                MonetarySnapshot::validated(total_debt, monthly_income, liquidation_value, dependents)?;
            let policy = EligibilityPolicy::new(config);
            let result = policy.evaluate(&snapshot);

            match cli.output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Text => print_result(&policy, &snapshot, &result),
            }
        }
        Commands::Batch { input, out } => {
            let cases = load_cases(&input)
                .with_context(|| format!("Failed to load cases from {}", input.display()))?;
            let results = BatchRunner::new(config).run(&cases);
            let summary = BatchRunner::summarize(&results);

            match out {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    BatchRunner::write_csv(&results, file)?;
                    log::info!("Results written to {}", path.display());
                }
                None => match cli.output {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
                    OutputFormat::Text => BatchRunner::write_csv(&results, io::stdout())?,
                },
            }

            eprintln!(
                "{} case(s): {} feasible, {} adjusted, {} infeasible, mean reduction {:.2}%",
                summary.total_cases,
                summary.feasible,
                summary.adjusted,
                summary.infeasible,
                summary.mean_reduction_rate
            );
        }
        Commands::Schedule { monthly_payment } => {
            let policy = EligibilityPolicy::new(config);
            let schedule = policy.engine().schedule(monthly_payment);

            match cli.output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&schedule)?),
                OutputFormat::Text => {
                    println!("{:>6} {:>18}", "Months", "Present value");
                    println!("{}", "-".repeat(25));
                    for (months, pv) in schedule {
                        println!("{:>6} {:>18.0}", months, pv);
                    }
                }
            }
        }
    }

    Ok(())
}

/// Assemble the statutory regime from the CLI options
fn build_config(cli: &Cli) -> Result<EligibilityConfig> {
    let mut config = match &cli.config {
        Some(path) => EligibilityConfig::from_json_path(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => EligibilityConfig::default(),
    };

    let year = cli.year.unwrap_or_else(|| chrono::Local::now().year());
    if let Some(path) = &cli.living_costs {
        config.living_cost = LoadedLivingCosts::load_from(path)
            .with_context(|| format!("Failed to load living costs from {}", path.display()))?
            .table(year)?;
    } else if cli.year.is_some() {
        config.living_cost = LivingCostTable::for_year(year)?;
    } else if cli.config.is_none() {
        // A config file keeps its own table unless a year is asked for
        config.living_cost = LivingCostTable::for_year_or_latest(year);
    }

    Ok(config)
}

/// Dependent count as entered; fractional counts keep every digit
fn format_dependents(dependents: f64) -> String {
    format!("{}", dependents)
}

fn print_result(policy: &EligibilityPolicy, snapshot: &MonetarySnapshot, result: &CalculationResult) {
    let living_cost = policy.compute_living_cost(snapshot.effective_dependents());

    println!("Rehabilitation estimate ({} living cost table)", policy.config().living_cost.year);
    println!("======================================\n");
    println!("  Total debt:         {:>16.0}", snapshot.total_debt);
    println!("  Monthly income:     {:>16.0}", snapshot.monthly_income);
    println!("  Liquidation value:  {:>16.0}", snapshot.liquidation_value);
    println!("  Dependents:         {:>16}", format_dependents(snapshot.effective_dependents()));
    println!("  Living cost:        {:>16.0}", living_cost);
    println!();

    if result.liquidation_value_violation {
        println!("  No repayment plan of {} months or less covers the liquidation value.", result.repayment_period);
        println!("  Monthly payment as entered: {:.0}", result.monthly_payment);
        return;
    }

    println!("  Monthly payment:    {:>16.0}", result.monthly_payment);
    println!("  Repayment period:   {:>13} mo", result.repayment_period);
    println!("  Repayment amount:   {:>16.0}", result.repayment_amount);
    println!("  Reduction amount:   {:>16.0}", result.reduction_amount);
    println!("  Reduction rate:     {:>15.2}%", result.reduction_rate);

    if let Some(reason) = &result.consultation_reason {
        println!();
        println!("  Not feasible as entered. {}", reason);
    }
}
