//! Evaluate every case in data/sample_cases.csv (or a given file)
//!
//! Usage: cargo run --bin run_batch [input.csv] [output.csv]

use std::fs::File;
use std::time::Instant;

use anyhow::{Context, Result};
use rehabilitation_system::{case::load_cases, BatchRunner};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args.next().unwrap_or_else(|| "data/sample_cases.csv".to_string());
    let output = args.next().unwrap_or_else(|| "batch_output.csv".to_string());

    let start = Instant::now();
    println!("Loading cases from {}...", input);
    let cases = load_cases(&input).with_context(|| format!("Failed to load {}", input))?;
    println!("Loaded {} cases in {:?}", cases.len(), start.elapsed());

    let eval_start = Instant::now();
    let runner = BatchRunner::default();
    let results = runner.run(&cases);
    println!("Evaluations complete in {:?}", eval_start.elapsed());

    let file = File::create(&output).with_context(|| format!("Failed to create {}", output))?;
    BatchRunner::write_csv(&results, file)?;
    println!("Output written to {}", output);

    let summary = BatchRunner::summarize(&results);
    println!("\nBatch Summary:");
    println!("  Cases:       {}", summary.total_cases);
    println!("  Feasible:    {}", summary.feasible);
    println!("  Adjusted:    {}", summary.adjusted);
    println!("  Infeasible:  {}", summary.infeasible);
    println!("  Mean reduction rate: {:.2}%", summary.mean_reduction_rate);

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
