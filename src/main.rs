//! Command line front end.
//!
//! ```text
//! alu-frontier solve <FILE> [--json] [--threads N] [--sequential] [--parallel-threshold N]
//! alu-frontier run <FILE> <DIGITS> [--json]
//! alu-frontier stats <FILE> [--search] [--json]
//! ```
//!
//! Logs go to stderr; `RUST_LOG` overrides the `-v` level.

use alu_frontier::analysis::TelemetryReport;
use alu_frontier::search::{FrontierSearch, SearchError, SearchOptions, SearchReport, StepStats};
use alu_frontier::{ComputationError, Engine, Program, ProgramError};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use thiserror::Error;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const EXIT_FAILURE: i32 = 1;
const EXIT_NO_SOLUTION: i32 = 2;

#[derive(Parser)]
#[command(author, version, about = "Find the extreme inputs that zero an ALU program's z register.")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search every input for the smallest and largest one leaving z == 0.
    Solve {
        program: PathBuf,
        #[command(flatten)]
        search: SearchArgs,
        #[arg(long)]
        json: bool,
    },
    /// Run the program on one input and print the final registers.
    Run {
        program: PathBuf,
        digits: String,
        #[arg(long)]
        json: bool,
    },
    /// Print a profile of the program.
    Stats {
        program: PathBuf,
        /// Also run the search and report frontier sizes.
        #[arg(long)]
        search: bool,
        #[command(flatten)]
        search_args: SearchArgs,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Worker threads for the parallel frontier steps.
    #[arg(long)]
    threads: Option<usize>,
    /// Disable parallel frontier steps.
    #[arg(long, conflicts_with = "threads")]
    sequential: bool,
    /// Frontier size at which steps run in parallel.
    #[arg(long)]
    parallel_threshold: Option<usize>,
}

impl SearchArgs {
    fn options(&self) -> SearchOptions {
        let mut options = if self.sequential { SearchOptions::sequential() } else { SearchOptions::default() };
        if let Some(threads) = self.threads {
            options = options.with_threads(threads);
        }
        if let Some(threshold) = self.parallel_threshold {
            options.parallel_threshold = threshold;
        }
        options
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Program(#[from] ProgramError),
    #[error(transparent)]
    Computation(#[from] ComputationError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no input reaches z == 0")]
    NoSolution,
}

#[derive(Serialize)]
struct SolveOutput {
    max: Option<String>,
    min: Option<String>,
    final_frontier: usize,
    peak_frontier: usize,
    elapsed_ms: f64,
    steps: Vec<StepStats>,
}

impl SolveOutput {
    fn from_report(report: SearchReport) -> Self {
        let peak_frontier = report.peak_frontier();
        let (min, max) = match report.solution {
            Some(range) => (Some(range.min), Some(range.max)),
            None => (None, None),
        };
        Self {
            max,
            min,
            final_frontier: report.final_frontier,
            peak_frontier,
            elapsed_ms: report.elapsed_ms,
            steps: report.steps,
        }
    }

    /// `(max, min)`, or [`CliError::NoSolution`] when no input zeroes z.
    fn extremes(&self) -> Result<(&str, &str), CliError> {
        match (&self.max, &self.min) {
            (Some(max), Some(min)) => Ok((max.as_str(), min.as_str())),
            _ => Err(CliError::NoSolution),
        }
    }
}

fn exit_code(error: &CliError) -> i32 {
    match error {
        CliError::NoSolution => EXIT_NO_SOLUTION,
        _ => EXIT_FAILURE,
    }
}

fn solve_program(program: &Program, options: SearchOptions) -> Result<SolveOutput, CliError> {
    let report = FrontierSearch::new(options).run(program)?;
    Ok(SolveOutput::from_report(report))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = match EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level)) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(EXIT_FAILURE);
        }
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(error) = run(cli.command) {
        eprintln!("{error}");
        process::exit(exit_code(&error));
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Solve { program, search, json } => {
            let program = Program::from_path(&program)?;
            let output = solve_program(&program, search.options())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            let (max, min) = output.extremes()?;
            if !json {
                println!("max: {}", max);
                println!("min: {}", min);
            }
        }
        Command::Run { program, digits, json } => {
            let program = Program::from_path(&program)?;
            let state = Engine::execute(&program, &digits)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                println!("{}", state);
            }
        }
        Command::Stats { program, search, search_args, json } => {
            let program = Program::from_path(&program)?;
            let mut report = TelemetryReport::analyze(&program);
            if search {
                let searched = FrontierSearch::new(search_args.options()).run(&program)?;
                report = report.with_search(&searched);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_stats(&report);
            }
        }
    }
    Ok(())
}

fn print_stats(report: &TelemetryReport) {
    println!("instructions: {} ({} reads)", report.total_ops, report.input_len);
    for (op, count) in &report.op_counts {
        println!("  {:<4} {}", op, count);
    }
    let writes: Vec<String> = report.writes.iter().map(|(r, n)| format!("{}={}", r, n)).collect();
    println!("writes: {}", writes.join(" "));
    println!(
        "sources: {} register, {} literal ({} zero divisors, {} clears)",
        report.operands.register_sources,
        report.operands.literal_sources,
        report.operands.zero_divisors,
        report.operands.clears,
    );
    if let Some(frontier) = &report.frontier {
        println!(
            "frontier: peak {} after instruction {}, final {}, {} merges, {:.1} ms",
            frontier.peak_frontier,
            frontier.peak_index + 1,
            frontier.final_frontier,
            frontier.total_merges,
            frontier.elapsed_ms,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(src: &str) -> Program {
        Program::parse(src).unwrap()
    }

    #[test]
    fn test_solve_reports_extremes() {
        let output = solve_program(&program("inp x\ninp y\neql x y"), SearchOptions::sequential()).unwrap();
        assert_eq!(output.extremes().unwrap(), ("99", "11"));
        assert_eq!(output.steps.len(), 3);
    }

    #[test]
    fn test_no_solution_exits_with_dedicated_code() {
        let output = solve_program(&program("inp w\nadd z w\nadd z 1"), SearchOptions::sequential()).unwrap();
        let error = output.extremes().unwrap_err();

        assert!(matches!(error, CliError::NoSolution));
        assert_eq!(error.to_string(), "no input reaches z == 0");
        assert_eq!(exit_code(&error), EXIT_NO_SOLUTION);
    }

    #[test]
    fn test_json_output_carries_steps() {
        let output = solve_program(&program("inp w\nadd z w\nadd z 1"), SearchOptions::sequential()).unwrap();
        let value = serde_json::to_value(&output).unwrap();

        assert!(value["max"].is_null());
        assert!(value["min"].is_null());
        assert_eq!(value["final_frontier"], 9);
        let steps = value["steps"].as_array().unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0]["line"], 1);
        assert_eq!(steps[0]["frontier_after"], 9);
    }

    #[test]
    fn test_other_errors_use_generic_code() {
        let error = CliError::from(ProgramError::UnknownOperation { line: 2, op: "neq".into() });
        assert_eq!(exit_code(&error), EXIT_FAILURE);
    }
}
