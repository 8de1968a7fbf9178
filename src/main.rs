use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod equation;
mod error;
mod results;
mod search;

use error::SearchResult;
use results::ResultLog;
use search::{
    ParallelConfig, ResultSink, RoundStatistics, RunStatistics, SearchParams, SearchRunner,
    TermPool,
};

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "eqfind")]
#[command(about = "eqfind - randomized search for equations that hit a target value")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for equations, evaluated strictly left to right, that equal a target
    Search(SearchArgs),
}

#[derive(ClapArgs)]
struct SearchArgs {
    /// Value the equation must evaluate to
    #[arg(long, default_value = "27", allow_hyphen_values = true)]
    target: Decimal,
    /// Number of terms in every equation
    #[arg(long, default_value = "9")]
    operations: usize,

    // --- Term pool (pick one) ---
    /// Use every term from N down to 1
    #[arg(long, default_value = "9", conflicts_with_all = ["term", "terms"])]
    max_term: i64,
    /// Use a single term
    #[arg(long, allow_hyphen_values = true, conflicts_with = "terms")]
    term: Option<i64>,
    /// Use an explicit, comma separated list of terms
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    terms: Option<Vec<i64>>,

    /// Operator symbols to draw from (any of + - * /)
    #[arg(long, default_value = "+-*", allow_hyphen_values = true)]
    operators: String,

    // --- Run shape ---
    /// Seconds each worker may search per round
    #[arg(long, default_value = "6")]
    ttl: u64,
    /// Number of worker threads per round (default: number of CPUs)
    #[arg(long, short = 'j')]
    threads: Option<usize>,
    /// Number of rounds to run
    #[arg(long, default_value = "1")]
    rounds: usize,
    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    // --- Result file ---
    /// Previously found solutions to start from
    #[arg(long)]
    input: Option<PathBuf>,
    /// Where to save all accumulated solutions after the run
    #[arg(long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

impl SearchArgs {
    fn term_pool(&self) -> SearchResult<Vec<i64>> {
        if let Some(terms) = &self.terms {
            Ok(terms.clone())
        } else if let Some(term) = self.term {
            Ok(TermPool::single(term))
        } else {
            TermPool::descending(self.max_term)
        }
    }
}

// --- Output ---

/// Streams new solutions to stdout and progress to stderr.
struct ConsoleSink {
    log: ResultLog,
    new_solutions: usize,
    total_generated: u64,
}

impl ResultSink for ConsoleSink {
    fn on_solution(&mut self, text: &str) {
        if self.log.record(text) {
            self.new_solutions += 1;
            println!("{}", text);
        }
    }

    fn on_round_expired(&mut self, round: usize, worker_id: usize) {
        eprintln!(
            "Round {} worker {}: time to live expired without a solution",
            round + 1,
            worker_id
        );
    }

    fn on_round_completed(&mut self, stats: &RoundStatistics) {
        self.total_generated += stats.generated;
        eprintln!("Equations generated this round: {}", stats.generated);
        eprintln!("Equations generated total: {}", self.total_generated);
    }
}

fn print_run_statistics(stats: &RunStatistics, new_solutions: usize) {
    eprintln!("\nSearch Statistics:");
    for line in stats.format_summary().lines() {
        eprintln!("  {}", line);
    }
    eprintln!("  New distinct solutions: {}", new_solutions);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn run_search(args: SearchArgs) -> Result<()> {
    // Validate everything before any worker starts
    let params = SearchParams::new(
        args.target,
        args.operations,
        args.term_pool()?,
        &args.operators,
    )?;

    let config = ParallelConfig::default()
        .with_threads(args.threads.unwrap_or_else(num_cpus::get))
        .with_rounds(args.rounds)
        .with_time_to_live(Duration::from_secs(args.ttl))
        .with_seed_option(args.seed);

    let mut log = ResultLog::new();
    if let Some(input) = &args.input {
        log.load(input)
            .with_context(|| format!("Failed to read results from {}", input.display()))?;
    }

    let runner = SearchRunner::new();
    let handle = runner.start_run(params, config)?;

    let mut sink = ConsoleSink {
        log,
        new_solutions: 0,
        total_generated: 0,
    };
    let stats = handle.deliver_to(&mut sink);
    print_run_statistics(&stats, sink.new_solutions);

    if let Some(output) = &args.output {
        sink.log
            .save(output)
            .with_context(|| format!("Failed to write results to {}", output.display()))?;
        eprintln!(
            "Saved {} solutions to {}",
            sink.log.len(),
            output.display()
        );
    }

    Ok(())
}

// --- Main Function ---
fn main() {
    let args = Args::parse();

    match args.command {
        Commands::Search(search_args) => {
            init_logging(search_args.verbose);
            if let Err(e) = run_search(search_args) {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}
