//! Developer CLI for driving six-vertex model Monte Carlo chains.
//!
//! ```text
//! sixvertex run --n 16 --steps 10000 --initial-state high
//! sixvertex dual --n 16 --steps 10000 --seed-a 111 --seed-b 222
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use sixvertex_core::{Chain, Config, DualDriver, InitialState, Weights};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Six-vertex model Monte Carlo driver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a single chain for a fixed number of steps and print its stats.
    Run(RunArgs),
    /// Run two coupled chains (DWBC High / DWBC Low) and report convergence.
    Dual(DualArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Lattice side length.
    #[arg(long, default_value_t = 16)]
    n: usize,
    /// Total Markov steps to perform.
    #[arg(long, default_value_t = 10_000)]
    steps: u64,
    /// Initial boundary state: "high" or "low".
    #[arg(long, default_value = "high")]
    initial_state: String,
    /// 64-bit PRNG seed.
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Uniform weight applied to every vertex type unless overridden.
    #[arg(long, default_value_t = 1.0)]
    weight: f64,
    /// Emit the final stats as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct DualArgs {
    /// Lattice side length, shared by both chains.
    #[arg(long, default_value_t = 16)]
    n: usize,
    /// Steps per batch passed to `DualDriver::advance`.
    #[arg(long, default_value_t = 1_000)]
    steps: u64,
    /// Number of batches to advance.
    #[arg(long, default_value_t = 50)]
    batches: u32,
    /// Seed for the DWBC High chain.
    #[arg(long, default_value_t = 111)]
    seed_a: u64,
    /// Seed for the DWBC Low chain.
    #[arg(long, default_value_t = 222)]
    seed_b: u64,
    /// Uniform weight applied to every vertex type.
    #[arg(long, default_value_t = 1.0)]
    weight: f64,
    /// Emit the final convergence report as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn parse_initial_state(value: &str) -> Result<InitialState> {
    match value {
        "high" => Ok(InitialState::High),
        "low" => Ok(InitialState::Low),
        other => anyhow::bail!("unknown initial-state '{other}', expected 'high' or 'low'"),
    }
}

fn run(args: &RunArgs) -> Result<()> {
    let cfg = Config {
        n: args.n,
        initial_state: parse_initial_state(&args.initial_state)?,
        weights: Weights([args.weight; 6]),
        seed: args.seed,
        steps_per_batch: 1000,
    };
    cfg.validate().context("invalid configuration")?;

    let mut chain = Chain::new(&cfg);
    chain.run(args.steps).context("chain step failed")?;
    let stats = chain.snapshot_stats();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&StatsReport::from(stats))?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["metric", "value"]);
    table.add_row(vec!["step".to_owned(), stats.step.to_string()]);
    table.add_row(vec!["proposals".to_owned(), stats.proposals.to_string()]);
    table.add_row(vec!["accepts".to_owned(), stats.accepts.to_string()]);
    table.add_row(vec!["acceptance_rate".to_owned(), format!("{:.4}", stats.acceptance_rate)]);
    table.add_row(vec!["height".to_owned(), stats.height.to_string()]);
    table.add_row(vec!["energy".to_owned(), format!("{:.4}", stats.energy)]);
    println!("{table}");
    Ok(())
}

fn dual(args: &DualArgs) -> Result<()> {
    let weights = Weights([args.weight; 6]);
    let mut driver =
        DualDriver::new_high_low(args.n, weights, args.seed_a, args.seed_b, 1000);

    for _ in 0..args.batches {
        driver.advance(args.steps).context("dual driver advance failed")?;
    }
    let convergence = driver.get_convergence();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ConvergenceReport::from(convergence))?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["metric", "value"]);
    table.add_row(vec!["v_a".to_owned(), convergence.v_a.to_string()]);
    table.add_row(vec!["v_b".to_owned(), convergence.v_b.to_string()]);
    table.add_row(vec!["volume_ratio".to_owned(), format!("{:.4}", convergence.volume_ratio)]);
    table.add_row(vec!["smoothed_diff".to_owned(), format!("{:.4}", convergence.smoothed_diff)]);
    table.add_row(vec!["history_length".to_owned(), convergence.history_length.to_string()]);
    table.add_row(vec!["is_converged".to_owned(), convergence.is_converged.to_string()]);
    println!("{table}");
    Ok(())
}

#[derive(serde::Serialize)]
struct StatsReport {
    step: u64,
    proposals: u64,
    accepts: u64,
    acceptance_rate: f64,
    vertex_counts: [u64; 6],
    height: i64,
    energy: f64,
}

impl From<sixvertex_core::ChainStats> for StatsReport {
    fn from(stats: sixvertex_core::ChainStats) -> Self {
        Self {
            step: stats.step,
            proposals: stats.proposals,
            accepts: stats.accepts,
            acceptance_rate: stats.acceptance_rate,
            vertex_counts: stats.vertex_counts,
            height: stats.height,
            energy: stats.energy,
        }
    }
}

#[derive(serde::Serialize)]
struct ConvergenceReport {
    v_a: i64,
    v_b: i64,
    volume_ratio: f64,
    smoothed_diff: f64,
    history_length: usize,
    is_converged: bool,
}

impl From<sixvertex_core::Convergence> for ConvergenceReport {
    fn from(c: sixvertex_core::Convergence) -> Self {
        Self {
            v_a: c.v_a,
            v_b: c.v_b,
            volume_ratio: c.volume_ratio,
            smoothed_diff: c.smoothed_diff,
            history_length: c.history_length,
            is_converged: c.is_converged,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Run(args) => run(args),
        Command::Dual(args) => dual(args),
    }
}
