// Ring Diffusion Sweep Runner
// Repeated trials per ring size, one CSV summary line per size
//
// Usage:
//   cargo run --release --bin sweep                        # Default size sweep, 5 runs each
//   cargo run --release --bin sweep -- --nodes 100         # Single ring size
//   cargo run --release --bin sweep -- --nodes 10,50 -v    # Print loads before/after each run
//   cargo run --release --bin sweep -- --seed 42 --runs 30
//   cargo run --release --bin sweep -- --config run.json --json out/report.json

mod monte_carlo;
mod report;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use ring_balance::SimConfig;
use tracing::{debug, info};

use report::SweepReport;

/// Ring sizes swept when no `--nodes` is given.
const DEFAULT_SIZES: [usize; 27] = [
    5, 10, 15, 20, 25, 30, 40, 50, 100, 150, 200, 250, 300, 350, 400, 450, 500, 550, 600, 650,
    700, 750, 800, 850, 900, 950, 1000,
];

// ─── CLI Parsing ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "sweep", about = "Diffusion load balancing on a ring: convergence sweep")]
struct Cli {
    /// Ring sizes to simulate (comma separated or repeated).
    #[arg(short = 'k', long, value_delimiter = ',')]
    nodes: Vec<usize>,

    /// Independent trials per ring size.
    #[arg(long, default_value_t = 5)]
    runs: usize,

    /// Base seed; trial i uses seed + i. Defaults to the current time.
    #[arg(long)]
    seed: Option<u64>,

    /// Print every node's load before and after each run.
    #[arg(short, long)]
    verbose: bool,

    /// JSON file with run parameters (missing fields use defaults).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the full statistical report to this path.
    #[arg(long)]
    json: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SimConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            SimConfig::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
        }
        None => Ok(SimConfig::default()),
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.runs == 0 {
        anyhow::bail!("--runs must be at least 1");
    }

    let base = load_config(cli.config.as_ref())?;
    let sizes = if cli.nodes.is_empty() { DEFAULT_SIZES.to_vec() } else { cli.nodes.clone() };
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?;
    let base_seed = cli.seed.unwrap_or(now.as_secs());

    info!(
        sizes = sizes.len(),
        runs = cli.runs,
        base_seed,
        prng = "ChaCha8Rng",
        "starting sweep"
    );

    let mut size_reports = Vec::with_capacity(sizes.len());
    for &nodes in &sizes {
        let report = monte_carlo::run_trials(&base, nodes, cli.runs, base_seed, cli.verbose)
            .with_context(|| format!("ring size {}", nodes))?;
        debug!(nodes, converged_rate = report.converged_rate, "size complete");
        println!("{}", report.csv_line(base.balance_fraction));
        size_reports.push(report);
    }

    // ─── Write JSON Report ──────────────────────────────────────────────

    if let Some(path) = &cli.json {
        let report = SweepReport {
            timestamp: now.as_millis().to_string(),
            version: env!("CARGO_PKG_VERSION"),
            prng: "ChaCha8Rng",
            base_seed,
            n_runs_per_size: cli.runs,
            config: base,
            sizes: size_reports,
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    Ok(())
}
