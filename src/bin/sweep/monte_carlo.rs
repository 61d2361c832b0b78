// Repeated Trials — N runs per ring size with statistical aggregation
// Trial i runs with seed base_seed + i

use ring_balance::*;

use crate::report::*;

/// Run a single trial, optionally printing the ring before and after.
pub fn run_single(config: &SimConfig, verbose: bool) -> Result<RunResult, SimError> {
    let mut sim = Simulation::new(config)?;

    if verbose {
        println!("System configuration before load balancing:");
        print_loads(&sim.snapshot());
        println!("\nMax balanced load difference = {}", sim.tolerances().balanced_load);
    }

    let result = sim.run();

    if verbose {
        println!("\nSystem configuration after load balancing:");
        print_loads(&sim.snapshot());
        println!();
    }

    Ok(result)
}

/// Run `n_runs` independent trials of one ring size and aggregate them.
pub fn run_trials(
    base: &SimConfig,
    nodes: usize,
    n_runs: usize,
    base_seed: u64,
    verbose: bool,
) -> Result<SizeReport, SimError> {
    let mut results = Vec::with_capacity(n_runs);
    for i in 0..n_runs {
        let config = base
            .clone()
            .with_nodes(nodes)
            .with_seed(base_seed.wrapping_add(i as u64));
        results.push(run_single(&config, verbose)?);
    }
    Ok(aggregate(nodes, results))
}

/// Aggregate individual runs into a SizeReport.
fn aggregate(nodes: usize, results: Vec<RunResult>) -> SizeReport {
    let n = results.len();
    let converged = results.iter().filter(|r| r.converged()).count();
    let converged_rate = if n > 0 { converged as f64 / n as f64 } else { 0.0 };

    let int_mean = |f: fn(&RunResult) -> u64| -> u64 {
        if n == 0 {
            return 0;
        }
        results.iter().map(|r| f(r) as u128).sum::<u128>() as u64 / n as u64
    };
    let averages = IntegerAverages {
        elapsed_time: int_mean(|r| r.elapsed_time),
        iterations: int_mean(|r| r.iterations),
        total_load: int_mean(|r| r.initial_total_load),
        balanced_load: int_mean(|r| r.balanced_load),
        unbalanced_nodes: int_mean(|r| r.unbalanced_nodes as u64),
        unbalanced_load: int_mean(|r| r.unbalanced_load),
    };

    let stats = |f: fn(&RunResult) -> u64| {
        Stats::from_counts(&results.iter().map(f).collect::<Vec<_>>())
    };
    let elapsed_time = stats(|r| r.elapsed_time);
    let iterations = stats(|r| r.iterations);
    let unbalanced_nodes = stats(|r| r.unbalanced_nodes as u64);
    let unbalanced_load = stats(|r| r.unbalanced_load);

    SizeReport {
        nodes,
        n_runs: n,
        converged_rate,
        averages,
        elapsed_time,
        iterations,
        unbalanced_nodes,
        unbalanced_load,
        individual_runs: results,
    }
}

fn print_loads(snapshot: &[NodeSnapshot]) {
    for node in snapshot {
        println!("{}", node.load);
    }
}
