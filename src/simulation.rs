// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ring Diffusion Simulation Suite - Simulation Core

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use crate::config::{CheckMode, SimConfig};
use crate::convergence::{self, ConvergenceReport};
use crate::diffusion::{self, DiffusionOutcome};
use crate::error::SimError;
use crate::ring::Ring;
use crate::sampler::{Sampler, UniformRange};
use crate::scheduler;
use crate::tolerance;
use crate::types::*;

// ─── Simulation struct ───────────────────────────────────────────────────────

/// One self-contained simulation run: ring, clock, counters and RNG.
///
/// Nothing is shared between instances, so independent runs can proceed on
/// separate threads while each run stays strictly sequential.
pub struct Simulation<T: Sampler = UniformRange> {
    pub(crate) config: SimConfig,
    pub(crate) ring: Ring,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) timers: T,
    pub(crate) tolerances: Tolerances,

    pub(crate) current_time: u64,
    pub(crate) iterations: u64,
    pub(crate) active: usize,
    pub(crate) state: RunState,

    pub(crate) last_report: ConvergenceReport,
    pub(crate) last_step: Option<DiffusionOutcome>,
}

impl Simulation<UniformRange> {
    /// Build a run that draws loads and intervals uniformly from the
    /// configured ranges.
    pub fn new(config: &SimConfig) -> Result<Self, SimError> {
        let loads = UniformRange::from(config.load_range);
        let timers = UniformRange::from(config.interval_range);
        Self::with_samplers(config, loads, timers)
    }
}

impl<T: Sampler> Simulation<T> {
    /// Build a run with caller-supplied load and interval samplers.
    ///
    /// The configuration is validated before the ring is allocated.
    pub fn with_samplers<L: Sampler>(
        config: &SimConfig,
        mut loads: L,
        mut timers: T,
    ) -> Result<Self, SimError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let ring = Ring::build(config.nodes, &mut loads, &mut timers, &mut rng)?;
        let tolerances = tolerance::compute_tolerances(
            config.tolerance_policy,
            ring.initial_total_load(),
            ring.len(),
            config.balance_fraction,
            config.unsteady_fraction,
        );

        debug!(
            nodes = ring.len(),
            seed = config.seed,
            total_load = ring.initial_total_load(),
            balanced_load = tolerances.balanced_load,
            max_unsteady_nodes = tolerances.max_unsteady_nodes,
            "simulation initialised"
        );

        let active = ring.start();
        Ok(Self {
            config: config.clone(),
            ring,
            rng,
            timers,
            tolerances,
            current_time: 0,
            iterations: 0,
            active,
            state: RunState::Running,
            last_report: ConvergenceReport::default(),
            last_step: None,
        })
    }

    /// Replace the derived tolerances, bypassing the floors applied by the
    /// tolerance policy.
    pub fn override_tolerances(&mut self, tolerances: Tolerances) {
        self.tolerances = tolerances;
    }

    // ─── Loop ────────────────────────────────────────────────────────────

    /// Execute one activity: diffuse, advance the clock, reschedule, check
    /// for steady state and pick the next node.
    ///
    /// A terminal run is left untouched.
    pub fn step(&mut self) -> RunState {
        if self.state.is_terminal() {
            return self.state;
        }

        let acting = self.active;
        let outcome = diffusion::diffuse(&mut self.ring, acting);
        self.iterations += 1;
        self.last_step = Some(outcome);

        let acted_at = self.ring.node(acting).next_activity_time;
        self.current_time = self.current_time.max(acted_at);
        let next_time =
            scheduler::reschedule(&mut self.ring, acting, &mut self.timers, &mut self.rng);

        let check = match self.config.convergence.check {
            CheckMode::EveryStep => true,
            CheckMode::IdleSteps => outcome.is_idle(),
        };
        if check {
            self.last_report = convergence::scan(&self.ring, &self.tolerances);
            if self.last_report.converged {
                self.state = RunState::Converged;
            }
        }

        self.active = scheduler::next_to_act(&self.ring, acting);

        trace!(
            iteration = self.iterations,
            time = self.current_time,
            node = acting,
            transferred = outcome.transferred,
            next_time,
            next_node = self.active,
            "activity"
        );

        if self.state == RunState::Running && self.current_time >= self.config.horizon {
            self.state = RunState::TimedOut;
            // The last scan may be stale when only idle steps are checked.
            self.last_report = convergence::scan(&self.ring, &self.tolerances);
        }
        self.state
    }

    /// Drive the loop to a terminal state and report.
    pub fn run(&mut self) -> RunResult {
        while !self.step().is_terminal() {}
        let result = self.result();
        info!(
            outcome = ?result.outcome,
            nodes = result.nodes,
            elapsed_time = result.elapsed_time,
            iterations = result.iterations,
            unbalanced_nodes = result.unbalanced_nodes,
            "simulation finished"
        );
        result
    }

    /// Snapshot of the run's metrics as they stand now.
    pub fn result(&self) -> RunResult {
        RunResult {
            outcome: self.state,
            nodes: self.ring.len(),
            seed: self.config.seed,
            elapsed_time: self.current_time,
            iterations: self.iterations,
            initial_total_load: self.ring.initial_total_load(),
            final_total_load: self.ring.total_load(),
            balanced_load: self.tolerances.balanced_load,
            max_unsteady_nodes: self.tolerances.max_unsteady_nodes,
            unbalanced_nodes: self.last_report.unbalanced_nodes,
            unbalanced_load: self.last_report.unbalanced_load,
        }
    }

    // ─── Introspection ───────────────────────────────────────────────────

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn tolerances(&self) -> Tolerances {
        self.tolerances
    }

    pub fn current_time(&self) -> u64 {
        self.current_time
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Node that will act on the next step.
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn last_report(&self) -> ConvergenceReport {
        self.last_report
    }

    pub fn last_step(&self) -> Option<DiffusionOutcome> {
        self.last_step
    }

    pub fn snapshot(&self) -> Vec<NodeSnapshot> {
        self.ring.snapshot()
    }
}

/// Build and run a single simulation from a configuration.
pub fn simulate(config: &SimConfig) -> Result<RunResult, SimError> {
    Ok(Simulation::new(config)?.run())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
