// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ring Diffusion Simulation Suite - Type Definitions

use serde::{Deserialize, Serialize};

// ─── Node ────────────────────────────────────────────────────────────────────

/// One processing node on the ring.
///
/// Neighbors are stored as arena indices into the owning [`Ring`](crate::ring::Ring),
/// which makes `position == index` for every node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub position: usize,
    pub load: u64,
    pub next_activity_time: u64,
    pub left: usize,
    pub right: usize,
}

/// Read-only (position, load) pair used for verbose reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub position: usize,
    pub load: u64,
}

// ─── Tolerances ──────────────────────────────────────────────────────────────

/// The steady-state policy surface of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tolerances {
    /// Largest neighbor load difference still considered balanced.
    pub balanced_load: u64,
    /// Nodes allowed out of tolerance while still declaring convergence.
    pub max_unsteady_nodes: usize,
}

// ─── Run State ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Running,
    Converged,
    TimedOut,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

// ─── Run Result ──────────────────────────────────────────────────────────────

/// Everything the orchestration layer needs to report or aggregate a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub outcome: RunState,
    pub nodes: usize,
    pub seed: u64,
    /// Simulated time at termination.
    pub elapsed_time: u64,
    /// Diffusion steps executed.
    pub iterations: u64,
    pub initial_total_load: u64,
    pub final_total_load: u64,
    pub balanced_load: u64,
    pub max_unsteady_nodes: usize,
    /// Unbalanced-node count from the terminating scan.
    pub unbalanced_nodes: usize,
    /// Sum of out-of-tolerance differences from the terminating scan.
    pub unbalanced_load: u64,
}

impl RunResult {
    pub fn converged(&self) -> bool {
        self.outcome == RunState::Converged
    }

    /// Whether no load was created or destroyed during the run.
    pub fn load_conserved(&self) -> bool {
        self.initial_total_load == self.final_total_load
    }
}
