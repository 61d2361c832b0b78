// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ring Diffusion Simulation Suite - Steady-State Tolerance Policy

//! Derives the two steady-state parameters of a run from its initial load.
//!
//! `balanced_load` is the largest neighbor-to-neighbor load difference still
//! considered balanced; `max_unsteady_nodes` is how many nodes may remain
//! outside that tolerance when convergence is declared. Both are floored
//! at 1: a zero tolerance demands exact equality, which integer averaging
//! generally cannot reach.

use serde::{Deserialize, Serialize};

use crate::types::Tolerances;

/// How the balance fraction is turned into a load-difference tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TolerancePolicy {
    /// `total × fraction`.
    TotalFraction,
    /// `total × fraction`, divided by `safety_factor` whenever it exceeds the
    /// average per-node load.
    TotalWithAverageCap { safety_factor: u64 },
    /// `(total / k) × fraction`.
    AverageFraction,
}

impl Default for TolerancePolicy {
    fn default() -> Self {
        TolerancePolicy::TotalWithAverageCap { safety_factor: 10 }
    }
}

impl TolerancePolicy {
    pub fn balanced_load(&self, total_load: u64, nodes: usize, fraction: f64) -> u64 {
        let nodes = nodes.max(1) as u64;
        let average = total_load / nodes;
        let raw = match *self {
            Self::TotalFraction => scale(total_load, fraction),
            Self::TotalWithAverageCap { safety_factor } => {
                let scaled = scale(total_load, fraction);
                if scaled > average {
                    scaled / safety_factor.max(1)
                } else {
                    scaled
                }
            }
            Self::AverageFraction => scale(average, fraction),
        };
        raw.max(1)
    }
}

/// Number of nodes allowed to stay unbalanced, at least one.
pub fn max_unsteady_nodes(nodes: usize, unsteady_fraction: f64) -> usize {
    ((nodes as f64 * unsteady_fraction) as usize).max(1)
}

pub fn compute_tolerances(
    policy: TolerancePolicy,
    total_load: u64,
    nodes: usize,
    balance_fraction: f64,
    unsteady_fraction: f64,
) -> Tolerances {
    Tolerances {
        balanced_load: policy.balanced_load(total_load, nodes, balance_fraction),
        max_unsteady_nodes: max_unsteady_nodes(nodes, unsteady_fraction),
    }
}

// Truncates toward zero; `as` saturates for out-of-range floats.
fn scale(value: u64, fraction: f64) -> u64 {
    (value as f64 * fraction) as u64
}
