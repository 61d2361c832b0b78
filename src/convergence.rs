// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ring Diffusion Simulation Suite - Convergence Detector

use serde::{Deserialize, Serialize};

use crate::ring::Ring;
use crate::types::Tolerances;

/// Result of one full steady-state scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConvergenceReport {
    /// Nodes differing from at least one neighbor by more than the tolerance.
    pub unbalanced_nodes: usize,
    /// Sum of every out-of-tolerance neighbor difference seen during the scan.
    pub unbalanced_load: u64,
    pub converged: bool,
}

/// Scan every node in ring order with global knowledge of all loads.
///
/// Each adjacent pair is seen from both sides, so a single imbalanced edge
/// contributes its difference twice to `unbalanced_load`.
pub fn scan(ring: &Ring, tolerances: &Tolerances) -> ConvergenceReport {
    let mut unbalanced_nodes = 0;
    let mut unbalanced_load = 0u64;

    for index in ring.walk_right(ring.start()) {
        let load = ring.node(index).load;
        let mut unbalanced = false;
        for neighbor in ring.neighbors(index) {
            let diff = load.abs_diff(ring.node(neighbor).load);
            if diff > tolerances.balanced_load {
                unbalanced_load += diff;
                unbalanced = true;
            }
        }
        if unbalanced {
            unbalanced_nodes += 1;
        }
    }

    ConvergenceReport {
        unbalanced_nodes,
        unbalanced_load,
        converged: unbalanced_nodes <= tolerances.max_unsteady_nodes,
    }
}

pub fn is_converged(ring: &Ring, tolerances: &Tolerances) -> bool {
    scan(ring, tolerances).converged
}
