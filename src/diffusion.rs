// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ring Diffusion Simulation Suite - Diffusion Step

//! Local three-point averaging.
//!
//! The acting node averages its load with its neighbors (integer division
//! over the participants that exist). If it sits above that average it
//! hands surplus to each neighbor below the average, left first, never
//! pushing a receiver above the average nor itself below it.

use serde::Serialize;

use crate::ring::Ring;

/// What a single diffusion step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DiffusionOutcome {
    /// Local average the transfers were computed against.
    pub average: u64,
    /// Load units moved off the acting node.
    pub transferred: u64,
}

impl DiffusionOutcome {
    pub fn is_idle(&self) -> bool {
        self.transferred == 0
    }
}

pub fn diffuse(ring: &mut Ring, index: usize) -> DiffusionOutcome {
    let mut neighbors = [0usize; 2];
    let mut count = 0;
    for neighbor in ring.neighbors(index) {
        neighbors[count] = neighbor;
        count += 1;
    }
    let neighbors = &neighbors[..count];

    let total: u64 = ring.node(index).load
        + neighbors.iter().map(|&n| ring.node(n).load).sum::<u64>();
    let average = total / (count as u64 + 1);

    let mut outcome = DiffusionOutcome { average, transferred: 0 };
    if ring.node(index).load <= average {
        return outcome;
    }

    for &neighbor in neighbors {
        let surplus = ring.node(index).load - average;
        if surplus == 0 {
            break;
        }
        let receiver = ring.node(neighbor).load;
        if receiver >= average {
            continue;
        }
        let amount = surplus.min(average - receiver);
        ring.node_mut(index).load -= amount;
        ring.node_mut(neighbor).load += amount;
        outcome.transferred += amount;
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loads(ring: &Ring) -> Vec<u64> {
        ring.nodes().iter().map(|n| n.load).collect()
    }

    #[test]
    fn even_split_across_three() {
        let mut ring = Ring::from_parts(&[(90, 1), (0, 2), (0, 3)]).unwrap();
        let outcome = diffuse(&mut ring, 0);
        assert_eq!(outcome.average, 30);
        assert_eq!(outcome.transferred, 60);
        assert_eq!(loads(&ring), vec![30, 30, 30]);
    }

    #[test]
    fn truncated_average_keeps_remainder_on_donor() {
        let mut ring = Ring::from_parts(&[(100, 1), (0, 2), (0, 3)]).unwrap();
        let outcome = diffuse(&mut ring, 0);
        assert_eq!(outcome.average, 33);
        assert_eq!(loads(&ring), vec![34, 33, 33]);
    }

    #[test]
    fn left_neighbor_is_served_first() {
        // Positions: 0 (left of 1), 1 acting, 2 (right of 1), 3 far side.
        // Average of (0, 60, 30) = 30: left deficit 30, right deficit 0.
        let mut ring = Ring::from_parts(&[(0, 1), (60, 2), (30, 3), (0, 4)]).unwrap();
        diffuse(&mut ring, 1);
        assert_eq!(loads(&ring), vec![30, 30, 30, 0]);
    }

    #[test]
    fn surplus_limits_transfer() {
        // Average of (10, 20, 0) on node 1: (10+20+0)/3 = 10.
        // Node 1 surplus 10, left deficit 0, right deficit 10.
        let mut ring = Ring::from_parts(&[(10, 1), (20, 2), (0, 3)]).unwrap();
        let outcome = diffuse(&mut ring, 1);
        assert_eq!(outcome.transferred, 10);
        assert_eq!(loads(&ring), vec![10, 10, 10]);
    }

    #[test]
    fn both_neighbors_fed_from_one_surplus() {
        // Node 0 with left = node 3 (20) and right = node 1 (10):
        // average (120 + 20 + 10) / 3 = 50, so left takes 30 and right 40.
        let mut ring = Ring::from_parts(&[(120, 1), (10, 2), (0, 3), (20, 4)]).unwrap();
        let outcome = diffuse(&mut ring, 0);
        assert_eq!(outcome.average, 50);
        assert_eq!(outcome.transferred, 70);
        assert_eq!(loads(&ring), vec![50, 50, 0, 50]);
    }

    #[test]
    fn no_transfer_at_or_below_average() {
        let mut ring = Ring::from_parts(&[(50, 1), (10, 2), (50, 3)]).unwrap();
        let outcome = diffuse(&mut ring, 1);
        assert!(outcome.is_idle());
        assert_eq!(loads(&ring), vec![50, 10, 50]);
    }

    #[test]
    fn two_node_ring_averages_over_two() {
        let mut ring = Ring::from_parts(&[(9, 1), (0, 2)]).unwrap();
        let outcome = diffuse(&mut ring, 0);
        assert_eq!(outcome.average, 4);
        assert_eq!(loads(&ring), vec![5, 4]);
    }

    #[test]
    fn single_node_is_always_idle() {
        let mut ring = Ring::from_parts(&[(77, 1)]).unwrap();
        assert!(diffuse(&mut ring, 0).is_idle());
        assert_eq!(loads(&ring), vec![77]);
    }

    #[test]
    fn step_conserves_and_respects_average() {
        use rand::{Rng, SeedableRng};
        use rand_chacha::ChaCha8Rng;

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            let k = rng.gen_range(1..12);
            let parts: Vec<(u64, u64)> = (0..k).map(|i| (rng.gen_range(0..500), i as u64)).collect();
            let mut ring = Ring::from_parts(&parts).unwrap();
            let index = rng.gen_range(0..k);
            let neighbors: Vec<usize> = ring.neighbors(index).collect();
            let before = ring.total_load();
            let donor_before = ring.node(index).load;

            let outcome = diffuse(&mut ring, index);

            assert_eq!(ring.total_load(), before);
            for n in neighbors {
                let was = parts[n].0;
                if was < outcome.average {
                    assert!(ring.node(n).load <= outcome.average);
                } else {
                    assert_eq!(ring.node(n).load, was);
                }
            }
            if donor_before > outcome.average {
                assert!(ring.node(index).load >= outcome.average);
            }
        }
    }
}
