// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ring Diffusion Simulation Suite - Activity Scheduler

use rand::Rng;

use crate::ring::Ring;
use crate::sampler::Sampler;

/// Pick the node that acts after `current`.
///
/// Scans rightwards starting just after `current` and returns the node with
/// the smallest `next_activity_time`; ties go to the first one met. On a
/// single-node ring the only candidate is `current` itself.
pub fn next_to_act(ring: &Ring, current: usize) -> usize {
    let first = ring.right(current);
    let mut best = first;
    let mut at = first;
    while at != current {
        if ring.node(at).next_activity_time < ring.node(best).next_activity_time {
            best = at;
        }
        at = ring.right(at);
    }
    best
}

/// Push the node's next activity further out by a freshly drawn interval.
/// Returns the new activity time.
pub fn reschedule<T, R>(ring: &mut Ring, index: usize, timers: &mut T, rng: &mut R) -> u64
where
    T: Sampler,
    R: Rng + ?Sized,
{
    let interval = timers.sample(rng);
    let node = ring.node_mut(index);
    node.next_activity_time = node.next_activity_time.saturating_add(interval);
    node.next_activity_time
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::UniformRange;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn picks_smallest_timer_excluding_current() {
        // Node 2 is current and has the smallest timer, so it is skipped.
        let ring = Ring::from_parts(&[(0, 500), (0, 300), (0, 100), (0, 400)]).unwrap();
        assert_eq!(next_to_act(&ring, 2), 1);
        assert_eq!(next_to_act(&ring, 1), 2);
    }

    #[test]
    fn ties_resolve_in_scan_order() {
        let ring = Ring::from_parts(&[(0, 200), (0, 200), (0, 900), (0, 200)]).unwrap();
        // Scan from 2 goes 3, 0, 1: node 3 is met first.
        assert_eq!(next_to_act(&ring, 2), 3);
        // Scan from 3 goes 0, 1, 2.
        assert_eq!(next_to_act(&ring, 3), 0);
        // Scan from 0 goes 1, 2, 3.
        assert_eq!(next_to_act(&ring, 0), 1);
    }

    #[test]
    fn single_node_acts_again() {
        let ring = Ring::from_parts(&[(10, 5)]).unwrap();
        assert_eq!(next_to_act(&ring, 0), 0);
    }

    #[test]
    fn two_node_ring_alternates() {
        let ring = Ring::from_parts(&[(10, 5), (0, 999)]).unwrap();
        assert_eq!(next_to_act(&ring, 0), 1);
        assert_eq!(next_to_act(&ring, 1), 0);
    }

    #[test]
    fn rescheduling_strictly_increases() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut timers = UniformRange { min: 100, max: 1000 };
        let mut ring = Ring::from_parts(&[(0, 150), (0, 250), (0, 350)]).unwrap();
        for round in 0..1_000 {
            let index = round % 3;
            let before = ring.node(index).next_activity_time;
            let after = reschedule(&mut ring, index, &mut timers, &mut rng);
            assert!(after > before, "timer went from {} to {}", before, after);
            assert!(after - before >= 100 && after - before <= 1000);
        }
    }
}
