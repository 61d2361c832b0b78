// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ring Diffusion Simulation Suite - Ring Topology

//! Arena-backed ring of nodes.
//!
//! Nodes live in a single `Vec` indexed by position; `left` and `right` are
//! indices into that same `Vec`. The ring is built in one go and never
//! restructured afterwards, so every neighbor index is valid for the
//! lifetime of the ring.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SimError;
use crate::sampler::Sampler;
use crate::types::{Node, NodeSnapshot};

/// Every third node (position 0, 3, 6, ...) starts loaded; the rest start
/// empty.
pub const LOADED_STRIDE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ring {
    nodes: Vec<Node>,
    start: usize,
    initial_total_load: u64,
}

impl Ring {
    /// Build a closed ring of `k` nodes with a deliberately skewed load.
    ///
    /// For each position in order, a load is drawn when the node is on the
    /// loaded stride, then its first activity time is drawn.
    pub fn build<L, T, R>(
        k: usize,
        loads: &mut L,
        timers: &mut T,
        rng: &mut R,
    ) -> Result<Self, SimError>
    where
        L: Sampler,
        T: Sampler,
        R: Rng + ?Sized,
    {
        if k == 0 {
            return Err(SimError::InvalidTopology { nodes: k });
        }

        let mut nodes = Vec::with_capacity(k);
        for position in 0..k {
            let load = if position % LOADED_STRIDE == 0 {
                loads.sample(rng)
            } else {
                0
            };
            let next_activity_time = timers.sample(rng);
            nodes.push(Node {
                position,
                load,
                next_activity_time,
                left: (position + k - 1) % k,
                right: (position + 1) % k,
            });
        }

        let ring = Self::assemble(nodes);
        debug!(
            nodes = k,
            total_load = ring.initial_total_load,
            "ring constructed"
        );
        Ok(ring)
    }

    /// Build a ring from explicit `(load, next_activity_time)` pairs.
    pub fn from_parts(parts: &[(u64, u64)]) -> Result<Self, SimError> {
        let k = parts.len();
        if k == 0 {
            return Err(SimError::InvalidTopology { nodes: k });
        }
        let nodes = parts
            .iter()
            .enumerate()
            .map(|(position, &(load, next_activity_time))| Node {
                position,
                load,
                next_activity_time,
                left: (position + k - 1) % k,
                right: (position + 1) % k,
            })
            .collect();
        Ok(Self::assemble(nodes))
    }

    fn assemble(nodes: Vec<Node>) -> Self {
        let initial_total_load = nodes.iter().map(|n| n.load).sum();
        Self { nodes, start: 0, initial_total_load }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Designated start node: the first one created.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut Node {
        &mut self.nodes[index]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn left(&self, index: usize) -> usize {
        self.nodes[index].left
    }

    pub fn right(&self, index: usize) -> usize {
        self.nodes[index].right
    }

    /// Distinct neighbors of `index`, left first, excluding the node itself.
    ///
    /// Yields two nodes on rings of three or more, one on a two-node ring
    /// and none on a single-node ring.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> {
        let node = &self.nodes[index];
        let left = (node.left != index).then_some(node.left);
        let right = (node.right != index && node.right != node.left).then_some(node.right);
        left.into_iter().chain(right)
    }

    /// Walk rightwards from `from`, visiting every node exactly once.
    pub fn walk_right(&self, from: usize) -> RingWalk<'_> {
        RingWalk { ring: self, next: Some(from), from }
    }

    /// Load sum at construction time.
    pub fn initial_total_load(&self) -> u64 {
        self.initial_total_load
    }

    pub fn total_load(&self) -> u64 {
        self.nodes.iter().map(|n| n.load).sum()
    }

    /// (position, load) for every node in ring order from the start node.
    pub fn snapshot(&self) -> Vec<NodeSnapshot> {
        self.walk_right(self.start)
            .map(|i| {
                let node = &self.nodes[i];
                NodeSnapshot { position: node.position, load: node.load }
            })
            .collect()
    }
}

/// Iterator over node indices following `right` links once around the ring.
pub struct RingWalk<'a> {
    ring: &'a Ring,
    next: Option<usize>,
    from: usize,
}

impl Iterator for RingWalk<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next?;
        let right = self.ring.right(current);
        self.next = (right != self.from).then_some(right);
        Some(current)
    }
}
