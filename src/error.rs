// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ring Diffusion Simulation Suite - Error Types

/// Precondition failures raised while validating a configuration or
/// building a ring. Nothing in the activity loop itself can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("invalid topology: a ring needs at least one node (got {nodes})")]
    InvalidTopology { nodes: usize },

    #[error("invalid {name} range: min {min} is greater than max {max}")]
    InvalidRange { name: &'static str, min: u64, max: u64 },

    #[error("activity interval range must start above zero")]
    ZeroInterval,

    #[error("invalid {name}: {value} (must be finite and non-negative)")]
    InvalidFraction { name: &'static str, value: f64 },

    #[error("load range max {max} can overflow the load sums of a {nodes}-node ring")]
    LoadOverflow { nodes: usize, max: u64 },

    #[error("simulated-time horizon must be greater than zero")]
    InvalidHorizon,
}
