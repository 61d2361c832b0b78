// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ring Diffusion Simulation Suite - Run Configuration

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::tolerance::TolerancePolicy;

pub const DEFAULT_LOAD_RANGE: ValueRange = ValueRange { min: 10, max: 1000 };
pub const DEFAULT_INTERVAL_RANGE: ValueRange = ValueRange { min: 100, max: 1000 };
pub const DEFAULT_BALANCE_FRACTION: f64 = 0.0001;
pub const DEFAULT_UNSTEADY_FRACTION: f64 = 0.02;
pub const DEFAULT_HORIZON: u64 = 1_000_000;

// ─── Value Range ─────────────────────────────────────────────────────────────

/// Inclusive integer range used for load and activity-interval draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: u64,
    pub max: u64,
}

impl ValueRange {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    fn validate(&self, name: &'static str) -> Result<(), SimError> {
        if self.min > self.max {
            return Err(SimError::InvalidRange { name, min: self.min, max: self.max });
        }
        Ok(())
    }
}

// ─── Convergence Policy ──────────────────────────────────────────────────────

/// When the global steady-state scan is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CheckMode {
    /// After every diffusion step.
    #[default]
    EveryStep,
    /// Only after a step that moved no load.
    IdleSteps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConvergencePolicy {
    pub check: CheckMode,
}

// ─── SimConfig ───────────────────────────────────────────────────────────────

/// Inputs for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub nodes: usize,
    pub load_range: ValueRange,
    pub interval_range: ValueRange,
    pub balance_fraction: f64,
    pub unsteady_fraction: f64,
    pub horizon: u64,
    pub seed: u64,
    pub tolerance_policy: TolerancePolicy,
    pub convergence: ConvergencePolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            nodes: 10,
            load_range: DEFAULT_LOAD_RANGE,
            interval_range: DEFAULT_INTERVAL_RANGE,
            balance_fraction: DEFAULT_BALANCE_FRACTION,
            unsteady_fraction: DEFAULT_UNSTEADY_FRACTION,
            horizon: DEFAULT_HORIZON,
            seed: 0,
            tolerance_policy: TolerancePolicy::default(),
            convergence: ConvergencePolicy::default(),
        }
    }
}

impl SimConfig {
    pub fn with_nodes(mut self, nodes: usize) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse a JSON document; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reject every precondition violation up front so the run itself
    /// never has to.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.nodes == 0 {
            return Err(SimError::InvalidTopology { nodes: self.nodes });
        }
        self.load_range.validate("load")?;
        self.interval_range.validate("activity interval")?;
        if self.interval_range.min == 0 {
            return Err(SimError::ZeroInterval);
        }
        check_fraction("balance fraction", self.balance_fraction)?;
        check_fraction("unsteady fraction", self.unsteady_fraction)?;
        if self.horizon == 0 {
            return Err(SimError::InvalidHorizon);
        }
        // Loads never rise above the largest initial draw, so a full scan
        // sums at most two differences of that size per node.
        let scan_bound = (self.nodes as u64)
            .checked_mul(2)
            .and_then(|pairs| pairs.checked_mul(self.load_range.max));
        if scan_bound.is_none() {
            return Err(SimError::LoadOverflow { nodes: self.nodes, max: self.load_range.max });
        }
        Ok(())
    }
}

fn check_fraction(name: &'static str, value: f64) -> Result<(), SimError> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimError::InvalidFraction { name, value });
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
