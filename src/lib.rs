// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Ring Diffusion Simulation Suite

//! Discrete-event simulator for diffusion load balancing on a ring.
//!
//! Every node holds integer load units and, on its own random timer,
//! averages its load with its two ring neighbors. A global observer scans
//! the ring after each activity and stops the run once few enough nodes
//! differ from a neighbor by more than the tolerance, or once simulated
//! time passes the configured horizon.

pub mod types;
pub mod error;
pub mod config;
pub mod sampler;
pub mod ring;
pub mod tolerance;
pub mod scheduler;
pub mod diffusion;
pub mod convergence;
pub mod simulation;

pub use types::*;
pub use error::SimError;
pub use config::{CheckMode, ConvergencePolicy, SimConfig, ValueRange};
pub use ring::Ring;
pub use tolerance::TolerancePolicy;
pub use simulation::{simulate, Simulation};
