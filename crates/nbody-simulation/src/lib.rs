//! # N-body Simulation Engine
//!
//! Brute-force all-pairs gravity with a semi-implicit Euler integrator. The
//! per-particle force sums run in parallel on the rayon thread pool.

pub mod diagnostics;
pub mod params;
pub mod scenario;
pub mod simulation;

pub use diagnostics::*;
pub use params::*;
pub use simulation::*;
