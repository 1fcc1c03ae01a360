//! # N-body Physics
//!
//! Columnar particle store and the softened Newtonian gravity kernel shared by
//! the simulation and the view crates.

pub mod constants;
pub mod error;
pub mod forces;
pub mod particle;

pub use constants::*;
pub use error::{Error, Result};
pub use forces::*;
pub use particle::*;
