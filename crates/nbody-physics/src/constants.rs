//! Physical constants for the gravity kernel
//!
//! The simulation works in normalised units where the gravitational constant
//! is one. Masses, lengths and times in input files are expected in those
//! units.

/// Gravitational constant in simulation units
pub const G: f64 = 1.0;

/// Years represented by one unit of simulation time.
/// Used only for reporting elapsed time of galaxy-scale inputs.
pub const YEARS_PER_TIME_UNIT: f64 = 3.261539827498732e6;

/// Default squared softening length
pub const DEFAULT_SOFTENING_SQUARED: f64 = 0.01;

/// Default time step
pub const DEFAULT_TIME_STEP: f64 = 0.01;

/// Render radius given to particles created without one
pub const DEFAULT_RADIUS: f32 = 0.1;
