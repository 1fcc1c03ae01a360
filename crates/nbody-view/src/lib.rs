//! # N-body View
//!
//! Renderer-side helpers that read a particle set without mutating it: an
//! orbit camera, back-to-front depth ordering and packed draw instances.

pub mod camera;
pub mod depth;
pub mod instance;

pub use camera::*;
pub use depth::*;
pub use instance::*;
