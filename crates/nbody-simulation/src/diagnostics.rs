//! Conserved-quantity diagnostics
//!
//! Used to check runs for integrator regressions. The potential uses the same
//! softening as the force law so that energy drift reflects only the
//! integrator.

use glam::DVec3;
use nbody_physics::{pairwise_potential, ParticleSet};
use rayon::prelude::*;

/// Kinetic and potential energy of a particle set at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyReport {
    pub kinetic: f64,
    pub potential: f64,
}

impl EnergyReport {
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }

    /// |E - E0| / |E0|, or the absolute change when E0 is zero
    pub fn relative_drift(&self, initial: &EnergyReport) -> f64 {
        let e0 = initial.total();
        let delta = (self.total() - e0).abs();
        if e0 == 0.0 {
            delta
        } else {
            delta / e0.abs()
        }
    }
}

/// Σ ½ m |v|²
pub fn kinetic_energy(set: &ParticleSet) -> f64 {
    set.masses()
        .iter()
        .zip(set.velocities().iter())
        .map(|(m, v)| 0.5 * m * v.length_squared())
        .sum()
}

/// Softened pair potential summed over i < j. Singular pairs contribute zero.
pub fn potential_energy(set: &ParticleSet, softening_squared: f64) -> f64 {
    let masses = set.masses();
    let positions = set.positions();

    (0..set.len())
        .into_par_iter()
        .map(|i| {
            let xi = positions.get(i);
            ((i + 1)..masses.len())
                .filter_map(|j| {
                    pairwise_potential(positions.get(j) - xi, masses[i], masses[j], softening_squared)
                })
                .sum::<f64>()
        })
        .sum()
}

pub fn energy(set: &ParticleSet, softening_squared: f64) -> EnergyReport {
    EnergyReport {
        kinetic: kinetic_energy(set),
        potential: potential_energy(set, softening_squared),
    }
}

/// Σ m v
pub fn momentum(set: &ParticleSet) -> DVec3 {
    set.masses()
        .iter()
        .zip(set.velocities().iter())
        .map(|(m, v)| v * *m)
        .sum()
}

/// Σ m a, which vanishes when every pairwise pull has an equal opposite
pub fn net_force(set: &ParticleSet) -> DVec3 {
    set.masses()
        .iter()
        .zip(set.accelerations().iter())
        .map(|(m, a)| a * *m)
        .sum()
}

/// Mass-weighted mean position (origin for an empty set)
pub fn center_of_mass(set: &ParticleSet) -> DVec3 {
    let total: f64 = set.masses().iter().sum();
    if total == 0.0 {
        return DVec3::ZERO;
    }
    let weighted: DVec3 = set
        .masses()
        .iter()
        .zip(set.positions().iter())
        .map(|(m, x)| x * *m)
        .sum();
    weighted / total
}
