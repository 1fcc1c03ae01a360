//! Softened Newtonian gravity
//!
//! a_i = Σ_{j≠i} G m_j d / (|d|² + ε²)^{3/2},  d = x_j - x_i
//!
//! Pairs whose contribution is not finite are skipped instead of feeding
//! NaN/inf into the state. With ε² = 0 this covers coincident particles and
//! separations so small that |d|³ underflows to zero.

use crate::constants::G;
use crate::particle::Vec3Column;
use glam::DVec3;

/// Acceleration contributed to a particle by another particle of mass
/// `mass_j` at offset `d`. Returns `None` when the pair is singular.
#[inline]
pub fn pairwise_acceleration(d: DVec3, mass_j: f64, softening_squared: f64) -> Option<DVec3> {
    let r2 = d.length_squared() + softening_squared;
    let inv_r3 = 1.0 / (r2 * r2.sqrt());
    let a = d * (G * mass_j * inv_r3);
    a.is_finite().then_some(a)
}

/// Softened potential energy of a pair: -G m_i m_j / sqrt(|d|² + ε²).
/// Returns `None` when the pair is singular.
#[inline]
pub fn pairwise_potential(d: DVec3, mass_i: f64, mass_j: f64, softening_squared: f64) -> Option<f64> {
    let r2 = d.length_squared() + softening_squared;
    let u = -G * mass_i * mass_j / r2.sqrt();
    u.is_finite().then_some(u)
}

/// Result of summing the pull of every other particle on one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelerationSum {
    pub acceleration: DVec3,
    /// Pairs skipped because their pull is not finite
    pub singular_pairs: usize,
}

/// Total acceleration on particle `i`.
///
/// The inner sum runs over j in increasing order, skipping j = i, so the
/// floating point result is reproducible regardless of how the outer loop
/// over particles is scheduled.
pub fn acceleration_on(
    i: usize,
    positions: &Vec3Column,
    masses: &[f64],
    softening_squared: f64,
) -> AccelerationSum {
    let xi = positions.get(i);
    let mut acceleration = DVec3::ZERO;
    let mut singular_pairs = 0;

    for (j, &mass_j) in masses.iter().enumerate() {
        if j == i {
            continue;
        }
        let d = positions.get(j) - xi;
        match pairwise_acceleration(d, mass_j, softening_squared) {
            Some(a) => acceleration += a,
            None => singular_pairs += 1,
        }
    }

    AccelerationSum {
        acceleration,
        singular_pairs,
    }
}

/// First pair (i < j) whose mutual pull is singular in either direction
pub fn find_singular_pair(
    positions: &Vec3Column,
    masses: &[f64],
    softening_squared: f64,
) -> Option<(usize, usize)> {
    let n = positions.len();
    for i in 0..n {
        let xi = positions.get(i);
        for j in (i + 1)..n {
            let d = positions.get(j) - xi;
            if pairwise_acceleration(d, masses[j], softening_squared).is_none()
                || pairwise_acceleration(-d, masses[i], softening_squared).is_none()
            {
                return Some((i, j));
            }
        }
    }
    None
}
