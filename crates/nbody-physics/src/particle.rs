//! Particle records and the columnar particle store

use crate::constants::DEFAULT_RADIUS;
use crate::error::{Error, Result};
use glam::{DVec3, Vec4};

/// A single particle as supplied by a loader or scenario.
///
/// This is the row form used to build a [`ParticleSet`]; the set itself keeps
/// every quantity in its own column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Mass (must be > 0)
    pub mass: f64,
    /// Position in world space
    pub position: DVec3,
    /// Velocity
    pub velocity: DVec3,
    /// Radius for rendering
    pub radius: f32,
    /// RGBA color for rendering
    pub color: Vec4,
}

impl Particle {
    /// Create a white particle with the default render radius
    pub fn new(mass: f64, position: DVec3, velocity: DVec3) -> Self {
        Self {
            mass,
            position,
            velocity,
            radius: DEFAULT_RADIUS,
            color: Vec4::ONE,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }
}

/// Three coordinate columns holding one 3D quantity for every particle.
///
/// The length is fixed at construction; values can be rewritten in place
/// through [`Vec3Column::axes_mut`] but the column never grows or shrinks.
#[derive(Debug, Clone, PartialEq)]
pub struct Vec3Column {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl Vec3Column {
    pub fn zeros(len: usize) -> Self {
        Self {
            x: vec![0.0; len],
            y: vec![0.0; len],
            z: vec![0.0; len],
        }
    }

    pub fn from_vectors(vectors: &[DVec3]) -> Self {
        Self {
            x: vectors.iter().map(|v| v.x).collect(),
            y: vectors.iter().map(|v| v.y).collect(),
            z: vectors.iter().map(|v| v.z).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> DVec3 {
        DVec3::new(self.x[i], self.y[i], self.z[i])
    }

    pub fn xs(&self) -> &[f64] {
        &self.x
    }

    pub fn ys(&self) -> &[f64] {
        &self.y
    }

    pub fn zs(&self) -> &[f64] {
        &self.z
    }

    /// Mutable access to the three coordinate slices at once
    pub fn axes_mut(&mut self) -> (&mut [f64], &mut [f64], &mut [f64]) {
        (&mut self.x, &mut self.y, &mut self.z)
    }

    /// `self[i] += other[i] * scale` for every i, one coordinate column at a time
    pub fn add_scaled(&mut self, other: &Vec3Column, scale: f64) {
        assert_eq!(self.len(), other.len(), "column length mismatch");
        for (dst, src) in [
            (&mut self.x, &other.x),
            (&mut self.y, &other.y),
            (&mut self.z, &other.z),
        ] {
            for (d, s) in dst.iter_mut().zip(src.iter()) {
                *d += s * scale;
            }
        }
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = DVec3> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }

    fn all_finite(&self) -> Option<usize> {
        self.iter().position(|v| !v.is_finite())
    }
}

/// Mutable view used by the integrator.
///
/// Masses stay read-only; the vector columns can be rewritten in place but
/// not resized, so the set keeps its length.
pub struct Dynamics<'a> {
    pub mass: &'a [f64],
    pub position: &'a mut Vec3Column,
    pub velocity: &'a mut Vec3Column,
    pub acceleration: &'a mut Vec3Column,
}

/// Columnar (structure-of-arrays) store for a fixed number of particles.
///
/// Every column has the same length for the whole lifetime of the set.
/// Accelerations start at zero and are filled in by the simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSet {
    mass: Vec<f64>,
    position: Vec3Column,
    velocity: Vec3Column,
    acceleration: Vec3Column,
    radius: Vec<f32>,
    color: Vec<Vec4>,
}

impl ParticleSet {
    /// Build a set from particle records.
    ///
    /// Errors:
    /// - `Error::InvalidInput` if any mass is non-positive or non-finite, or a
    ///   position/velocity component is NaN/inf.
    pub fn create(particles: &[Particle]) -> Result<Self> {
        Self::from_columns(
            particles.iter().map(|p| p.mass).collect(),
            particles.iter().map(|p| p.position).collect(),
            particles.iter().map(|p| p.velocity).collect(),
            particles.iter().map(|p| p.radius).collect(),
            particles.iter().map(|p| p.color).collect(),
        )
    }

    /// Build a set directly from per-quantity columns.
    ///
    /// Errors:
    /// - `Error::InvalidInput` if the columns differ in length or any value
    ///   fails the checks of [`ParticleSet::create`].
    pub fn from_columns(
        mass: Vec<f64>,
        position: Vec<DVec3>,
        velocity: Vec<DVec3>,
        radius: Vec<f32>,
        color: Vec<Vec4>,
    ) -> Result<Self> {
        let n = mass.len();
        let lengths = [
            ("position", position.len()),
            ("velocity", velocity.len()),
            ("radius", radius.len()),
            ("color", color.len()),
        ];
        for (name, len) in lengths {
            if len != n {
                return Err(Error::InvalidInput(format!(
                    "{name} column has {len} entries, expected {n}"
                )));
            }
        }

        if let Some(i) = mass.iter().position(|m| !m.is_finite() || *m <= 0.0) {
            return Err(Error::InvalidInput(format!(
                "mass of particle {i} must be finite and > 0, got {}",
                mass[i]
            )));
        }

        let position = Vec3Column::from_vectors(&position);
        if let Some(i) = position.all_finite() {
            return Err(Error::InvalidInput(format!(
                "position of particle {i} must be finite"
            )));
        }
        let velocity = Vec3Column::from_vectors(&velocity);
        if let Some(i) = velocity.all_finite() {
            return Err(Error::InvalidInput(format!(
                "velocity of particle {i} must be finite"
            )));
        }

        Ok(Self {
            mass,
            position,
            velocity,
            acceleration: Vec3Column::zeros(n),
            radius,
            color,
        })
    }

    pub fn len(&self) -> usize {
        self.mass.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }

    pub fn mass(&self, i: usize) -> f64 {
        self.mass[i]
    }

    pub fn position(&self, i: usize) -> DVec3 {
        self.position.get(i)
    }

    pub fn velocity(&self, i: usize) -> DVec3 {
        self.velocity.get(i)
    }

    pub fn acceleration(&self, i: usize) -> DVec3 {
        self.acceleration.get(i)
    }

    pub fn radius(&self, i: usize) -> f32 {
        self.radius[i]
    }

    pub fn color(&self, i: usize) -> Vec4 {
        self.color[i]
    }

    pub fn masses(&self) -> &[f64] {
        &self.mass
    }

    pub fn positions(&self) -> &Vec3Column {
        &self.position
    }

    pub fn velocities(&self) -> &Vec3Column {
        &self.velocity
    }

    pub fn accelerations(&self) -> &Vec3Column {
        &self.acceleration
    }

    pub fn radii(&self) -> &[f32] {
        &self.radius
    }

    pub fn colors(&self) -> &[Vec4] {
        &self.color
    }

    /// Reassemble the row form of particle `i`
    pub fn particle(&self, i: usize) -> Particle {
        Particle {
            mass: self.mass[i],
            position: self.position.get(i),
            velocity: self.velocity.get(i),
            radius: self.radius[i],
            color: self.color[i],
        }
    }

    /// Split borrow of the physical columns for in-place integration
    pub fn dynamics_mut(&mut self) -> Dynamics<'_> {
        Dynamics {
            mass: &self.mass,
            position: &mut self.position,
            velocity: &mut self.velocity,
            acceleration: &mut self.acceleration,
        }
    }
}
