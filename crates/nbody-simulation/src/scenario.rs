//! Procedurally generated initial conditions
//!
//! All generators take an explicit seed so that runs are reproducible.

use glam::{DVec3, Vec4};
use nbody_physics::{Particle, G};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const STAR_COLOR: Vec4 = Vec4::new(0.98, 0.89, 0.69, 1.0);
const BODY_COLOR: Vec4 = Vec4::new(0.54, 0.71, 0.98, 1.0);

/// Two equal masses on a circular orbit about their common centre of mass,
/// which sits at the origin.
pub fn binary(mass: f64, separation: f64) -> Vec<Particle> {
    // Each body circles at radius s/2 under a pull of G m² / s²
    let speed = (G * mass / (2.0 * separation)).sqrt();
    let half = separation / 2.0;

    vec![
        Particle::new(mass, DVec3::new(-half, 0.0, 0.0), DVec3::new(0.0, -speed, 0.0))
            .with_color(STAR_COLOR),
        Particle::new(mass, DVec3::new(half, 0.0, 0.0), DVec3::new(0.0, speed, 0.0))
            .with_color(BODY_COLOR),
    ]
}

/// A unit central mass with `n` light bodies on circular orbits between
/// radius 0.1 and 5.1, at random phases in the xy plane.
pub fn circular_orbits(n: usize, seed: u64) -> Vec<Particle> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut particles = Vec::with_capacity(n + 1);

    particles.push(
        Particle::new(1.0, DVec3::ZERO, DVec3::ZERO)
            .with_radius(0.05)
            .with_color(STAR_COLOR),
    );

    for i in 0..n {
        let d = 0.1 + (i as f64) * 5.0 / (n as f64);
        let v = (G / d).sqrt();
        let theta = rng.random::<f64>() * std::f64::consts::TAU;
        let position = DVec3::new(d * theta.cos(), d * theta.sin(), 0.0);
        let velocity = DVec3::new(-v * theta.sin(), v * theta.cos(), 0.0);

        particles.push(
            Particle::new(1e-14, position, velocity)
                .with_radius(0.01)
                .with_color(BODY_COLOR),
        );
    }

    particles
}

/// `n` bodies of equal mass (total mass 1) spread uniformly through a ball,
/// starting at rest.
pub fn random_sphere(n: usize, radius: f64, seed: u64) -> Vec<Particle> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mass = 1.0 / n.max(1) as f64;

    (0..n)
        .map(|_| {
            let theta = rng.random::<f64>() * std::f64::consts::TAU;
            let cos_phi = rng.random::<f64>() * 2.0 - 1.0;
            let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();
            let r = rng.random::<f64>().powf(1.0 / 3.0) * radius;

            let position = DVec3::new(
                r * sin_phi * theta.cos(),
                r * sin_phi * theta.sin(),
                r * cos_phi,
            );
            let tint = rng.random::<f32>();
            Particle::new(mass, position, DVec3::ZERO)
                .with_color(STAR_COLOR.lerp(BODY_COLOR, tint))
        })
        .collect()
}
