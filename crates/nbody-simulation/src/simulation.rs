//! Brute-force gravity simulation
//!
//! Each step evaluates all n² pairwise accelerations from the positions at the
//! start of the step, then applies a semi-implicit Euler update (velocity
//! first, then position from the new velocity). The force pass only reads
//! positions and only writes accelerations, so it runs across the rayon pool;
//! integration starts once every acceleration has been written.

use crate::diagnostics::{energy, EnergyReport};
use crate::params::{validate_softening, SimulationParams};
use nbody_physics::{acceleration_on, find_singular_pair, Dynamics, Error, ParticleSet, Result};
use rayon::prelude::*;

/// Recompute every particle's acceleration from the current positions.
///
/// Returns the number of ordered pairs skipped because they were singular.
pub fn compute_accelerations(set: &mut ParticleSet, softening_squared: f64) -> usize {
    let Dynamics {
        mass,
        position,
        acceleration,
        ..
    } = set.dynamics_mut();
    let position = &*position;
    let (ax, ay, az) = acceleration.axes_mut();

    ax.par_iter_mut()
        .zip(ay.par_iter_mut())
        .zip(az.par_iter_mut())
        .enumerate()
        .map(|(i, ((ax, ay), az))| {
            let sum = acceleration_on(i, position, mass, softening_squared);
            *ax = sum.acceleration.x;
            *ay = sum.acceleration.y;
            *az = sum.acceleration.z;
            sum.singular_pairs
        })
        .sum()
}

/// Establish consistent starting accelerations. Positions and velocities are
/// left untouched.
///
/// Errors:
/// - `Error::InvalidInput` if `softening_squared` is negative or non-finite.
/// - `Error::NumericalSingularity` if some pair's pull is not finite, e.g.
///   two particles coincide (or nearly so) while `softening_squared` is zero.
pub fn initialize(set: &mut ParticleSet, softening_squared: f64) -> Result<()> {
    validate_softening(softening_squared)?;

    if compute_accelerations(set, softening_squared) > 0 {
        if let Some((first, second)) =
            find_singular_pair(set.positions(), set.masses(), softening_squared)
        {
            return Err(Error::NumericalSingularity { first, second });
        }
    }
    log::debug!(
        "Initialized accelerations for {} particles (e2 = {})",
        set.len(),
        softening_squared
    );
    Ok(())
}

/// Advance every particle by one time step of length `h`.
///
/// `h` must be finite and positive; [`Simulation`] validates it once at
/// construction. A negative or NaN `softening_squared` is treated as zero.
///
/// Never fails: singular pairs that appear mid-run are skipped and reported
/// through the log.
pub fn step(set: &mut ParticleSet, h: f64, softening_squared: f64) {
    let softening_squared = softening_squared.max(0.0);

    let singular_pairs = compute_accelerations(set, softening_squared);
    if singular_pairs > 0 {
        log::warn!(
            "Skipped {} singular pair interactions (non-finite pull, check softening)",
            singular_pairs
        );
    }

    let Dynamics {
        position,
        velocity,
        acceleration,
        ..
    } = set.dynamics_mut();
    velocity.add_scaled(acceleration, h);
    position.add_scaled(velocity, h);
}

/// A running simulation: the particle set, its parameters and the elapsed
/// simulated time.
///
/// Construction runs [`initialize`], so every `Simulation` is ready to step.
#[derive(Debug, Clone)]
pub struct Simulation {
    particles: ParticleSet,
    params: SimulationParams,
    time: f64,
    steps: u64,
}

impl Simulation {
    pub fn new(mut particles: ParticleSet, params: SimulationParams) -> Result<Self> {
        params.validate()?;
        initialize(&mut particles, params.softening_squared)?;

        log::info!(
            "Simulation ready: {} particles, h = {}, e2 = {}",
            particles.len(),
            params.time_step,
            params.softening_squared
        );

        Ok(Self {
            particles,
            params,
            time: 0.0,
            steps: 0,
        })
    }

    pub fn step(&mut self) {
        step(
            &mut self.particles,
            self.params.time_step,
            self.params.softening_squared,
        );
        self.time += self.params.time_step;
        self.steps += 1;
    }

    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Simulated time elapsed since construction
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn energy(&self) -> EnergyReport {
        energy(&self.particles, self.params.softening_squared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use nbody_physics::Particle;

    fn pair(separation: f64) -> ParticleSet {
        ParticleSet::create(&[
            Particle::new(1.0, DVec3::new(-separation / 2.0, 0.0, 0.0), DVec3::ZERO),
            Particle::new(1.0, DVec3::new(separation / 2.0, 0.0, 0.0), DVec3::ZERO),
        ])
        .unwrap()
    }

    #[test]
    fn test_initialize_leaves_motion_untouched() {
        let mut set = pair(2.0);
        let before = set.clone();
        initialize(&mut set, 0.01).unwrap();
        assert_eq!(set.positions(), before.positions());
        assert_eq!(set.velocities(), before.velocities());
        assert!(set.acceleration(0).x > 0.0);
        assert!(set.acceleration(1).x < 0.0);
    }

    #[test]
    fn test_initialize_rejects_coincident_particles_without_softening() {
        let mut set = pair(0.0);
        assert_eq!(
            initialize(&mut set, 0.0),
            Err(Error::NumericalSingularity { first: 0, second: 1 })
        );
        // Softened, the same configuration is regular
        assert!(initialize(&mut set, 0.01).is_ok());
    }

    #[test]
    fn test_initialize_rejects_negative_softening() {
        let mut set = pair(2.0);
        assert!(matches!(
            initialize(&mut set, -1.0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_step_survives_collision_without_softening() {
        let mut set = pair(0.0);
        initialize(&mut set, 0.01).unwrap();
        step(&mut set, 0.01, 0.0);
        step(&mut set, 0.01, 0.0);
        assert!(set.accelerations().iter().all(|a| a == DVec3::ZERO));
        assert!(set.positions().iter().all(|x| x.is_finite()));
        assert!(set.velocities().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_initialize_rejects_underflowing_separation() {
        let mut set = ParticleSet::create(&[
            Particle::new(1.0, DVec3::ZERO, DVec3::ZERO),
            Particle::new(1.0, DVec3::new(1e-110, 0.0, 0.0), DVec3::ZERO),
            Particle::new(1.0, DVec3::new(5.0, 0.0, 0.0), DVec3::ZERO),
        ])
        .unwrap();
        assert_eq!(
            initialize(&mut set, 0.0),
            Err(Error::NumericalSingularity { first: 0, second: 1 })
        );
        assert!(set.accelerations().iter().all(|a| a.is_finite()));

        // Stepping the same state anyway never lets NaN/inf in
        for _ in 0..3 {
            step(&mut set, 0.01, 0.0);
            assert!(set.accelerations().iter().all(|a| a.is_finite()));
            assert!(set.velocities().iter().all(|v| v.is_finite()));
            assert!(set.positions().iter().all(|x| x.is_finite()));
        }
        assert!(set.position(2).x < 5.0);
    }

    #[test]
    fn test_step_clamps_negative_softening() {
        let mut clamped = pair(2.0);
        let mut unsoftened = pair(2.0);
        initialize(&mut clamped, 0.0).unwrap();
        initialize(&mut unsoftened, 0.0).unwrap();

        step(&mut clamped, 0.01, -1.0);
        step(&mut unsoftened, 0.01, 0.0);
        assert_eq!(clamped, unsoftened);
        assert!(clamped.positions().iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_simulation_tracks_time() {
        let params = SimulationParams::new(0.25, 0.01).unwrap();
        let mut sim = Simulation::new(pair(2.0), params).unwrap();
        assert_eq!(sim.time(), 0.0);
        sim.run(4);
        assert_eq!(sim.steps(), 4);
        assert_eq!(sim.time(), 1.0);
        assert_eq!(sim.particles().len(), 2);
    }

    #[test]
    fn test_simulation_rejects_invalid_params() {
        let params = SimulationParams {
            time_step: 0.0,
            softening_squared: 0.01,
        };
        assert!(Simulation::new(pair(2.0), params).is_err());
    }

    #[test]
    fn test_empty_set_steps() {
        let set = ParticleSet::create(&[]).unwrap();
        let mut sim = Simulation::new(set, SimulationParams::default()).unwrap();
        sim.run(3);
        assert!(sim.particles().is_empty());
    }
}
