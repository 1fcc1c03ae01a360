//! Headless gravitational N-body simulation
//!
//! Loads initial conditions from a file (or generates a scenario), runs the
//! requested number of steps and reports where the first bodies ended up.

mod loader;
mod snapshot;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use nbody_physics::{Particle, ParticleSet, YEARS_PER_TIME_UNIT};
use nbody_simulation::{scenario, Simulation, SimulationParams};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ScenarioKind {
    /// Equal-mass circular binary
    Binary,
    /// Central mass with light bodies on circular orbits
    Orbits,
    /// Uniform ball of equal masses at rest
    Sphere,
}

#[derive(Parser, Debug)]
#[command(version, about = "Brute-force gravitational N-body simulation")]
struct Args {
    /// Number of steps to simulate
    steps: u64,

    /// Input file: `n h e2` header followed by `mass px py pz vx vy vz r g b radius` per particle
    #[arg(required_unless_present = "scenario", conflicts_with = "scenario")]
    input: Option<PathBuf>,

    /// Generate initial conditions instead of reading a file
    #[arg(long, value_enum)]
    scenario: Option<ScenarioKind>,

    /// Number of bodies for generated scenarios
    #[arg(short = 'n', long, default_value_t = 1000)]
    count: usize,

    /// Seed for generated scenarios
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Override the time step
    #[arg(long)]
    dt: Option<f64>,

    /// Override the squared softening length
    #[arg(long)]
    softening: Option<f64>,

    /// Log progress every K steps (0 disables)
    #[arg(long, default_value_t = 0)]
    report_every: u64,

    /// Write the final frame (camera + back-to-front instances) to this file
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Camera distance from the centre of mass for `--dump`
    #[arg(long, default_value_t = 10.0)]
    camera_distance: f32,
}

fn initial_conditions(args: &Args) -> Result<(Vec<Particle>, SimulationParams)> {
    let (particles, mut params) = match (&args.input, args.scenario) {
        (Some(path), _) => {
            let scene = loader::load_scene(path)?;
            (scene.particles, scene.params)
        }
        (None, Some(kind)) => {
            let particles = match kind {
                ScenarioKind::Binary => scenario::binary(1.0, 2.0),
                ScenarioKind::Orbits => scenario::circular_orbits(args.count, args.seed),
                ScenarioKind::Sphere => scenario::random_sphere(args.count, 5.0, args.seed),
            };
            log::info!("Generated {:?} scenario with {} particles", kind, particles.len());
            (particles, SimulationParams::default())
        }
        (None, None) => anyhow::bail!("either an input file or --scenario is required"),
    };

    if let Some(dt) = args.dt {
        params.time_step = dt;
    }
    if let Some(softening) = args.softening {
        params.softening_squared = softening;
    }
    Ok((particles, params))
}

fn report(sim: &Simulation, runtime: f64) {
    let particles = sim.particles();
    for (label, i) in [("First", 0), ("Second", 1)] {
        if i < particles.len() {
            let x = particles.position(i);
            println!("{label} particle: {} {} {}", x.x, x.y, x.z);
        }
    }
    println!(
        "Elapsed time: {} ({} years)",
        sim.time(),
        sim.time() * YEARS_PER_TIME_UNIT
    );
    if runtime > 0.0 {
        println!(
            "Ran {} steps in {:.3} s ({:.1} steps/s)",
            sim.steps(),
            runtime,
            sim.steps() as f64 / runtime
        );
    }
}

fn run(args: Args) -> Result<()> {
    let (particles, params) = initial_conditions(&args)?;
    let set = ParticleSet::create(&particles).context("invalid initial conditions")?;
    let mut sim = Simulation::new(set, params).context("cannot initialize simulation")?;

    let e0 = sim.energy();
    log::info!("Running without rendering for {} steps", args.steps);

    let start = Instant::now();
    for k in 1..=args.steps {
        sim.step();
        if args.report_every > 0 && k % args.report_every == 0 {
            log::info!(
                "step {k}: t = {:.6}, relative energy drift = {:.3e}",
                sim.time(),
                sim.energy().relative_drift(&e0)
            );
        }
    }
    let runtime = start.elapsed().as_secs_f64();

    log::info!(
        "Relative energy drift over run: {:.3e}",
        sim.energy().relative_drift(&e0)
    );
    report(&sim, runtime);

    if let Some(path) = &args.dump {
        let camera = snapshot::frame_camera(sim.particles(), args.camera_distance);
        snapshot::write_frame(path, sim.particles(), &camera)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting gravitational N-body simulation...");
    run(Args::parse())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_scenario_run() {
        let args = Args::try_parse_from(["nbody", "100", "--scenario", "orbits", "-n", "64"]).unwrap();
        assert_eq!(args.steps, 100);
        assert_eq!(args.scenario, Some(ScenarioKind::Orbits));
        assert_eq!(args.count, 64);

        let (particles, params) = initial_conditions(&args).unwrap();
        assert_eq!(particles.len(), 65);
        assert_eq!(params, SimulationParams::default());
    }

    #[test]
    fn test_cli_requires_input_or_scenario() {
        assert!(Args::try_parse_from(["nbody", "10"]).is_err());
        assert!(Args::try_parse_from(["nbody", "10", "galaxy.txt", "--scenario", "binary"]).is_err());
    }

    #[test]
    fn test_overrides_apply() {
        let args =
            Args::try_parse_from(["nbody", "1", "--scenario", "binary", "--dt", "0.5", "--softening", "0"])
                .unwrap();
        let (_, params) = initial_conditions(&args).unwrap();
        assert_eq!(params.time_step, 0.5);
        assert_eq!(params.softening_squared, 0.0);
    }

    #[test]
    fn test_headless_run() {
        let args = Args::try_parse_from(["nbody", "20", "--scenario", "sphere", "-n", "32"]).unwrap();
        assert!(run(args).is_ok());
    }
}
