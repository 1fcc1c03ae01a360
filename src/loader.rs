//! Text loader for initial conditions
//!
//! Format (whitespace separated, line breaks are not significant):
//!
//! ```text
//! <n> <h> <e2>
//! <mass> <px> <py> <pz> <vx> <vy> <vz> <r> <g> <b> <radius>    (n times)
//! ```

use anyhow::{bail, Context, Result};
use glam::{DVec3, Vec4};
use nbody_physics::Particle;
use nbody_simulation::SimulationParams;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

const PARTICLE_FIELDS: [&str; 11] = [
    "mass", "px", "py", "pz", "vx", "vy", "vz", "r", "g", "b", "radius",
];

/// Initial conditions read from a file
#[derive(Debug, Clone)]
pub struct Scene {
    pub params: SimulationParams,
    pub particles: Vec<Particle>,
}

pub fn load_scene(path: &Path) -> Result<Scene> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let scene = parse_scene(&text).with_context(|| format!("malformed input {}", path.display()))?;
    log::info!(
        "Loaded {} particles from {}",
        scene.particles.len(),
        path.display()
    );
    Ok(scene)
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl Tokens<'_> {
    fn next<T>(&mut self, what: &dyn Fn() -> String) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let Some(token) = self.inner.next() else {
            bail!("unexpected end of input, expected {}", what());
        };
        token
            .parse()
            .with_context(|| format!("invalid {}: {token:?}", what()))
    }
}

pub fn parse_scene(text: &str) -> Result<Scene> {
    let mut tokens = Tokens {
        inner: text.split_whitespace(),
    };

    let n: usize = tokens.next(&|| "particle count".to_string())?;
    let time_step: f64 = tokens.next(&|| "time step".to_string())?;
    let softening_squared: f64 = tokens.next(&|| "softening".to_string())?;
    let params = SimulationParams::new(time_step, softening_squared)?;

    let mut particles = Vec::with_capacity(n.min(1 << 20));
    for i in 0..n {
        let mut fields = [0.0_f64; PARTICLE_FIELDS.len()];
        for (value, name) in fields.iter_mut().zip(PARTICLE_FIELDS) {
            *value = tokens.next(&|| format!("field `{name}` of particle {i}"))?;
        }
        let [mass, px, py, pz, vx, vy, vz, r, g, b, radius] = fields;

        particles.push(
            Particle::new(mass, DVec3::new(px, py, pz), DVec3::new(vx, vy, vz))
                .with_color(Vec4::new(r as f32, g as f32, b as f32, 1.0))
                .with_radius(radius as f32),
        );
    }

    if tokens.inner.next().is_some() {
        log::warn!("Ignoring trailing data after {} particles", n);
    }

    Ok(Scene { params, particles })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_BODIES: &str = "2 0.01 0.01\n\
        1.0 -1 0 0  0 0 0  1 0.5 0.25 0.2\n\
        2.0  1 0 0  0 0.5 0  0 0 1 0.75\n";

    #[test]
    fn test_parse_two_bodies() {
        let scene = parse_scene(TWO_BODIES).unwrap();
        assert_eq!(scene.params, SimulationParams::new(0.01, 0.01).unwrap());
        assert_eq!(scene.particles.len(), 2);

        let p = scene.particles[1];
        assert_eq!(p.mass, 2.0);
        assert_eq!(p.position, DVec3::new(1.0, 0.0, 0.0));
        assert_eq!(p.velocity, DVec3::new(0.0, 0.5, 0.0));
        assert_eq!(p.color, Vec4::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(p.radius, 0.75);
        assert_eq!(scene.particles[0].color, Vec4::new(1.0, 0.5, 0.25, 1.0));
    }

    #[test]
    fn test_line_breaks_are_not_significant() {
        let flat = TWO_BODIES.replace('\n', " ");
        let scene = parse_scene(&flat).unwrap();
        assert_eq!(scene.particles.len(), 2);
    }

    #[test]
    fn test_truncated_input_names_the_field() {
        let err = parse_scene("2 0.01 0.01\n1 0 0 0 0 0 0 1 1 1 0.1\n1 0 0").unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("`pz` of particle 1"), "{msg}");
    }

    #[test]
    fn test_rejects_garbage_and_bad_header() {
        assert!(parse_scene("two 0.01 0.01").is_err());
        assert!(parse_scene("-1 0.01 0.01").is_err());
        assert!(parse_scene("1 0.0 0.01\n1 0 0 0 0 0 0 1 1 1 1").is_err());
        let err = parse_scene("1 0.01 0.01\n1 0 x 0 0 0 0 1 1 1 1").unwrap_err();
        assert!(format!("{err:#}").contains("`py`"));
    }
}
