//! Packed per-particle draw data

use bytemuck::{Pod, Zeroable};
use nbody_physics::ParticleSet;

/// One sprite: world position, radius and RGBA color (matches a WGSL
/// `vec3<f32>, f32, vec4<f32>` instance layout)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
}

impl RenderInstance {
    pub fn from_particle(set: &ParticleSet, i: usize) -> Self {
        Self {
            position: set.position(i).as_vec3().to_array(),
            radius: set.radius(i),
            color: set.color(i).to_array(),
        }
    }
}

/// Instances for the given draw order (typically from
/// [`depth_sorted_indices`](crate::depth_sorted_indices))
pub fn instances_in_order(set: &ParticleSet, order: &[usize]) -> Vec<RenderInstance> {
    order
        .iter()
        .map(|&i| RenderInstance::from_particle(set, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec3, Vec4};
    use nbody_physics::Particle;

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), 32);
    }

    #[test]
    fn test_instances_follow_order() {
        let set = ParticleSet::create(&[
            Particle::new(1.0, DVec3::new(1.0, 2.0, 3.0), DVec3::ZERO).with_radius(0.5),
            Particle::new(1.0, DVec3::new(-1.0, 0.0, 0.0), DVec3::ZERO)
                .with_color(Vec4::new(1.0, 0.0, 0.0, 0.5)),
        ])
        .unwrap();

        let instances = instances_in_order(&set, &[1, 0]);
        assert_eq!(instances[0].position, [-1.0, 0.0, 0.0]);
        assert_eq!(instances[0].color, [1.0, 0.0, 0.0, 0.5]);
        assert_eq!(instances[1].radius, 0.5);

        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 64);
    }
}
