//! Frame dump for an external renderer
//!
//! The file holds one `CameraUniform` followed by the particles as
//! `RenderInstance` records in back-to-front order.

use anyhow::{Context, Result};
use nbody_simulation::center_of_mass;
use nbody_physics::ParticleSet;
use nbody_view::{depth_sorted_indices, instances_in_order, Camera, CameraUniform, RenderInstance};
use std::path::Path;

const FRAME_WIDTH: u32 = 1280;
const FRAME_HEIGHT: u32 = 720;

/// Camera aimed at the centre of mass of `set`
pub fn frame_camera(set: &ParticleSet, distance: f32) -> Camera {
    Camera::new(FRAME_WIDTH, FRAME_HEIGHT)
        .with_distance(distance)
        .with_target(center_of_mass(set).as_vec3())
}

pub fn encode_frame(set: &ParticleSet, camera: &Camera) -> (CameraUniform, Vec<RenderInstance>) {
    let order = depth_sorted_indices(set.positions(), &camera.view_matrix());
    (camera.to_uniform(), instances_in_order(set, &order))
}

pub fn write_frame(path: &Path, set: &ParticleSet, camera: &Camera) -> Result<()> {
    let (uniform, instances) = encode_frame(set, camera);
    let mut bytes = Vec::with_capacity(
        std::mem::size_of::<CameraUniform>() + std::mem::size_of_val(instances.as_slice()),
    );
    bytes.extend_from_slice(bytemuck::bytes_of(&uniform));
    bytes.extend_from_slice(bytemuck::cast_slice(&instances));

    std::fs::write(path, &bytes).with_context(|| format!("cannot write {}", path.display()))?;
    log::info!(
        "Wrote {} draw instances ({} bytes) to {}",
        instances.len(),
        bytes.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use nbody_physics::Particle;

    #[test]
    fn test_frame_is_back_to_front() {
        let set = ParticleSet::create(&[
            Particle::new(1.0, DVec3::new(0.0, 0.0, 2.0), DVec3::ZERO),
            Particle::new(1.0, DVec3::new(0.0, 0.0, -2.0), DVec3::ZERO),
            Particle::new(1.0, DVec3::ZERO, DVec3::ZERO),
        ])
        .unwrap();
        let mut camera = frame_camera(&set, 20.0);
        camera.rotation = glam::Quat::IDENTITY;

        // Camera sits on +z looking toward -z, so the particle at z = -2 is farthest
        let (_, instances) = encode_frame(&set, &camera);
        let zs: Vec<f32> = instances.iter().map(|i| i.position[2]).collect();
        assert_eq!(zs, vec![-2.0, 0.0, 2.0]);
    }
}
