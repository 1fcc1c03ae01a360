//! Back-to-front ordering for alpha-blended particle sprites

use glam::Mat4;
use nbody_physics::Vec3Column;

/// Camera-space z of every position under `view`
pub fn view_depths(positions: &Vec3Column, view: &Mat4) -> Vec<f32> {
    let row = view.row(2);
    positions
        .iter()
        .map(|x| row.dot(x.as_vec3().extend(1.0)))
        .collect()
}

/// Particle indices sorted by ascending camera-space z.
///
/// With a right-handed view looking down -z this is farthest first, the
/// order transparent sprites must be drawn in. Ties keep index order.
pub fn depth_sorted_indices(positions: &Vec3Column, view: &Mat4) -> Vec<usize> {
    let depths = view_depths(positions, view);
    let mut indices: Vec<usize> = (0..depths.len()).collect();
    indices.sort_by(|&a, &b| depths[a].total_cmp(&depths[b]));
    indices
}
