//! Orbit camera for viewing a simulation

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Camera matrices packed for upload to a GPU uniform
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub _padding: f32,
}

/// Camera orbiting a target point at a fixed distance
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub distance: f32,
    pub rotation: Quat,
    pub target: Vec3,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            distance: 10.0,
            rotation: Quat::from_rotation_x(-0.3),
            target: Vec3::ZERO,
            aspect: width as f32 / height as f32,
            fovy: 45.0_f32.to_radians(),
            znear: 0.01,
            zfar: 10000.0,
        }
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance.clamp(0.1, 50000.0);
        self
    }

    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    pub fn position(&self) -> Vec3 {
        let offset = self.rotation * Vec3::new(0.0, 0.0, self.distance);
        self.target + offset
    }

    /// World to camera space. The camera looks down its local -z axis.
    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-self.position());
        rotation_matrix * translation_matrix
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar);
        proj * self.view_matrix()
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.build_view_projection_matrix().to_cols_array_2d(),
            position: self.position().to_array(),
            _padding: 0.0,
        }
    }
}
