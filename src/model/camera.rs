use glam::{Mat4, Vec3};

use crate::config::{
    CAMERA_EYE, CAMERA_FOV_Y_DEG, CAMERA_TARGET, CAMERA_UP, CAMERA_Z_FAR, CAMERA_Z_NEAR,
};

/// Fixed look-at camera. Nothing mutates it after construction, so view and
/// projection are the same every frame.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            eye: CAMERA_EYE,
            target: CAMERA_TARGET,
            up: CAMERA_UP,
            fov_y: CAMERA_FOV_Y_DEG.to_radians(),
            aspect: width as f32 / height as f32,
            z_near: CAMERA_Z_NEAR,
            z_far: CAMERA_Z_FAR,
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    // wgpu clip space: depth in 0..1
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far)
    }
}
