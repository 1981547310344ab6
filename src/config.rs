use glam::Vec3;

use crate::utils::{self, Mesh};

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const WINDOW_TITLE: &str = "OpenGL Cube";

/// Translation applied per W/S/A/D press or repeat
pub const MOVE_STEP: f32 = 0.05;
/// Uniform scale change per Up/Down press or repeat
pub const SCALE_STEP: f32 = 0.05;

/// Rotation axis, normalized before use. The angle is the elapsed time in seconds.
pub const ROTATION_AXIS: Vec3 = Vec3::new(0.5, 1.0, 0.0);

// Fixed camera
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 0.0, 3.0);
pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;
pub const CAMERA_UP: Vec3 = Vec3::Y;
pub const CAMERA_FOV_Y_DEG: f32 = 45.0;
pub const CAMERA_Z_NEAR: f32 = 0.1;
pub const CAMERA_Z_FAR: f32 = 100.0;

/// Which of the two demos is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Red line-list cube spinning in place, no input.
    Wireframe,
    /// Position-coloured solid cube; arrow keys scale it, WASD moves it.
    Solid,
}

impl Variant {
    pub fn title(&self) -> &'static str {
        WINDOW_TITLE
    }

    pub fn clear_color(&self) -> wgpu::Color {
        match self {
            Variant::Wireframe => wgpu::Color::BLACK,
            Variant::Solid => wgpu::Color::WHITE,
        }
    }

    pub fn mesh(&self) -> Mesh {
        match self {
            Variant::Wireframe => utils::wireframe_cube_mesh(),
            Variant::Solid => utils::solid_cube_mesh(),
        }
    }

    /// Whether keyboard edits reach the transform state
    pub fn accepts_input(&self) -> bool {
        matches!(self, Variant::Solid)
    }

    /// Whether the model matrix starts from translate(position) * scale(scale)
    /// instead of the identity
    pub fn uses_transform(&self) -> bool {
        matches!(self, Variant::Solid)
    }

    /// Fragment shader entry point in `cube.wgsl`
    pub fn fragment_entry(&self) -> &'static str {
        match self {
            Variant::Wireframe => "fs_wire",
            Variant::Solid => "fs_solid",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Wireframe => write!(f, "wireframe"),
            Variant::Solid => write!(f, "solid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::DrawMode;

    #[test]
    fn test_variant_meshes() {
        let wire = Variant::Wireframe.mesh();
        assert_eq!(wire.mode, DrawMode::Lines);
        assert_eq!(wire.indices.len(), 24);

        let solid = Variant::Solid.mesh();
        assert_eq!(solid.mode, DrawMode::Triangles);
        assert_eq!(solid.indices.len(), 36);
    }

    #[test]
    fn test_variant_surface() {
        assert_eq!(Variant::Wireframe.title(), "OpenGL Cube");
        assert_eq!(Variant::Solid.title(), "OpenGL Cube");
        assert_eq!(Variant::Wireframe.clear_color(), wgpu::Color::BLACK);
        assert_eq!(Variant::Solid.clear_color(), wgpu::Color::WHITE);
        assert!(!Variant::Wireframe.accepts_input());
        assert!(Variant::Solid.accepts_input());
    }
}
