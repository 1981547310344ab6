use glam::{Mat4, Vec3};

use crate::config::{MOVE_STEP, ROTATION_AXIS, SCALE_STEP};
use crate::controller::input::{CubeKey, InputEvent};

/// Keyboard-edited placement of the cube.
///
/// Edits are unbounded: scale may reach zero or go negative and position may
/// drift arbitrarily far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub position: Vec3,
    pub scale: Vec3,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl TransformState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_key(&mut self, key: CubeKey) {
        match key {
            CubeKey::Up => self.scale += Vec3::splat(SCALE_STEP),
            CubeKey::Down => self.scale -= Vec3::splat(SCALE_STEP),
            CubeKey::W => self.position.y += MOVE_STEP,
            CubeKey::S => self.position.y -= MOVE_STEP,
            CubeKey::A => self.position.x -= MOVE_STEP,
            CubeKey::D => self.position.x += MOVE_STEP,
        }
    }

    /// Apply an input event. Returns true if the state changed.
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key { key, action } if action.is_active() => {
                self.apply_key(*key);
                true
            }
            InputEvent::Key { .. } => false,
        }
    }

    /// translate(position) * scale(scale)
    pub fn base_matrix(&self) -> Mat4 {
        // from_diagonal instead of from_scale: a zero scale is a legal state here
        Mat4::from_translation(self.position) * Mat4::from_diagonal(self.scale.extend(1.0))
    }
}

/// Rotation by `angle` radians about the fixed cube axis
pub fn rotation(angle: f32) -> Mat4 {
    Mat4::from_axis_angle(ROTATION_AXIS.normalize(), angle)
}
