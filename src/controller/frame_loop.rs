use std::time::Instant;

use glam::Mat4;

use crate::config::{Variant, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::controller::input::InputQueue;
use crate::model::{transform, Camera, TransformState};
use crate::utils::DrawMode;

/// Per-frame matrices, laid out to match `Uniforms` in cube.wgsl
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl FrameUniforms {
    pub fn new(model: Mat4, view: Mat4, projection: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
        }
    }
}

/// The single indexed draw issued every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub mode: DrawMode,
    pub index_count: u32,
}

/// Frame update state: the transform the input edits, the fixed camera and
/// the time origin the rotation angle is measured from
pub struct FrameLoopContext {
    pub variant: Variant,
    pub camera: Camera,
    pub transform: TransformState,
    draw_call: DrawCall,
    started: Instant,
}

impl FrameLoopContext {
    pub fn new(variant: Variant) -> Self {
        let mesh = variant.mesh();
        Self {
            variant,
            camera: Camera::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            transform: TransformState::new(),
            draw_call: DrawCall {
                mode: mesh.mode,
                index_count: mesh.index_count(),
            },
            started: Instant::now(),
        }
    }

    /// Seconds since the context was created
    pub fn elapsed_secs(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    /// Drain queued input into the transform. The wireframe cube takes no
    /// input, so its queue is emptied without effect.
    pub fn apply_input(&mut self, queue: &mut InputQueue) -> usize {
        if self.variant.accepts_input() {
            queue.drain_into(&mut self.transform)
        } else {
            queue.clear();
            0
        }
    }

    pub fn model_matrix(&self, time: f32) -> Mat4 {
        let base = if self.variant.uses_transform() {
            self.transform.base_matrix()
        } else {
            Mat4::IDENTITY
        };
        base * transform::rotation(time)
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.camera.projection()
    }

    pub fn uniforms(&self, time: f32) -> FrameUniforms {
        FrameUniforms::new(self.model_matrix(time), self.view_matrix(), self.projection_matrix())
    }

    /// Apply pending input, then derive this frame's matrices
    pub fn update(&mut self, queue: &mut InputQueue) -> FrameUniforms {
        self.apply_input(queue);
        self.uniforms(self.elapsed_secs())
    }

    pub fn draw_call(&self) -> DrawCall {
        self.draw_call
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::input::{CubeKey, InputEvent, KeyAction};
    use glam::{Vec3, Vec4};
    use std::f32::consts::PI;

    fn press(key: CubeKey) -> InputEvent {
        InputEvent::Key { key, action: KeyAction::Press }
    }

    #[test]
    fn test_wireframe_model_at_zero_is_identity() {
        let ctx = FrameLoopContext::new(Variant::Wireframe);
        assert!(ctx.model_matrix(0.0).abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_wireframe_model_half_turn() {
        let ctx = FrameLoopContext::new(Variant::Wireframe);
        // Half turn about n = (0.5, 1, 0) / |n| is 2nn^T - I
        let expected = Mat4::from_cols(
            Vec4::new(-0.6, 0.8, 0.0, 0.0),
            Vec4::new(0.8, 0.6, 0.0, 0.0),
            Vec4::new(0.0, 0.0, -1.0, 0.0),
            Vec4::W,
        );
        assert!(ctx.model_matrix(PI).abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_wireframe_ignores_input() {
        let mut ctx = FrameLoopContext::new(Variant::Wireframe);
        let mut queue = InputQueue::new();
        queue.push(press(CubeKey::W));
        queue.push(press(CubeKey::Up));

        assert_eq!(ctx.apply_input(&mut queue), 0);
        assert!(queue.is_empty());
        assert_eq!(ctx.transform, TransformState::new());
        assert!(ctx.model_matrix(1.0).abs_diff_eq(transform::rotation(1.0), 1e-6));
    }

    #[test]
    fn test_solid_model_composes_translate_scale_rotate() {
        let mut ctx = FrameLoopContext::new(Variant::Solid);
        let mut queue = InputQueue::new();
        for key in [CubeKey::D, CubeKey::D, CubeKey::W, CubeKey::Up, CubeKey::Up] {
            queue.push(press(key));
        }
        assert_eq!(ctx.apply_input(&mut queue), 5);

        let t = 0.75;
        let expected = Mat4::from_translation(Vec3::new(0.1, 0.05, 0.0))
            * Mat4::from_scale(Vec3::splat(1.1))
            * Mat4::from_axis_angle(Vec3::new(0.5, 1.0, 0.0).normalize(), t);
        assert!(ctx.model_matrix(t).abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_input_applies_before_matrices() {
        let mut ctx = FrameLoopContext::new(Variant::Solid);
        let mut queue = InputQueue::new();
        queue.push(press(CubeKey::W));

        let uniforms = ctx.update(&mut queue);
        // Column 3 holds the translation
        assert!((uniforms.model[3][1] - 0.05).abs() < 1e-6);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_view_and_projection_are_shared_constants() {
        let wire = FrameLoopContext::new(Variant::Wireframe);
        let mut solid = FrameLoopContext::new(Variant::Solid);
        solid.transform.apply_key(CubeKey::Down);

        let a = wire.uniforms(0.3);
        let b = solid.uniforms(12.0);
        assert_eq!(a.view, b.view);
        assert_eq!(a.projection, b.projection);

        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y);
        assert!(wire.view_matrix().abs_diff_eq(view, 1e-6));
        let proj = Mat4::perspective_rh(45f32.to_radians(), 4.0 / 3.0, 0.1, 100.0);
        assert!(solid.projection_matrix().abs_diff_eq(proj, 1e-6));
    }

    #[test]
    fn test_draw_calls() {
        let wire = FrameLoopContext::new(Variant::Wireframe).draw_call();
        assert_eq!(wire, DrawCall { mode: DrawMode::Lines, index_count: 24 });

        let solid = FrameLoopContext::new(Variant::Solid).draw_call();
        assert_eq!(solid, DrawCall { mode: DrawMode::Triangles, index_count: 36 });
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 192);
        let u = FrameUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY);
        assert_eq!(bytemuck::bytes_of(&u).len(), 192);
    }
}
