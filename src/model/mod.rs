// MODEL: Cube transform and camera
pub mod camera;
pub mod transform;

pub use camera::Camera;
pub use transform::TransformState;
