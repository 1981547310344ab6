// CONTROLLER: Input queue and per-frame update
pub mod input;
pub mod frame_loop;

pub use input::{CubeKey, InputEvent, InputQueue, KeyAction, KeyBindings};
pub use frame_loop::{DrawCall, FrameLoopContext, FrameUniforms};
