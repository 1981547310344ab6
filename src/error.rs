use thiserror::Error;

/// Exit code for any launch failure
pub const FAILURE_EXIT_CODE: i32 = -1;

/// Failures that abort a demo before or during its event loop.
///
/// Everything past window creation (surface, adapter, device) counts as part
/// of creating the window's graphics context.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to initialize the windowing system: {0}")]
    WindowSystem(#[source] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    WindowCreation(#[source] winit::error::OsError),

    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("event loop terminated abnormally: {0}")]
    EventLoop(#[source] winit::error::EventLoopError),
}

impl LaunchError {
    pub fn exit_code(&self) -> i32 {
        FAILURE_EXIT_CODE
    }
}

/// Process exit code for the outcome of a run: 0 after a normal close, -1 on
/// any launch failure
pub fn exit_code(result: &Result<(), LaunchError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => e.exit_code(),
    }
}
