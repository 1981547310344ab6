use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::{Variant, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::controller::{FrameLoopContext, InputQueue, KeyBindings};
use crate::error::LaunchError;
use crate::view::render::{FrameOutcome, RenderState};

/// Run one demo until its window is closed.
///
/// Window and GPU setup happen on the first `resumed`; a failure there ends
/// the loop and is returned here.
pub fn run(variant: Variant) -> Result<(), LaunchError> {
    tracing::info!(%variant, width = WINDOW_WIDTH, height = WINDOW_HEIGHT, "launching");

    let event_loop = EventLoop::new().map_err(LaunchError::WindowSystem)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(variant);
    event_loop.run_app(&mut app).map_err(LaunchError::EventLoop)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => {
            tracing::info!(frames = app.frame_count, "window closed");
            Ok(())
        }
    }
}

struct App {
    variant: Variant,
    render_state: Option<RenderState>,
    frame_loop: FrameLoopContext,
    input_queue: InputQueue,
    bindings: KeyBindings,
    error: Option<LaunchError>,
    frame_count: u64,
}

impl App {
    fn new(variant: Variant) -> Self {
        Self {
            variant,
            render_state: None,
            frame_loop: FrameLoopContext::new(variant),
            input_queue: InputQueue::new(),
            bindings: KeyBindings::default(),
            error: None,
            frame_count: 0,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<RenderState, LaunchError> {
        let window_attributes = Window::default_attributes()
            .with_title(self.variant.title())
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH as f64, WINDOW_HEIGHT as f64));
        let window = event_loop
            .create_window(window_attributes)
            .map_err(LaunchError::WindowCreation)?;
        let window = Arc::new(window);

        pollster::block_on(RenderState::new(window, self.variant))
    }

    fn input(&mut self, event: &KeyEvent) {
        if !self.variant.accepts_input() {
            return;
        }
        if let Some(ev) = self.bindings.translate_key(event.physical_key, event.state, event.repeat) {
            self.input_queue.push(ev);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_state) = self.render_state.as_mut() else {
            return;
        };

        let uniforms = self.frame_loop.update(&mut self.input_queue);
        let draw = self.frame_loop.draw_call();

        match render_state.draw_frame(&uniforms, &draw) {
            FrameOutcome::Presented => self.frame_count += 1,
            FrameOutcome::Reconfigured | FrameOutcome::Skipped => {}
            FrameOutcome::Fatal => event_loop.exit(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.render_state.is_some() {
            return;
        }

        match self.init_window(event_loop) {
            Ok(render_state) => {
                render_state.window.request_redraw();
                self.render_state = Some(render_state);
            }
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Continuous redraw; present blocks on vsync
        if let Some(render_state) = &self.render_state {
            render_state.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        match self.render_state.as_ref() {
            Some(rs) if rs.window.id() == window_id => {}
            _ => return,
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(new_size) => {
                if let Some(render_state) = self.render_state.as_mut() {
                    render_state.resize(new_size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.input(&event),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Release GPU resources before the window goes away
        self.render_state = None;
    }
}
