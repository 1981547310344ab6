//! Keyboard input for the solid cube, queued by the window handler and
//! drained at the top of each frame
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::model::TransformState;

/// Keys the cube reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeKey {
    Up,
    Down,
    W,
    S,
    A,
    D,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Repeat,
    Release,
}

impl KeyAction {
    pub fn from_winit(state: ElementState, repeat: bool) -> Self {
        match state {
            ElementState::Pressed if repeat => KeyAction::Repeat,
            ElementState::Pressed => KeyAction::Press,
            ElementState::Released => KeyAction::Release,
        }
    }

    /// Press and Repeat edit the transform; Release does not.
    pub fn is_active(&self) -> bool {
        matches!(self, KeyAction::Press | KeyAction::Repeat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key { key: CubeKey, action: KeyAction },
}

/// Physical key mapping
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub scale_up: KeyCode,
    pub scale_down: KeyCode,
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            scale_up: KeyCode::ArrowUp,
            scale_down: KeyCode::ArrowDown,
            move_up: KeyCode::KeyW,
            move_down: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
        }
    }
}

impl KeyBindings {
    pub fn key_from_code(&self, code: KeyCode) -> Option<CubeKey> {
        if code == self.scale_up {
            Some(CubeKey::Up)
        } else if code == self.scale_down {
            Some(CubeKey::Down)
        } else if code == self.move_up {
            Some(CubeKey::W)
        } else if code == self.move_down {
            Some(CubeKey::S)
        } else if code == self.move_left {
            Some(CubeKey::A)
        } else if code == self.move_right {
            Some(CubeKey::D)
        } else {
            None
        }
    }

    /// Translate a winit key transition. Unbound and unidentified keys yield None.
    pub fn translate_key(
        &self,
        physical_key: PhysicalKey,
        state: ElementState,
        repeat: bool,
    ) -> Option<InputEvent> {
        let PhysicalKey::Code(code) = physical_key else {
            return None;
        };
        let key = self.key_from_code(code)?;
        Some(InputEvent::Key {
            key,
            action: KeyAction::from_winit(state, repeat),
        })
    }
}

/// Default-bindings shortcut
pub fn key_from_code(code: KeyCode) -> Option<CubeKey> {
    KeyBindings::default().key_from_code(code)
}

/// FIFO of input events awaiting the next frame
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Apply every queued event in arrival order, leaving the queue empty.
    /// Returns the number of events that changed the state.
    pub fn drain_into(&mut self, state: &mut TransformState) -> usize {
        let mut applied = 0;
        for event in self.events.drain(..) {
            if state.apply(&event) {
                applied += 1;
                tracing::debug!(
                    ?event,
                    position = ?state.position,
                    scale = ?state.scale,
                    "transform edited"
                );
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_default_bindings() {
        assert_eq!(key_from_code(KeyCode::ArrowUp), Some(CubeKey::Up));
        assert_eq!(key_from_code(KeyCode::ArrowDown), Some(CubeKey::Down));
        assert_eq!(key_from_code(KeyCode::KeyW), Some(CubeKey::W));
        assert_eq!(key_from_code(KeyCode::KeyS), Some(CubeKey::S));
        assert_eq!(key_from_code(KeyCode::KeyA), Some(CubeKey::A));
        assert_eq!(key_from_code(KeyCode::KeyD), Some(CubeKey::D));
        assert_eq!(key_from_code(KeyCode::ArrowLeft), None);
        assert_eq!(key_from_code(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_key_actions() {
        assert_eq!(KeyAction::from_winit(ElementState::Pressed, false), KeyAction::Press);
        assert_eq!(KeyAction::from_winit(ElementState::Pressed, true), KeyAction::Repeat);
        assert_eq!(KeyAction::from_winit(ElementState::Released, false), KeyAction::Release);
        assert!(KeyAction::Press.is_active());
        assert!(KeyAction::Repeat.is_active());
        assert!(!KeyAction::Release.is_active());
    }

    #[test]
    fn test_translate_key() {
        let bindings = KeyBindings::default();
        let ev = bindings.translate_key(PhysicalKey::Code(KeyCode::KeyD), ElementState::Pressed, true);
        assert_eq!(ev, Some(InputEvent::Key { key: CubeKey::D, action: KeyAction::Repeat }));

        let ev = bindings.translate_key(PhysicalKey::Code(KeyCode::Space), ElementState::Pressed, false);
        assert_eq!(ev, None);
    }

    #[test]
    fn test_drain_applies_in_order_and_empties() {
        let bindings = KeyBindings::default();
        let mut queue = InputQueue::new();
        let transitions = [
            (KeyCode::KeyW, ElementState::Pressed, false),
            (KeyCode::KeyW, ElementState::Pressed, true),
            (KeyCode::KeyW, ElementState::Released, false),
            (KeyCode::ArrowUp, ElementState::Pressed, false),
            (KeyCode::ArrowUp, ElementState::Released, false),
            (KeyCode::KeyA, ElementState::Pressed, false),
        ];
        for (code, state, repeat) in transitions {
            if let Some(ev) = bindings.translate_key(PhysicalKey::Code(code), state, repeat) {
                queue.push(ev);
            }
        }
        assert_eq!(queue.len(), 6);

        let mut state = TransformState::new();
        let applied = queue.drain_into(&mut state);
        assert_eq!(applied, 4);
        assert!(queue.is_empty());
        assert!(state.position.abs_diff_eq(Vec3::new(-0.05, 0.10, 0.0), 1e-6));
        assert!(state.scale.abs_diff_eq(Vec3::splat(1.05), 1e-6));

        // A second drain is a no-op
        assert_eq!(queue.drain_into(&mut state), 0);
    }

    #[test]
    fn test_custom_bindings() {
        let bindings = KeyBindings {
            move_up: KeyCode::KeyI,
            ..KeyBindings::default()
        };
        assert_eq!(bindings.key_from_code(KeyCode::KeyI), Some(CubeKey::W));
        assert_eq!(bindings.key_from_code(KeyCode::KeyW), None);
    }
}
