//! Platform abstraction layer
//!
//! Turns raw browser/native signals into the two logical inputs the core
//! understands. Pointer presses and the designated key collapse into one
//! edge-triggered [`InputEvent::Activate`]; focus and visibility loss become
//! [`InputEvent::Suspend`].

use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Key that doubles the pointer press (`KeyboardEvent.key` naming)
pub const ACTIVATE_KEY: &str = " ";

/// A raw signal as delivered by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawInput {
    PointerDown,
    KeyDown { key: String },
    KeyUp { key: String },
    VisibilityHidden,
    VisibilityVisible,
    WindowBlur,
    WindowFocus,
}

/// Logical input consumed by [`crate::Game::handle_input`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// Start, flap, restart or resume, depending on the phase
    Activate,
    /// Focus or visibility lost
    Suspend,
}

/// Per-frame coalescing of raw signals
///
/// Signals are pushed as they arrive and drained once per frame. A held key
/// only counts on its first down edge, and at most one of each logical event
/// comes out of a frame.
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    key_held: bool,
    activate: bool,
    suspend: bool,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, raw: &RawInput) {
        match raw {
            RawInput::PointerDown => self.activate = true,
            RawInput::KeyDown { key } if key == ACTIVATE_KEY => {
                // Auto-repeat delivers further downs while held
                if !self.key_held {
                    self.key_held = true;
                    self.activate = true;
                }
            }
            RawInput::KeyUp { key } if key == ACTIVATE_KEY => self.key_held = false,
            RawInput::VisibilityHidden | RawInput::WindowBlur => {
                self.suspend = true;
                // The key-up will never reach us
                self.key_held = false;
            }
            _ => {}
        }
    }

    /// Logical events for this frame; activate is reported before suspend
    /// so a press and a focus loss in one frame never resume a pause
    pub fn drain(&mut self) -> Vec<InputEvent> {
        let mut out = Vec::with_capacity(2);
        if std::mem::take(&mut self.activate) {
            out.push(InputEvent::Activate);
        }
        if std::mem::take(&mut self.suspend) {
            out.push(InputEvent::Suspend);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_down() -> RawInput {
        RawInput::KeyDown {
            key: ACTIVATE_KEY.to_string(),
        }
    }

    fn key_up() -> RawInput {
        RawInput::KeyUp {
            key: ACTIVATE_KEY.to_string(),
        }
    }

    #[test]
    fn test_pointer_and_key_coalesce() {
        let mut mapper = InputMapper::new();
        mapper.push(&RawInput::PointerDown);
        mapper.push(&key_down());
        assert_eq!(mapper.drain(), vec![InputEvent::Activate]);
        assert!(mapper.drain().is_empty());
    }

    #[test]
    fn test_key_repeat_ignored() {
        let mut mapper = InputMapper::new();
        mapper.push(&key_down());
        mapper.drain();
        mapper.push(&key_down());
        mapper.push(&key_down());
        assert!(mapper.drain().is_empty());

        mapper.push(&key_up());
        mapper.push(&key_down());
        assert_eq!(mapper.drain(), vec![InputEvent::Activate]);
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut mapper = InputMapper::new();
        mapper.push(&RawInput::KeyDown {
            key: "Enter".to_string(),
        });
        assert!(mapper.drain().is_empty());
    }

    #[test]
    fn test_focus_loss_suspends() {
        let mut mapper = InputMapper::new();
        mapper.push(&RawInput::WindowBlur);
        mapper.push(&RawInput::VisibilityHidden);
        mapper.push(&RawInput::PointerDown);
        assert_eq!(
            mapper.drain(),
            vec![InputEvent::Activate, InputEvent::Suspend]
        );

        mapper.push(&RawInput::WindowFocus);
        mapper.push(&RawInput::VisibilityVisible);
        assert!(mapper.drain().is_empty());
    }
}
