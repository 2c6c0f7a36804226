//! Input mapping: raw keys and on-screen controls to game actions

use crate::game::Action;
use crate::sim::TickInput;

/// A directional control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
}

/// Where a press came from; each source is tracked separately so releasing
/// a key does not cancel a held touch button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Keyboard,
    Pointer,
}

/// Held directional controls
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    keyboard: [bool; 2],
    pointer: [bool; 2],
}

impl InputState {
    fn slot(&mut self, control: Control, source: InputSource) -> &mut bool {
        let held = match source {
            InputSource::Keyboard => &mut self.keyboard,
            InputSource::Pointer => &mut self.pointer,
        };
        match control {
            Control::Left => &mut held[0],
            Control::Right => &mut held[1],
        }
    }

    pub fn press(&mut self, control: Control, source: InputSource) {
        *self.slot(control, source) = true;
    }

    pub fn release(&mut self, control: Control, source: InputSource) {
        *self.slot(control, source) = false;
    }

    /// Drop everything (focus loss, restart)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.keyboard[0] || self.pointer[0],
            right: self.keyboard[1] || self.pointer[1],
        }
    }
}

/// Map a `KeyboardEvent.key` value to an action
pub fn key_action(key: &str, pressed: bool) -> Option<Action> {
    let directional = |control| {
        Some(if pressed {
            Action::Press(control, InputSource::Keyboard)
        } else {
            Action::Release(control, InputSource::Keyboard)
        })
    };

    match key {
        "ArrowLeft" | "a" | "A" => directional(Control::Left),
        "ArrowRight" | "d" | "D" => directional(Control::Right),
        _ if !pressed => None,
        "Enter" => Some(Action::Accept),
        "i" | "I" => Some(Action::ToggleDemo),
        "b" | "B" => Some(Action::ToggleBackground),
        "m" | "M" => Some(Action::ToggleMute),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_are_independent() {
        let mut input = InputState::default();
        input.press(Control::Left, InputSource::Keyboard);
        input.press(Control::Left, InputSource::Pointer);
        input.release(Control::Left, InputSource::Keyboard);
        assert!(input.tick_input().left);
        input.release(Control::Left, InputSource::Pointer);
        assert!(!input.tick_input().left);
    }

    #[test]
    fn test_clear() {
        let mut input = InputState::default();
        input.press(Control::Left, InputSource::Keyboard);
        input.press(Control::Right, InputSource::Pointer);
        input.clear();
        assert_eq!(input.tick_input(), TickInput::default());
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            key_action("ArrowLeft", true),
            Some(Action::Press(Control::Left, InputSource::Keyboard))
        );
        assert_eq!(
            key_action("d", false),
            Some(Action::Release(Control::Right, InputSource::Keyboard))
        );
        assert_eq!(key_action("Enter", true), Some(Action::Accept));
        assert_eq!(key_action("Enter", false), None);
        assert_eq!(key_action("I", true), Some(Action::ToggleDemo));
        assert_eq!(key_action("x", true), None);
    }
}
