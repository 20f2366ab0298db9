//! Button Translation
//!
//! Platform button ids follow the X11 numbering: 1 = left, 2 = middle,
//! 3 = right, and 4/5 are the two halves of a wheel notch. Canonical bit
//! order is Left, Right, Middle, so the mapping goes through a fixed table.

use tracing::trace;

use crate::input::mouse::{MouseButton, MouseState};
use crate::input::wheel::WheelDirection;

/// Canonical button for each platform id below 4
const BUTTON_TABLE: [Option<MouseButton>; 4] = [
    None,
    Some(MouseButton::Left),
    Some(MouseButton::Middle),
    Some(MouseButton::Right),
];

/// Platform id reported for a wheel notch up
pub const WHEEL_UP_ID: u32 = 4;

/// Platform id reported for a wheel notch down
pub const WHEEL_DOWN_ID: u32 = 5;

/// What a raw button event turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonOutcome {
    /// A canonical button changed state
    Button {
        /// Button that changed
        button: MouseButton,
        /// Pressed (true) or released (false)
        pressed: bool,
        /// Button mask after the change
        mask: u32,
    },
    /// Wheel notch to hand to the wheel accumulator
    Wheel(WheelDirection),
    /// Nothing to do
    Ignored,
}

/// Maps platform button ids onto the button mask
#[derive(Debug, Default)]
pub struct ButtonTranslator;

impl ButtonTranslator {
    /// Create a new translator
    pub fn new() -> Self {
        Self
    }

    /// Look up the canonical button for a platform id
    pub fn canonical(raw_id: u32) -> Option<MouseButton> {
        BUTTON_TABLE.get(raw_id as usize).copied().flatten()
    }

    /// Apply a raw button event to the mask
    ///
    /// Wheel ids never touch the mask; only their release carries a notch.
    pub fn on_button_event(
        &self,
        raw_id: u32,
        pressed: bool,
        state: &mut MouseState,
    ) -> ButtonOutcome {
        if let Some(button) = Self::canonical(raw_id) {
            if pressed {
                state.buttons |= button.mask();
            } else {
                state.buttons &= !button.mask();
            }

            trace!(
                "Button {:?} {} (mask={:#05b})",
                button,
                if pressed { "down" } else { "up" },
                state.buttons
            );

            return ButtonOutcome::Button {
                button,
                pressed,
                mask: state.buttons,
            };
        }

        match (raw_id, pressed) {
            (WHEEL_UP_ID, false) => ButtonOutcome::Wheel(WheelDirection::Up),
            (WHEEL_DOWN_ID, false) => ButtonOutcome::Wheel(WheelDirection::Down),
            (WHEEL_UP_ID | WHEEL_DOWN_ID, true) => ButtonOutcome::Ignored,
            _ => {
                trace!("Ignoring unknown button id {}", raw_id);
                ButtonOutcome::Ignored
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_mapping() {
        assert_eq!(ButtonTranslator::canonical(0), None);
        assert_eq!(ButtonTranslator::canonical(1), Some(MouseButton::Left));
        assert_eq!(ButtonTranslator::canonical(2), Some(MouseButton::Middle));
        assert_eq!(ButtonTranslator::canonical(3), Some(MouseButton::Right));
        assert_eq!(ButtonTranslator::canonical(4), None);
        assert_eq!(ButtonTranslator::canonical(9), None);
    }

    #[test]
    fn test_press_release_bits() {
        let translator = ButtonTranslator::new();
        let mut state = MouseState::new(640, 480);

        let outcome = translator.on_button_event(3, true, &mut state);
        assert_eq!(
            outcome,
            ButtonOutcome::Button {
                button: MouseButton::Right,
                pressed: true,
                mask: 0b010,
            }
        );

        translator.on_button_event(2, true, &mut state);
        assert_eq!(state.buttons, 0b110);

        translator.on_button_event(3, false, &mut state);
        assert_eq!(state.buttons, 0b100);
        assert!(state.button_down(MouseButton::Middle));
    }

    #[test]
    fn test_wheel_ids_leave_mask_alone() {
        let translator = ButtonTranslator::new();
        let mut state = MouseState::new(640, 480);

        assert_eq!(
            translator.on_button_event(4, true, &mut state),
            ButtonOutcome::Ignored
        );
        assert_eq!(
            translator.on_button_event(4, false, &mut state),
            ButtonOutcome::Wheel(WheelDirection::Up)
        );
        assert_eq!(
            translator.on_button_event(5, false, &mut state),
            ButtonOutcome::Wheel(WheelDirection::Down)
        );
        assert_eq!(state.buttons, 0);
    }

    #[test]
    fn test_unknown_ids_ignored() {
        let translator = ButtonTranslator::new();
        let mut state = MouseState::new(640, 480);

        for raw in [0, 6, 7, 255] {
            assert_eq!(
                translator.on_button_event(raw, true, &mut state),
                ButtonOutcome::Ignored
            );
        }
        assert_eq!(state.buttons, 0);
    }
}
