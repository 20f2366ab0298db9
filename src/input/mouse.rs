//! Mouse State
//!
//! The canonical snapshot handed to listeners and pollers: X, Y and wheel
//! axes, the button bitmask and the confinement bounds.

use serde::Serialize;

/// Mouse button identifiers
///
/// The discriminant is the bit index inside [`MouseState::buttons`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum MouseButton {
    /// Left mouse button
    Left = 0,
    /// Right mouse button
    Right = 1,
    /// Middle mouse button
    Middle = 2,
}

impl MouseButton {
    /// Bit for this button in the button mask
    pub fn mask(self) -> u32 {
        1 << (self as u32)
    }
}

/// A single coordinate: absolute value and motion since the last capture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Axis {
    /// Absolute value
    pub abs: i32,
    /// Relative motion accumulated during the current capture
    pub rel: i32,
}

impl Axis {
    /// Zero both components
    pub fn clear(&mut self) {
        self.abs = 0;
        self.rel = 0;
    }
}

/// Mouse state snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MouseState {
    /// Horizontal axis
    pub x: Axis,
    /// Vertical axis
    pub y: Axis,
    /// Wheel axis (unbounded)
    pub z: Axis,
    /// One bit per [`MouseButton`]
    pub buttons: u32,
    /// Confinement width
    pub width: i32,
    /// Confinement height
    pub height: i32,
}

impl MouseState {
    /// Create a cleared state with the given bounds
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Reset axes and buttons, keeping the bounds
    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
        self.z.clear();
        self.buttons = 0;
    }

    /// Reset the relative components at the start of a capture
    pub fn clear_relative(&mut self) {
        self.x.rel = 0;
        self.y.rel = 0;
        self.z.rel = 0;
    }

    /// Check if button is currently pressed
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons & button.mask() != 0
    }

    /// Clamp the absolute position into `[0, width] x [0, height]`
    pub fn clamp_position(&mut self) {
        self.x.abs = self.x.abs.clamp(0, self.width.max(0));
        self.y.abs = self.y.abs.clamp(0, self.height.max(0));
    }

    /// Current absolute position
    pub fn position(&self) -> (i32, i32) {
        (self.x.abs, self.y.abs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_masks() {
        assert_eq!(MouseButton::Left.mask(), 1);
        assert_eq!(MouseButton::Right.mask(), 2);
        assert_eq!(MouseButton::Middle.mask(), 4);
    }

    #[test]
    fn test_button_down() {
        let mut state = MouseState::new(640, 480);
        state.buttons = MouseButton::Left.mask() | MouseButton::Middle.mask();

        assert!(state.button_down(MouseButton::Left));
        assert!(!state.button_down(MouseButton::Right));
        assert!(state.button_down(MouseButton::Middle));
    }

    #[test]
    fn test_clamp_position() {
        let mut state = MouseState::new(640, 480);
        state.x.abs = -20;
        state.y.abs = 900;
        state.clamp_position();
        assert_eq!(state.position(), (0, 480));
    }

    #[test]
    fn test_clear_keeps_bounds() {
        let mut state = MouseState::new(640, 480);
        state.x = Axis { abs: 5, rel: 3 };
        state.z = Axis { abs: 240, rel: 120 };
        state.buttons = 7;

        state.clear_relative();
        assert_eq!(state.x.abs, 5);
        assert_eq!(state.x.rel, 0);
        assert_eq!(state.z.rel, 0);

        state.clear();
        assert_eq!(state, MouseState::new(640, 480));
    }
}
