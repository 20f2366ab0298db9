//! Wheel Accumulation

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::input::mouse::MouseState;

/// Wheel delta for one notch
pub const WHEEL_STEP: i32 = 120;

/// Wheel notch direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WheelDirection {
    /// Away from the user
    Up,
    /// Towards the user
    Down,
}

impl WheelDirection {
    /// Signed delta for one notch
    pub fn delta(self) -> i32 {
        match self {
            WheelDirection::Up => WHEEL_STEP,
            WheelDirection::Down => -WHEEL_STEP,
        }
    }
}

/// Folds wheel notches into the wheel axis
#[derive(Debug, Default)]
pub struct WheelAccumulator;

impl WheelAccumulator {
    /// Create a new accumulator
    pub fn new() -> Self {
        Self
    }

    /// Apply one notch to both components of the wheel axis
    pub fn on_wheel_event(&self, direction: WheelDirection, state: &mut MouseState) {
        let delta = direction.delta();
        state.z.rel += delta;
        state.z.abs += delta;

        trace!("Wheel {:?}: rel={} abs={}", direction, state.z.rel, state.z.abs);
    }
}
