//! Motion Tracking
//!
//! Turns absolute window-relative samples into relative motion. While the
//! pointer is confined, the absolute position is virtual: it integrates the
//! deltas and the platform cursor is re-centred whenever it drifts into the
//! edge margin, so motion never runs out of room.
//!
//! The re-centring warp itself shows up as a sample near (or at) the centre.
//! The centre is recorded as the last sample so it yields no delta, and
//! stale samples still sitting in the margin are dropped until the pointer
//! is seen outside it again.

use tracing::{debug, trace};

use crate::input::mouse::MouseState;

/// Distance from any window edge that counts as "at the edge"
pub const WARP_MARGIN: i32 = 5;

/// Last raw sample and whether it was produced by a warp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarpMemory {
    /// Last raw X sample
    pub last_x: i32,
    /// Last raw Y sample
    pub last_y: i32,
    /// A programmatic warp happened and has not been settled yet
    pub just_warped: bool,
}

/// Outcome of one raw sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionResult {
    /// X delta applied
    pub dx: i32,
    /// Y delta applied
    pub dy: i32,
    /// Sample was a duplicate or warp noise and changed nothing
    pub suppressed: bool,
    /// Re-centre the platform cursor here
    pub warp_to: Option<(i32, i32)>,
}

impl MotionResult {
    fn suppressed() -> Self {
        Self {
            suppressed: true,
            ..Self::default()
        }
    }
}

/// Check whether a raw sample lies in the edge margin of a `width` x `height` window
pub fn in_edge_margin(x: i32, y: i32, width: i32, height: i32) -> bool {
    x < WARP_MARGIN || x > width - WARP_MARGIN || y < WARP_MARGIN || y > height - WARP_MARGIN
}

/// Relative motion tracker
#[derive(Debug, Default)]
pub struct MotionTracker {
    memory: WarpMemory,
}

impl MotionTracker {
    /// Create a new tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw sample
    ///
    /// `confined` means the pointer is grabbed with focus held. A returned
    /// `warp_to` has already been recorded as the last sample; the caller only
    /// has to move the platform cursor.
    pub fn on_raw_position(
        &mut self,
        x: i32,
        y: i32,
        confined: bool,
        state: &mut MouseState,
    ) -> MotionResult {
        if x == self.memory.last_x && y == self.memory.last_y {
            return MotionResult::suppressed();
        }

        let at_edge = in_edge_margin(x, y, state.width, state.height);

        if self.memory.just_warped {
            if at_edge {
                trace!("Dropping post-warp sample ({}, {})", x, y);
                return MotionResult::suppressed();
            }
            self.memory.just_warped = false;
        }

        let (Some(dx), Some(dy)) = (
            x.checked_sub(self.memory.last_x),
            y.checked_sub(self.memory.last_y),
        ) else {
            trace!("Dropping out-of-range sample ({}, {})", x, y);
            return MotionResult::suppressed();
        };

        self.memory.last_x = x;
        self.memory.last_y = y;

        if confined {
            state.x.abs = state.x.abs.saturating_add(dx);
            state.y.abs = state.y.abs.saturating_add(dy);
        } else {
            state.x.abs = x;
            state.y.abs = y;
        }

        state.x.rel = state.x.rel.saturating_add(dx);
        state.y.rel = state.y.rel.saturating_add(dy);

        state.clamp_position();

        let mut warp_to = None;
        if confined && !self.memory.just_warped && at_edge {
            let center = (state.width >> 1, state.height >> 1);
            self.record_warp(center.0, center.1);
            debug!(
                "Pointer at edge ({}, {}), re-centring to ({}, {})",
                x, y, center.0, center.1
            );
            warp_to = Some(center);
        }

        MotionResult {
            dx,
            dy,
            suppressed: false,
            warp_to,
        }
    }

    /// Record a programmatic warp to `(x, y)`
    pub fn record_warp(&mut self, x: i32, y: i32) {
        self.memory.last_x = x;
        self.memory.last_y = y;
        self.memory.just_warped = true;
    }

    /// Current warp memory
    pub fn memory(&self) -> WarpMemory {
        self.memory
    }

    /// Forget the last sample and any pending warp
    pub fn reset(&mut self) {
        self.memory = WarpMemory::default();
    }
}
