//! Platform Collaborators
//!
//! The window system, the focus query, the owning device manager and the
//! buffered-mode listener are all supplied by the embedding application.
//! The device only talks to them through these traits.

use serde::{Deserialize, Serialize};

use crate::input::error::Result;
use crate::input::mouse::{MouseButton, MouseState};

/// Raw window-system event kinds the device subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawEventKind {
    /// Pointer moved inside the window
    Motion,
    /// Pointer entered the window
    EnterRegion,
    /// Pointer left the window
    LeaveRegion,
    /// Button pressed
    ButtonDown,
    /// Button released
    ButtonUp,
}

/// Every kind the device needs delivered
pub const SUBSCRIBED_EVENTS: &[RawEventKind] = &[
    RawEventKind::Motion,
    RawEventKind::EnterRegion,
    RawEventKind::LeaveRegion,
    RawEventKind::ButtonDown,
    RawEventKind::ButtonUp,
];

/// Raw event as reported by the window system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Event kind
    pub kind: RawEventKind,
    /// Window-relative X coordinate
    #[serde(default)]
    pub x: i32,
    /// Window-relative Y coordinate
    #[serde(default)]
    pub y: i32,
    /// Platform button id (button events only)
    #[serde(default)]
    pub button: u32,
}

impl RawEvent {
    /// Pointer motion to `(x, y)`
    pub fn motion(x: i32, y: i32) -> Self {
        Self {
            kind: RawEventKind::Motion,
            x,
            y,
            button: 0,
        }
    }

    /// Button press with a platform button id
    pub fn button_down(button: u32) -> Self {
        Self {
            kind: RawEventKind::ButtonDown,
            x: 0,
            y: 0,
            button,
        }
    }

    /// Button release with a platform button id
    pub fn button_up(button: u32) -> Self {
        Self {
            kind: RawEventKind::ButtonUp,
            x: 0,
            y: 0,
            button,
        }
    }
}

/// Window-system event source and pointer control
pub trait EventSource {
    /// Ask the window system to deliver the given event kinds
    fn select_events(&mut self, kinds: &[RawEventKind]) -> Result<()>;

    /// Number of events ready to be read without blocking
    fn pending_count(&mut self) -> usize;

    /// Next queued event
    fn next_event(&mut self) -> Option<RawEvent>;

    /// Move the platform cursor to window coordinates
    fn warp_pointer_to(&mut self, x: i32, y: i32);

    /// Show or hide the platform cursor over the window
    fn set_cursor_visible(&mut self, visible: bool);

    /// Confine the platform pointer to the window
    fn grab_pointer(&mut self);

    /// Release the platform pointer
    fn ungrab_pointer(&mut self);
}

/// Input focus tracking
pub trait FocusQuery {
    /// Whether the window currently holding input focus is ours
    fn currently_focused_window_is_ours(&self) -> bool;

    /// Record that our window gained or lost focus
    fn set_window_focus(&mut self, focused: bool);
}

/// Owning device manager
pub trait DeviceManager {
    /// Confine the keyboard alongside the mouse
    ///
    /// Keeps focus-switch shortcuts reachable while the pointer is grabbed.
    fn set_keyboard_grab(&mut self, grab: bool);

    /// Register or release this device as the active mouse
    fn set_mouse_in_use(&mut self, in_use: bool);
}

/// Buffered-mode event listener
///
/// Button callbacks return `false` to stop processing the remaining events
/// of the current capture.
pub trait MouseListener {
    /// Pointer or wheel moved during the capture
    fn on_mouse_moved(&mut self, state: &MouseState);

    /// Button pressed
    fn on_button_down(&mut self, state: &MouseState, button: MouseButton) -> bool;

    /// Button released
    fn on_button_up(&mut self, state: &MouseState, button: MouseButton) -> bool;
}
