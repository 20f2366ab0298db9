//! Mouse Input Handling
//!
//! Platform-independent core of a window-system mouse driver. Raw pointer and
//! button events are turned into a stable [`MouseState`] while a grab
//! (pointer confinement) and hide (cursor visibility) policy is enforced
//! across focus changes.
//!
//! # Architecture
//!
//! ```text
//! Window-system events
//!       ↓
//! ┌─────────────────────────┐
//! │  MouseDevice            │ ← capture loop
//! │  - drains event source  │
//! │  - listener dispatch    │
//! └─────────────────────────┘
//!       ↓            ↓             ↓
//! ┌──────────┐ ┌───────────┐ ┌─────────────────┐
//! │  Motion  │ │  Button   │ │      Wheel      │
//! │ Tracker  │ │Translator │ │   Accumulator   │
//! └──────────┘ └───────────┘ └─────────────────┘
//!       ↓            ↓             ↓
//!              MouseState
//!       ↓
//! ┌─────────────────────────┐
//! │  FocusGrabController    │ ← grab / hide / focus-lost
//! └─────────────────────────┘
//!       ↓
//! Pointer commands (warp, grab, cursor visibility, keyboard grab)
//! ```
//!
//! # Confinement
//!
//! While grabbed, the absolute position is virtual: it integrates relative
//! motion, is clamped to the window, and the platform cursor is re-centred
//! whenever it comes within [`WARP_MARGIN`] of an edge. Without a grab the
//! absolute position simply mirrors the raw pointer.
//!
//! # Focus
//!
//! Losing focus shows the cursor and releases the grab, in that order.
//! Regaining it re-applies hide first and grab second. While focus is
//! elsewhere grab/hide requests are recorded but not applied.
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use lamco_mouse::input::{DeviceSettings, MouseDevice};
//!
//! let mut mouse = MouseDevice::new(DeviceSettings::default(), source, focus, manager)?;
//! loop {
//!     mouse.capture();
//!     let state = mouse.state();
//!     println!("at ({}, {}), moved ({}, {})", state.x.abs, state.y.abs, state.x.rel, state.y.rel);
//! }
//! ```

pub mod buttons;
pub mod device;
pub mod error;
pub mod focus;
pub mod motion;
pub mod mouse;
pub mod platform;
pub mod wheel;

pub use buttons::{ButtonOutcome, ButtonTranslator, WHEEL_DOWN_ID, WHEEL_UP_ID};
pub use device::{DeviceSettings, MouseDevice};
pub use error::{classify_error, ErrorType, MouseError, Result};
pub use focus::{
    Confinement, EffectiveState, FocusGrabController, GrabPolicy, PointerCommand, PointerState,
    Visibility,
};
pub use motion::{in_edge_margin, MotionResult, MotionTracker, WarpMemory, WARP_MARGIN};
pub use mouse::{Axis, MouseButton, MouseState};
pub use platform::{
    DeviceManager, EventSource, FocusQuery, MouseListener, RawEvent, RawEventKind,
    SUBSCRIBED_EVENTS,
};
pub use wheel::{WheelAccumulator, WheelDirection, WHEEL_STEP};
