//! # lamco-mouse
//!
//! Platform-independent mouse input core for windowed applications.
//!
//! The crate turns raw window-system pointer events into a stable mouse
//! state (absolute and relative position, wheel, button mask) while
//! enforcing a grab/hide policy that is suspended whenever the window loses
//! input focus. The window system itself is abstracted behind small traits,
//! so the same core runs against a real display connection or a scripted
//! event source.
//!
//! # Architecture
//!
//! ```text
//! lamco-mouse
//!   ├─> input   (motion, buttons, wheel, focus/grab state machine, capture loop)
//!   ├─> config  (TOML device and logging settings)
//!   ├─> replay  (scripted event source, JSON frame reports)
//!   └─> utils   (user-facing error formatting)
//! ```
//!
//! # Data Flow
//!
//! **Input Path:** Event source → MouseDevice::capture → Motion/Button/Wheel → MouseState
//!
//! **Control Path:** Focus query → FocusGrabController → Pointer commands → Event source

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Configuration loading and validation
pub mod config;

/// Mouse input core
pub mod input;

/// Scripted replay of recorded input
pub mod replay;

/// Utility functions
pub mod utils;
