//! Event Script Replay
//!
//! Drives a [`MouseDevice`] from a recorded JSON script instead of a live
//! window system. Each frame queues raw events, sets the focus flag, applies
//! optional grab/hide/position requests and runs one capture. Every platform
//! operation the device performs is recorded and reported per frame.
//!
//! # Script Format
//!
//! ```json
//! {
//!   "frames": [
//!     { "events": [{ "kind": "motion", "x": 10, "y": 10 }] },
//!     { "focused": false },
//!     { "grab": false, "set_position": [100, 120] },
//!     { "events": [{ "kind": "button_down", "button": 1 }] }
//!   ]
//! }
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::input::{
    DeviceManager, DeviceSettings, EffectiveState, EventSource, FocusQuery, MouseButton,
    MouseDevice, MouseError, MouseListener, MouseState, RawEvent, RawEventKind,
};

/// Recorded input session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// Frames in capture order
    #[serde(default)]
    pub frames: Vec<Frame>,
}

/// Everything that happens before one capture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Whether our window holds focus during this frame
    #[serde(default = "default_focused")]
    pub focused: bool,

    /// Grab request issued before the capture
    #[serde(default)]
    pub grab: Option<bool>,

    /// Hide request issued before the capture
    #[serde(default)]
    pub hide: Option<bool>,

    /// Pointer move issued before the capture
    #[serde(default)]
    pub set_position: Option<[i32; 2]>,

    /// Raw events queued for the capture
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

fn default_focused() -> bool {
    true
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            focused: true,
            grab: None,
            hide: None,
            set_position: None,
            events: Vec::new(),
        }
    }
}

impl Script {
    /// Parse a script from JSON text
    pub fn from_json(text: &str) -> crate::input::Result<Self> {
        serde_json::from_str(text).map_err(|e| MouseError::InvalidScript(e.to_string()))
    }

    /// Load a script file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(MouseError::from)
            .with_context(|| format!("Failed to read script file: {}", path.display()))?;
        let script = Self::from_json(&text)
            .with_context(|| format!("Failed to parse script file: {}", path.display()))?;
        debug!("Loaded script with {} frames", script.frames.len());
        Ok(script)
    }
}

/// Platform operation observed during replay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum PlatformCall {
    /// Event kinds subscribed
    SelectEvents,
    /// Cursor warped
    Warp {
        /// X
        x: i32,
        /// Y
        y: i32,
    },
    /// Cursor shown or hidden
    CursorVisible {
        /// Visibility
        visible: bool,
    },
    /// Pointer grabbed
    GrabPointer,
    /// Pointer released
    UngrabPointer,
    /// Keyboard grab toggled
    KeyboardGrab {
        /// Grab state
        grab: bool,
    },
    /// Mouse-in-use registration toggled
    MouseInUse {
        /// Registration state
        in_use: bool,
    },
}

/// Shared, ordered record of platform calls
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<PlatformCall>>>);

impl CallLog {
    fn push(&self, call: PlatformCall) {
        debug!("Platform call: {:?}", call);
        self.0.borrow_mut().push(call);
    }

    /// Remove and return everything recorded so far
    pub fn take(&self) -> Vec<PlatformCall> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// In-memory event source fed from script frames
#[derive(Debug)]
pub struct ScriptedEventSource {
    queue: VecDeque<RawEvent>,
    log: CallLog,
}

impl ScriptedEventSource {
    /// Create an empty source writing to `log`
    pub fn new(log: CallLog) -> Self {
        Self {
            queue: VecDeque::new(),
            log,
        }
    }

    /// Queue events for the next capture
    pub fn push_events(&mut self, events: &[RawEvent]) {
        self.queue.extend(events.iter().copied());
    }

    /// Events not yet consumed
    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}

impl EventSource for ScriptedEventSource {
    fn select_events(&mut self, _kinds: &[RawEventKind]) -> crate::input::Result<()> {
        self.log.push(PlatformCall::SelectEvents);
        Ok(())
    }

    fn pending_count(&mut self) -> usize {
        self.queue.len()
    }

    fn next_event(&mut self) -> Option<RawEvent> {
        self.queue.pop_front()
    }

    fn warp_pointer_to(&mut self, x: i32, y: i32) {
        self.log.push(PlatformCall::Warp { x, y });
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.log.push(PlatformCall::CursorVisible { visible });
    }

    fn grab_pointer(&mut self) {
        self.log.push(PlatformCall::GrabPointer);
    }

    fn ungrab_pointer(&mut self) {
        self.log.push(PlatformCall::UngrabPointer);
    }
}

/// Focus flag set by the script
#[derive(Debug, Clone, Copy)]
pub struct ScriptedFocus {
    focused: bool,
}

impl ScriptedFocus {
    /// Start with the given focus state
    pub fn new(focused: bool) -> Self {
        Self { focused }
    }
}

impl FocusQuery for ScriptedFocus {
    fn currently_focused_window_is_ours(&self) -> bool {
        self.focused
    }

    fn set_window_focus(&mut self, focused: bool) {
        self.focused = focused;
    }
}

/// Device manager that only records what it is asked to do
#[derive(Debug)]
pub struct ScriptedManager {
    log: CallLog,
}

impl ScriptedManager {
    /// Create a manager writing to `log`
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl DeviceManager for ScriptedManager {
    fn set_keyboard_grab(&mut self, grab: bool) {
        self.log.push(PlatformCall::KeyboardGrab { grab });
    }

    fn set_mouse_in_use(&mut self, in_use: bool) {
        self.log.push(PlatformCall::MouseInUse { in_use });
    }
}

/// Buffered listener that logs dispatches and never stops processing
struct LoggingListener;

impl MouseListener for LoggingListener {
    fn on_mouse_moved(&mut self, state: &MouseState) {
        debug!(
            "mouse moved: abs=({}, {}) rel=({}, {}, {})",
            state.x.abs, state.y.abs, state.x.rel, state.y.rel, state.z.rel
        );
    }

    fn on_button_down(&mut self, _state: &MouseState, button: MouseButton) -> bool {
        debug!("button down: {:?}", button);
        true
    }

    fn on_button_up(&mut self, _state: &MouseState, button: MouseButton) -> bool {
        debug!("button up: {:?}", button);
        true
    }
}

/// State after one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    /// Frame index
    pub frame: usize,
    /// Mouse state after the capture
    pub state: MouseState,
    /// Applied grab/hide/focus state after the capture
    pub effective: EffectiveState,
    /// Platform calls made during the frame
    pub calls: Vec<PlatformCall>,
}

/// Result of a full replay
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Platform calls made while opening the device
    pub initialization: Vec<PlatformCall>,
    /// Per-frame results
    pub frames: Vec<FrameReport>,
    /// Platform calls made while releasing the device
    pub teardown: Vec<PlatformCall>,
}

/// Run a script through a fresh device
///
/// The device sees the first frame's focus flag at initialization.
pub fn run(settings: DeviceSettings, script: &Script) -> Result<ReplayReport> {
    let log = CallLog::default();
    let initially_focused = script.frames.first().map_or(true, |frame| frame.focused);

    let mut device = MouseDevice::new(
        settings,
        ScriptedEventSource::new(log.clone()),
        ScriptedFocus::new(initially_focused),
        ScriptedManager::new(log.clone()),
    )
    .context("Failed to initialize mouse device")?;
    device.set_listener(Some(Box::new(LoggingListener)));

    let initialization = log.take();
    let mut frames = Vec::with_capacity(script.frames.len());

    for (index, frame) in script.frames.iter().enumerate() {
        device.focus_mut().set_window_focus(frame.focused);
        if let Some(grab) = frame.grab {
            device.grab(grab);
        }
        if let Some(hide) = frame.hide {
            device.hide(hide);
        }
        if let Some([x, y]) = frame.set_position {
            device.set_position(x, y);
        }

        device.source_mut().push_events(&frame.events);
        device.capture();

        let leftover = device.source().queued();
        if leftover > 0 {
            debug!("Frame {}: {} events left for the next capture", index, leftover);
        }

        frames.push(FrameReport {
            frame: index,
            state: device.state().clone(),
            effective: device.effective(),
            calls: log.take(),
        });
    }

    drop(device);
    let teardown = log.take();

    info!("Replayed {} frames", frames.len());

    Ok(ReplayReport {
        initialization,
        frames,
        teardown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> DeviceSettings {
        DeviceSettings::default()
    }

    #[test]
    fn test_parse_defaults() {
        let script =
            Script::from_json(r#"{"frames":[{"events":[{"kind":"motion","x":3,"y":4}]},{}]}"#)
                .unwrap();

        assert_eq!(script.frames.len(), 2);
        assert!(script.frames[0].focused);
        assert_eq!(script.frames[0].events, vec![RawEvent::motion(3, 4)]);
        assert_eq!(script.frames[1], Frame::default());
    }

    #[test]
    fn test_parse_error_is_script_error() {
        let err = Script::from_json("{\"frames\": [").unwrap_err();
        assert!(matches!(err, MouseError::InvalidScript(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Script::load("/nonexistent/script.json").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read script file"));
    }

    #[test]
    fn test_load_from_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"frames":[{"focused":false}]}"#).unwrap();

        let script = Script::load(file.path()).unwrap();
        assert!(!script.frames[0].focused);
    }

    #[test]
    fn test_initialization_and_teardown_calls() {
        let report = run(settings(), &Script::default()).unwrap();

        assert_eq!(
            report.initialization,
            vec![
                PlatformCall::SelectEvents,
                PlatformCall::MouseInUse { in_use: true },
                PlatformCall::CursorVisible { visible: false },
                PlatformCall::KeyboardGrab { grab: true },
                PlatformCall::GrabPointer,
            ]
        );
        assert_eq!(
            report.teardown,
            vec![
                PlatformCall::CursorVisible { visible: true },
                PlatformCall::KeyboardGrab { grab: false },
                PlatformCall::UngrabPointer,
                PlatformCall::Warp { x: 0, y: 0 },
                PlatformCall::MouseInUse { in_use: false },
            ]
        );
    }

    #[test]
    fn test_focus_loss_frame() {
        let script = Script {
            frames: vec![
                Frame {
                    events: vec![RawEvent::motion(10, 10), RawEvent::motion(20, 15)],
                    ..Frame::default()
                },
                Frame {
                    focused: false,
                    ..Frame::default()
                },
            ],
        };

        let report = run(settings(), &script).unwrap();

        assert_eq!(report.frames[0].state.position(), (20, 15));
        assert!(report.frames[0].effective.grabbed);

        let lost = &report.frames[1];
        assert!(lost.effective.focus_lost);
        assert!(!lost.effective.grabbed);
        assert!(!lost.effective.hidden);
        assert_eq!(
            lost.calls,
            vec![
                PlatformCall::CursorVisible { visible: true },
                PlatformCall::KeyboardGrab { grab: false },
                PlatformCall::UngrabPointer,
                PlatformCall::Warp { x: 0, y: 0 },
            ]
        );
    }

    #[test]
    fn test_wheel_and_buttons_frame() {
        let script = Script::from_json(
            r#"{"frames":[{"events":[
                {"kind":"button_down","button":1},
                {"kind":"button_down","button":4},
                {"kind":"button_up","button":4}
            ]}]}"#,
        )
        .unwrap();

        let report = run(settings(), &script).unwrap();
        let state = &report.frames[0].state;

        assert!(state.button_down(MouseButton::Left));
        assert_eq!(state.z.rel, 120);
        assert_eq!(state.z.abs, 120);
    }

    #[test]
    fn test_report_serializes() {
        let report = run(settings(), &Script::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["initialization"][0]["op"], "select_events");
        assert_eq!(json["teardown"][4]["op"], "mouse_in_use");
    }
}
