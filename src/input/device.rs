//! Mouse Device
//!
//! Per-frame capture loop tying the pieces together. Each [`MouseDevice::capture`]
//! clears the relative axes, drains whatever the event source has queued,
//! reports motion to the listener (buffered mode) and finally lets the
//! focus controller follow focus changes.
//!
//! Everything runs on the caller's thread. Draining never blocks: it stops as
//! soon as the source reports nothing pending, or when a buffered listener
//! asks to stop, in which case the rest of the queue waits for the next
//! capture.

use tracing::{debug, info, trace};

use crate::input::buttons::{ButtonOutcome, ButtonTranslator};
use crate::input::error::{MouseError, Result};
use crate::input::focus::{EffectiveState, FocusGrabController, GrabPolicy, PointerCommand};
use crate::input::motion::{MotionTracker, WarpMemory};
use crate::input::mouse::{MouseButton, MouseState};
use crate::input::platform::{
    DeviceManager, EventSource, FocusQuery, MouseListener, RawEventKind, SUBSCRIBED_EVENTS,
};
use crate::input::wheel::WheelAccumulator;

/// Construction-time device settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSettings {
    /// Dispatch events to a listener instead of polling
    pub buffered: bool,
    /// Confine the pointer to the window
    pub grab: bool,
    /// Hide the cursor over the window
    pub hide: bool,
    /// Window width
    pub width: i32,
    /// Window height
    pub height: i32,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            buffered: true,
            grab: true,
            hide: true,
            width: 640,
            height: 480,
        }
    }
}

/// Mouse device over a window-system event source
pub struct MouseDevice<S, F, M>
where
    S: EventSource,
    F: FocusQuery,
    M: DeviceManager,
{
    source: S,
    focus: F,
    manager: M,

    state: MouseState,
    motion: MotionTracker,
    buttons: ButtonTranslator,
    wheel: WheelAccumulator,
    controller: FocusGrabController,

    buffered: bool,
    listener: Option<Box<dyn MouseListener>>,

    /// Motion or wheel activity since the last dispatch
    moved: bool,
}

impl<S, F, M> MouseDevice<S, F, M>
where
    S: EventSource,
    F: FocusQuery,
    M: DeviceManager,
{
    /// Open the event source and create the device
    pub fn connect<C>(settings: DeviceSettings, connect: C, focus: F, manager: M) -> Result<Self>
    where
        C: FnOnce() -> Result<S>,
    {
        let source = connect()?;
        Self::new(settings, source, focus, manager)
    }

    /// Create the device over an already opened event source
    ///
    /// Subscribes to pointer events, registers with the device manager and
    /// applies the grab/hide policy if our window has focus.
    pub fn new(settings: DeviceSettings, mut source: S, focus: F, mut manager: M) -> Result<Self> {
        validate_bounds(settings.width, settings.height)?;

        source.select_events(SUBSCRIBED_EVENTS)?;
        manager.set_mouse_in_use(true);

        let mut device = Self {
            source,
            focus,
            manager,
            state: MouseState::new(settings.width, settings.height),
            motion: MotionTracker::new(),
            buttons: ButtonTranslator::new(),
            wheel: WheelAccumulator::new(),
            controller: FocusGrabController::new(GrabPolicy {
                grab: settings.grab,
                hide: settings.hide,
            }),
            buffered: settings.buffered,
            listener: None,
            moved: false,
        };

        let has_focus = device.focus.currently_focused_window_is_ours();
        let commands = device
            .controller
            .initialize(has_focus, device.state.position());
        device.execute(commands);

        info!(
            "Mouse device initialized: {}x{} (buffered={}, grab={}, hide={}, focused={})",
            settings.width, settings.height, settings.buffered, settings.grab, settings.hide, has_focus
        );

        Ok(device)
    }

    /// Process everything that happened since the last capture
    pub fn capture(&mut self) {
        self.state.clear_relative();

        self.process_events();

        if self.moved {
            if self.buffered {
                if let Some(listener) = self.listener.as_mut() {
                    listener.on_mouse_moved(&self.state);
                }
            }
            self.moved = false;
        }

        let has_focus = self.focus.currently_focused_window_is_ours();
        let commands = self.controller.reconcile(has_focus, self.state.position());
        self.execute(commands);
    }

    /// Request or drop pointer confinement
    pub fn grab(&mut self, grab: bool) {
        let commands = self.controller.set_grab_policy(grab, self.state.position());
        self.execute(commands);
    }

    /// Request or drop cursor hiding
    pub fn hide(&mut self, hide: bool) {
        let commands = self.controller.set_hide_policy(hide);
        self.execute(commands);
    }

    /// Move the pointer
    ///
    /// While confined only the virtual position moves, and the restore point
    /// moves with it: a later release warps the cursor to this new position,
    /// not to the position the grab started from. Otherwise the platform
    /// cursor is warped. Ignored while focus is elsewhere.
    pub fn set_position(&mut self, x: i32, y: i32) {
        if self.controller.is_focus_lost() {
            return;
        }

        self.state.x.abs = x;
        self.state.y.abs = y;
        self.state.clamp_position();
        let (x, y) = self.state.position();

        if self.controller.is_confined() {
            self.controller.set_restore_point(x, y);
        } else {
            self.source.warp_pointer_to(x, y);
            self.motion.record_warp(x, y);
        }
        debug!("Pointer position set to ({}, {})", x, y);
    }

    /// Update the confinement bounds after a window resize
    pub fn set_bounds(&mut self, width: i32, height: i32) -> Result<()> {
        validate_bounds(width, height)?;
        self.state.width = width;
        self.state.height = height;
        self.state.clamp_position();
        debug!("Mouse bounds set to {}x{}", width, height);
        Ok(())
    }

    /// Switch between buffered dispatch and polling
    pub fn set_buffered(&mut self, buffered: bool) {
        self.buffered = buffered;
    }

    /// Whether events are dispatched to the listener
    pub fn buffered(&self) -> bool {
        self.buffered
    }

    /// Install or remove the buffered-mode listener
    pub fn set_listener(&mut self, listener: Option<Box<dyn MouseListener>>) {
        self.listener = listener;
    }

    /// Current mouse state
    pub fn state(&self) -> &MouseState {
        &self.state
    }

    /// Applied grab/hide/focus state
    pub fn effective(&self) -> EffectiveState {
        self.controller.effective()
    }

    /// Requested grab/hide state
    pub fn policy(&self) -> GrabPolicy {
        self.controller.policy()
    }

    /// Last raw sample and warp flag
    pub fn warp_memory(&self) -> WarpMemory {
        self.motion.memory()
    }

    /// Event source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Event source, mutably
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Focus collaborator
    pub fn focus(&self) -> &F {
        &self.focus
    }

    /// Focus collaborator, mutably
    pub fn focus_mut(&mut self) -> &mut F {
        &mut self.focus
    }

    /// Device manager
    pub fn manager(&self) -> &M {
        &self.manager
    }

    /// Device manager, mutably
    pub fn manager_mut(&mut self) -> &mut M {
        &mut self.manager
    }

    fn process_events(&mut self) {
        while self.source.pending_count() > 0 {
            let Some(event) = self.source.next_event() else {
                break;
            };

            let keep_going = match event.kind {
                RawEventKind::Motion | RawEventKind::EnterRegion | RawEventKind::LeaveRegion => {
                    self.inject_motion(event.x, event.y);
                    true
                }
                RawEventKind::ButtonDown => {
                    // A press means our window has focus
                    self.focus.set_window_focus(true);
                    self.inject_button(event.button, true)
                }
                RawEventKind::ButtonUp => self.inject_button(event.button, false),
            };

            if !keep_going {
                debug!("Listener stopped event processing for this capture");
                return;
            }
        }
    }

    fn inject_motion(&mut self, x: i32, y: i32) {
        let confined = self.controller.is_confined();
        let result = self.motion.on_raw_position(x, y, confined, &mut self.state);
        if result.suppressed {
            return;
        }

        if let Some((cx, cy)) = result.warp_to {
            self.source.warp_pointer_to(cx, cy);
        }
        self.moved = true;
    }

    fn inject_button(&mut self, raw_id: u32, pressed: bool) -> bool {
        match self.buttons.on_button_event(raw_id, pressed, &mut self.state) {
            ButtonOutcome::Button {
                button, pressed, ..
            } => self.dispatch_button(button, pressed),
            ButtonOutcome::Wheel(direction) => {
                self.wheel.on_wheel_event(direction, &mut self.state);
                self.moved = true;
                true
            }
            ButtonOutcome::Ignored => true,
        }
    }

    fn dispatch_button(&mut self, button: MouseButton, pressed: bool) -> bool {
        if !self.buffered {
            return true;
        }
        let Some(listener) = self.listener.as_mut() else {
            return true;
        };

        if pressed {
            listener.on_button_down(&self.state, button)
        } else {
            listener.on_button_up(&self.state, button)
        }
    }

    fn execute(&mut self, commands: Vec<PointerCommand>) {
        for command in commands {
            trace!("Pointer command: {:?}", command);
            match command {
                PointerCommand::SetCursorVisible(visible) => {
                    self.source.set_cursor_visible(visible)
                }
                PointerCommand::GrabPointer => self.source.grab_pointer(),
                PointerCommand::UngrabPointer => self.source.ungrab_pointer(),
                PointerCommand::WarpPointer { x, y } => {
                    self.source.warp_pointer_to(x, y);
                    self.motion.record_warp(x, y);
                }
                PointerCommand::KeyboardGrab(grab) => self.manager.set_keyboard_grab(grab),
            }
        }
    }
}

impl<S, F, M> Drop for MouseDevice<S, F, M>
where
    S: EventSource,
    F: FocusQuery,
    M: DeviceManager,
{
    fn drop(&mut self) {
        let commands = self.controller.shutdown();
        self.execute(commands);
        self.manager.set_mouse_in_use(false);
        info!("Mouse device released");
    }
}

fn validate_bounds(width: i32, height: i32) -> Result<()> {
    if width <= 0 || height <= 0 {
        return Err(MouseError::InvalidBounds { width, height });
    }
    Ok(())
}
