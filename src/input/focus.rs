//! Grab/Hide/Focus State Machine
//!
//! The application states a policy (grab the pointer, hide the cursor) and the
//! controller decides what is actually applied. Losing input focus suspends
//! the policy entirely: a window that is no longer focused must not keep the
//! pointer grabbed or the cursor hidden. Focus coming back re-applies it.
//!
//! Transitions do not touch the platform directly. They emit an ordered list
//! of [`PointerCommand`]s which the device executes, so the order of
//! operations is part of the controller's output and can be checked as such.
//!
//! # Ordering
//!
//! ```text
//! focus lost:     show cursor → release keyboard → ungrab → warp to restore point
//! focus regained: hide cursor (policy) → grab keyboard → grab pointer → hide (forced)
//! ```

use serde::Serialize;
use tracing::debug;

/// Platform operation requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PointerCommand {
    /// Show (true) or hide (false) the platform cursor
    SetCursorVisible(bool),
    /// Grab the platform pointer
    GrabPointer,
    /// Release the platform pointer
    UngrabPointer,
    /// Move the platform cursor
    WarpPointer {
        /// Window X coordinate
        x: i32,
        /// Window Y coordinate
        y: i32,
    },
    /// Confine or release the keyboard alongside the pointer
    KeyboardGrab(bool),
}

/// Desired state, set by the application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrabPolicy {
    /// Pointer confinement requested
    pub grab: bool,
    /// Cursor hiding requested
    pub hide: bool,
}

/// Pointer confinement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confinement {
    /// Pointer moves freely
    Free,
    /// Pointer grabbed; released pointer goes back to the restore point
    Confined {
        /// Restore X position
        restore_x: i32,
        /// Restore Y position
        restore_y: i32,
    },
}

/// Cursor visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Cursor shown
    Visible,
    /// Cursor hidden
    Hidden,
}

/// Applied pointer state
///
/// `FocusLost` carries neither confinement nor visibility: while unfocused
/// the pointer is free and the cursor visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerState {
    /// Our window has focus
    Focused {
        /// Current confinement
        confinement: Confinement,
        /// Current visibility
        visibility: Visibility,
    },
    /// Another window has focus; policy suspended
    FocusLost,
}

impl PointerState {
    const RELEASED: PointerState = PointerState::Focused {
        confinement: Confinement::Free,
        visibility: Visibility::Visible,
    };
}

/// Flattened view of [`PointerState`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EffectiveState {
    /// Pointer grabbed
    pub grabbed: bool,
    /// Cursor hidden
    pub hidden: bool,
    /// Policy suspended because focus is elsewhere
    pub focus_lost: bool,
}

/// Owns the grab/hide/focus state machine
#[derive(Debug)]
pub struct FocusGrabController {
    policy: GrabPolicy,
    state: PointerState,
}

impl FocusGrabController {
    /// Create a controller with nothing applied yet
    pub fn new(policy: GrabPolicy) -> Self {
        Self {
            policy,
            state: PointerState::RELEASED,
        }
    }

    /// Apply the initial policy
    ///
    /// Without focus the controller starts suspended and the policy is
    /// applied on the first reconcile that sees focus.
    pub fn initialize(&mut self, has_focus: bool, abs: (i32, i32)) -> Vec<PointerCommand> {
        let mut out = Vec::new();
        self.state = PointerState::RELEASED;

        if has_focus {
            self.apply_hide(self.policy.hide, &mut out);
            self.apply_grab(self.policy.grab, abs, &mut out);
        } else {
            debug!("Window not focused at initialization, deferring grab/hide");
            self.state = PointerState::FocusLost;
        }

        out
    }

    /// Request or drop pointer confinement
    pub fn set_grab_policy(&mut self, grab: bool, abs: (i32, i32)) -> Vec<PointerCommand> {
        self.policy.grab = grab;
        let mut out = Vec::new();
        self.apply_grab(grab, abs, &mut out);
        out
    }

    /// Request or drop cursor hiding
    pub fn set_hide_policy(&mut self, hide: bool) -> Vec<PointerCommand> {
        self.policy.hide = hide;
        let mut out = Vec::new();
        self.apply_hide(hide, &mut out);
        out
    }

    /// Follow a focus change
    ///
    /// Called once per capture with the current focus status; only the
    /// transitions do anything.
    pub fn reconcile(&mut self, has_focus: bool, abs: (i32, i32)) -> Vec<PointerCommand> {
        let mut out = Vec::new();

        match (self.state, has_focus) {
            (PointerState::Focused { .. }, false) => {
                self.release_all(&mut out);
                self.state = PointerState::FocusLost;
                debug!("Focus lost, grab and hide suspended");
            }
            (PointerState::FocusLost, true) => {
                self.state = PointerState::RELEASED;
                self.apply_hide(self.policy.hide, &mut out);
                self.apply_grab(self.policy.grab, abs, &mut out);
                debug!(
                    "Focus regained, re-applied policy (grab={}, hide={})",
                    self.policy.grab, self.policy.hide
                );
            }
            _ => {}
        }

        out
    }

    /// Release everything for teardown
    pub fn shutdown(&mut self) -> Vec<PointerCommand> {
        let mut out = Vec::new();
        self.release_all(&mut out);
        self.state = PointerState::RELEASED;
        out
    }

    /// Move the restore point of an active grab
    pub fn set_restore_point(&mut self, x: i32, y: i32) {
        if let PointerState::Focused {
            confinement: Confinement::Confined { .. },
            visibility,
        } = self.state
        {
            self.state = PointerState::Focused {
                confinement: Confinement::Confined {
                    restore_x: x,
                    restore_y: y,
                },
                visibility,
            };
        }
    }

    /// Desired state
    pub fn policy(&self) -> GrabPolicy {
        self.policy
    }

    /// Applied state
    pub fn state(&self) -> PointerState {
        self.state
    }

    /// Applied state as flags
    pub fn effective(&self) -> EffectiveState {
        match self.state {
            PointerState::Focused {
                confinement,
                visibility,
            } => EffectiveState {
                grabbed: matches!(confinement, Confinement::Confined { .. }),
                hidden: visibility == Visibility::Hidden,
                focus_lost: false,
            },
            PointerState::FocusLost => EffectiveState {
                grabbed: false,
                hidden: false,
                focus_lost: true,
            },
        }
    }

    /// Pointer is grabbed (which implies focus is held)
    pub fn is_confined(&self) -> bool {
        self.effective().grabbed
    }

    /// Focus is currently elsewhere
    pub fn is_focus_lost(&self) -> bool {
        self.state == PointerState::FocusLost
    }

    fn apply_hide(&mut self, hide: bool, out: &mut Vec<PointerCommand>) {
        let PointerState::Focused { visibility, .. } = &mut self.state else {
            return;
        };

        let target = if hide {
            Visibility::Hidden
        } else {
            Visibility::Visible
        };
        if *visibility == target {
            return;
        }

        *visibility = target;
        out.push(PointerCommand::SetCursorVisible(!hide));
    }

    fn apply_grab(&mut self, grab: bool, abs: (i32, i32), out: &mut Vec<PointerCommand>) {
        if grab {
            let PointerState::Focused { confinement, .. } = &mut self.state else {
                return;
            };
            if *confinement != Confinement::Free {
                return;
            }

            *confinement = Confinement::Confined {
                restore_x: abs.0,
                restore_y: abs.1,
            };
            out.push(PointerCommand::KeyboardGrab(true));
            out.push(PointerCommand::GrabPointer);
            debug!("Pointer grabbed (restore point {:?})", abs);

            // Grabbed pointers are always hidden
            self.apply_hide(true, out);
        } else if self.release_grab(out) {
            self.apply_hide(self.policy.hide, out);
        }
    }

    fn release_grab(&mut self, out: &mut Vec<PointerCommand>) -> bool {
        let PointerState::Focused { confinement, .. } = &mut self.state else {
            return false;
        };
        let Confinement::Confined {
            restore_x,
            restore_y,
        } = *confinement
        else {
            return false;
        };

        *confinement = Confinement::Free;
        out.push(PointerCommand::KeyboardGrab(false));
        out.push(PointerCommand::UngrabPointer);
        out.push(PointerCommand::WarpPointer {
            x: restore_x,
            y: restore_y,
        });
        debug!("Pointer released to ({}, {})", restore_x, restore_y);
        true
    }

    fn release_all(&mut self, out: &mut Vec<PointerCommand>) {
        self.apply_hide(false, out);
        self.release_grab(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PointerCommand::*;

    fn grabbed_hidden() -> FocusGrabController {
        let mut controller = FocusGrabController::new(GrabPolicy {
            grab: true,
            hide: true,
        });
        controller.initialize(true, (100, 50));
        controller
    }

    #[test]
    fn test_initialize_with_focus() {
        let mut controller = FocusGrabController::new(GrabPolicy {
            grab: true,
            hide: true,
        });
        let commands = controller.initialize(true, (100, 50));

        assert_eq!(
            commands,
            vec![SetCursorVisible(false), KeyboardGrab(true), GrabPointer]
        );
        assert_eq!(
            controller.effective(),
            EffectiveState {
                grabbed: true,
                hidden: true,
                focus_lost: false
            }
        );
    }

    #[test]
    fn test_initialize_without_focus_defers() {
        let mut controller = FocusGrabController::new(GrabPolicy {
            grab: true,
            hide: true,
        });
        let commands = controller.initialize(false, (0, 0));

        assert!(commands.is_empty());
        assert!(controller.is_focus_lost());

        let commands = controller.reconcile(true, (10, 20));
        assert_eq!(
            commands,
            vec![SetCursorVisible(false), KeyboardGrab(true), GrabPointer]
        );
    }

    #[test]
    fn test_grab_forces_hide() {
        let mut controller = FocusGrabController::new(GrabPolicy::default());
        controller.initialize(true, (0, 0));

        let commands = controller.set_grab_policy(true, (30, 40));
        assert_eq!(
            commands,
            vec![KeyboardGrab(true), GrabPointer, SetCursorVisible(false)]
        );
        assert!(controller.effective().hidden);
    }

    #[test]
    fn test_release_grab_restores_hide_policy() {
        let mut controller = FocusGrabController::new(GrabPolicy::default());
        controller.initialize(true, (0, 0));
        controller.set_grab_policy(true, (30, 40));

        let commands = controller.set_grab_policy(false, (90, 90));
        assert_eq!(
            commands,
            vec![
                KeyboardGrab(false),
                UngrabPointer,
                WarpPointer { x: 30, y: 40 },
                SetCursorVisible(true),
            ]
        );
        assert_eq!(controller.effective(), EffectiveState::default());
    }

    #[test]
    fn test_release_grab_keeps_requested_hide() {
        let mut controller = grabbed_hidden();

        let commands = controller.set_grab_policy(false, (0, 0));
        assert_eq!(
            commands,
            vec![
                KeyboardGrab(false),
                UngrabPointer,
                WarpPointer { x: 100, y: 50 },
            ]
        );
        assert!(controller.effective().hidden);
    }

    #[test]
    fn test_hide_does_not_touch_grab() {
        let mut controller = grabbed_hidden();

        assert_eq!(controller.set_hide_policy(false), vec![SetCursorVisible(true)]);
        assert!(controller.is_confined());
        assert!(controller.set_hide_policy(false).is_empty());
    }

    #[test]
    fn test_focus_loss_releases_hide_then_grab() {
        let mut controller = grabbed_hidden();

        let commands = controller.reconcile(false, (400, 300));
        assert_eq!(
            commands,
            vec![
                SetCursorVisible(true),
                KeyboardGrab(false),
                UngrabPointer,
                WarpPointer { x: 100, y: 50 },
            ]
        );
        assert_eq!(
            controller.effective(),
            EffectiveState {
                grabbed: false,
                hidden: false,
                focus_lost: true
            }
        );

        assert!(controller.reconcile(false, (400, 300)).is_empty());
    }

    #[test]
    fn test_focus_regain_hide_then_grab() {
        let mut controller = grabbed_hidden();
        controller.reconcile(false, (0, 0));

        let commands = controller.reconcile(true, (77, 88));
        assert_eq!(
            commands,
            vec![SetCursorVisible(false), KeyboardGrab(true), GrabPointer]
        );
        assert_eq!(
            controller.state(),
            PointerState::Focused {
                confinement: Confinement::Confined {
                    restore_x: 77,
                    restore_y: 88
                },
                visibility: Visibility::Hidden,
            }
        );
    }

    #[test]
    fn test_policy_changes_while_focus_lost() {
        let mut controller = grabbed_hidden();
        controller.reconcile(false, (0, 0));

        assert!(controller.set_grab_policy(false, (0, 0)).is_empty());
        assert!(controller.set_hide_policy(false).is_empty());
        assert!(controller.set_hide_policy(true).is_empty());
        assert_eq!(
            controller.policy(),
            GrabPolicy {
                grab: false,
                hide: true
            }
        );

        let commands = controller.reconcile(true, (0, 0));
        assert_eq!(commands, vec![SetCursorVisible(false)]);
        assert!(!controller.is_confined());
    }

    #[test]
    fn test_unconfined_focus_loss() {
        let mut controller = FocusGrabController::new(GrabPolicy::default());
        controller.initialize(true, (0, 0));

        assert!(controller.reconcile(false, (0, 0)).is_empty());
        assert!(controller.is_focus_lost());
        assert!(controller.reconcile(true, (0, 0)).is_empty());
        assert!(!controller.is_focus_lost());
    }

    #[test]
    fn test_restore_point_update() {
        let mut controller = grabbed_hidden();
        controller.set_restore_point(5, 6);

        let commands = controller.set_grab_policy(false, (0, 0));
        assert!(commands.contains(&WarpPointer { x: 5, y: 6 }));
    }

    #[test]
    fn test_shutdown() {
        let mut controller = grabbed_hidden();

        let commands = controller.shutdown();
        assert_eq!(
            commands,
            vec![
                SetCursorVisible(true),
                KeyboardGrab(false),
                UngrabPointer,
                WarpPointer { x: 100, y: 50 },
            ]
        );
        assert_eq!(controller.effective(), EffectiveState::default());
    }
}
