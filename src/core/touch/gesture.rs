//=========================================================================
// Gesture State Machine
//=========================================================================
//
// Classifies a sequence of touch snapshots into taps and holds and emits
// the matching pointer actions.
//
// States:
// ```text
//            fingers > 0                 finger lifted
//   Idle ───────────────► Engaged ───────────────────► TapPending
//    ▲                      │                               │
//    │                      │ engage deadline               │ tap deadline
//    │                      ▼                               │ (release)
//    │   all lifted       Held ◄─┐ motion / scroll          │
//    ├────────────────────┘ └────┘ (re-base reference)      │
//    └──────────────────────────────────────────────────────┘
// ```
//
// Changed snapshots enter through `on_snapshot()`; polls with an unchanged
// snapshot only run `expire()`, which handles the two deadlines and never
// evaluates motion.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::snapshot::{Snapshot, TouchPoint};
use crate::core::config::TouchConfig;
use crate::core::pointer::{PointerAction, PointerButton, PointerSink, WheelDirection};

//=== Lookup Tables =======================================================
//
// Indexed by committed finger count. Counts past the end of a table have
// no mapping and are a silent no-op.
//

/// Button emulated by an N-finger tap.
const TAP_BUTTONS: [Option<PointerButton>; 4] = [
    None,
    Some(PointerButton::Left),
    Some(PointerButton::Right),
    Some(PointerButton::Middle),
];

/// What an N-finger hold emits when the fingers move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HoldBehavior {
    Pointer,
    Scroll,
}

const HOLD_BEHAVIORS: [Option<HoldBehavior>; 3] = [
    None,
    Some(HoldBehavior::Pointer),
    Some(HoldBehavior::Scroll),
];

/// Returns the button a tap with `fingers` fingers maps to, if any.
pub fn tap_button(fingers: usize) -> Option<PointerButton> {
    TAP_BUTTONS.get(fingers).copied().flatten()
}

fn hold_behavior(fingers: usize) -> Option<HoldBehavior> {
    HOLD_BEHAVIORS.get(fingers).copied().flatten()
}

//--- centroid_delta() ----------------------------------------------------

/// Damped movement of the centroid of the first `fingers` points.
///
/// Means and the final halving use integer division truncating toward
/// zero. Returns `None` when either set has no points to average.
pub fn centroid_delta(
    reference: &[TouchPoint],
    current: &[TouchPoint],
    fingers: usize,
) -> Option<(i32, i32)> {
    let n = fingers.min(reference.len()).min(current.len());
    if n == 0 {
        return None;
    }

    let (ref_x, ref_y) = mean(&reference[..n]);
    let (cur_x, cur_y) = mean(&current[..n]);

    Some(((cur_x - ref_x) / 2, (cur_y - ref_y) / 2))
}

fn mean(points: &[TouchPoint]) -> (i32, i32) {
    let n = points.len() as i32;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0i32, 0i32), |(sx, sy), p| (sx + p.x as i32, sy + p.y as i32));
    (sum_x / n, sum_y / n)
}

//=== GestureState ========================================================

/// Recognition phase of the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// No gesture in progress.
    Idle,

    /// Fingers down, waiting to tell a tap from a hold.
    Engaged,

    /// Tap pressed, waiting for the tap window to release it.
    TapPending,

    /// Hold/drag in progress; movement produces motion or scroll.
    Held,
}

//=== GestureMachine ======================================================

/// Touch gesture recognizer for one surface.
///
/// Owns all recognition state. Two machines compare equal when they would
/// behave identically on any future input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureMachine {
    config: TouchConfig,
    state: GestureState,
    committed: usize,
    deadline: u64,
    reference: Vec<TouchPoint>,
}

impl GestureMachine {
    //--- Construction -----------------------------------------------------

    pub fn new(config: TouchConfig) -> Self {
        Self {
            config,
            state: GestureState::Idle,
            committed: 0,
            deadline: 0,
            reference: Vec::new(),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Finger count defining the current gesture (0 while idle).
    pub fn committed_fingers(&self) -> usize {
        self.committed
    }

    /// Absolute tick of the pending deadline (meaningless while idle).
    pub fn deadline(&self) -> u64 {
        self.deadline
    }

    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn reference_points(&self) -> &[TouchPoint] {
        &self.reference
    }

    //--- Event Entry Points -----------------------------------------------

    /// Advances the machine with a snapshot that differs from the last one.
    pub fn on_snapshot<S>(&mut self, snapshot: &Snapshot, now: u64, sink: &mut S)
    where
        S: PointerSink + ?Sized,
    {
        trace!(
            target: "touch::gesture",
            "{:?} <- {} finger(s) @ {}",
            self.state,
            snapshot.finger_count(),
            now
        );

        match self.state {
            GestureState::Idle => self.engage(snapshot, now),
            GestureState::Engaged => self.update_engaged(snapshot, now, sink),
            // Changes are ignored while a tap is pending; only the deadline counts
            GestureState::TapPending => self.confirm_tap(now, sink),
            GestureState::Held => self.update_held(snapshot, now, sink),
        }
    }

    /// Handles deadlines on a poll where the snapshot did not change.
    ///
    /// `current` is the unchanged pose, used as the hold reference when
    /// an engaged touch times out.
    pub fn expire<S>(&mut self, current: &Snapshot, now: u64, sink: &mut S)
    where
        S: PointerSink + ?Sized,
    {
        match self.state {
            GestureState::Engaged if now >= self.deadline => self.promote_to_held(current),
            GestureState::TapPending => self.confirm_tap(now, sink),
            _ => {}
        }
    }

    //--- Transitions ------------------------------------------------------

    fn engage(&mut self, snapshot: &Snapshot, now: u64) {
        if snapshot.is_untouched() {
            return;
        }

        self.state = GestureState::Engaged;
        self.committed = snapshot.finger_count();
        self.deadline = now.saturating_add(self.config.engage_window_ms());

        debug!(
            target: "touch::gesture",
            "Engaged with {} finger(s), hold deadline {}",
            self.committed,
            self.deadline
        );
    }

    fn update_engaged<S>(&mut self, snapshot: &Snapshot, now: u64, sink: &mut S)
    where
        S: PointerSink + ?Sized,
    {
        if now >= self.deadline {
            self.promote_to_held(snapshot);
            return;
        }

        let fingers = snapshot.finger_count();

        if fingers > self.committed {
            // Still placing fingers
            trace!(target: "touch::gesture", "Committed fingers raised to {}", fingers);
            self.committed = fingers;
            return;
        }

        if fingers == self.committed {
            return;
        }

        // A finger was lifted: the gesture is a tap
        match tap_button(self.committed) {
            Some(button) => sink.emit(PointerAction::ButtonPress(button)),
            None => trace!(target: "touch::gesture", "No tap button for {} fingers", self.committed),
        }

        self.state = GestureState::TapPending;
        self.deadline = now.saturating_add(self.config.tap_window_ms());

        debug!(
            target: "touch::gesture",
            "{}-finger tap, release at {}",
            self.committed,
            self.deadline
        );
    }

    fn confirm_tap<S>(&mut self, now: u64, sink: &mut S)
    where
        S: PointerSink + ?Sized,
    {
        if now < self.deadline {
            return;
        }

        if let Some(button) = tap_button(self.committed) {
            sink.emit(PointerAction::ButtonRelease(button));
        }

        debug!(target: "touch::gesture", "{}-finger tap complete", self.committed);
        self.reset();
    }

    fn promote_to_held(&mut self, current: &Snapshot) {
        if current.is_untouched() {
            // Long press ended before any movement was evaluated
            debug!(target: "touch::gesture", "Engaged touch lifted after hold deadline");
            self.reset();
            return;
        }

        self.state = GestureState::Held;
        self.rebase(current);

        debug!(
            target: "touch::gesture",
            "Holding with {} finger(s) ({} reference points)",
            self.committed,
            self.reference.len()
        );
    }

    fn update_held<S>(&mut self, snapshot: &Snapshot, now: u64, sink: &mut S)
    where
        S: PointerSink + ?Sized,
    {
        if snapshot.is_untouched() {
            debug!(target: "touch::gesture", "Hold released");
            self.reset();
            return;
        }

        let delta = centroid_delta(&self.reference, snapshot.points(), self.committed);

        if let Some((dx, dy)) = delta {
            match hold_behavior(self.committed) {
                Some(HoldBehavior::Pointer) => {
                    sink.emit(PointerAction::Motion { dx, dy });
                    self.deadline = now.saturating_add(self.config.engage_window_ms());
                }
                Some(HoldBehavior::Scroll) => match WheelDirection::from_delta(dy) {
                    Some(direction) => sink.emit(PointerAction::WheelTick(direction)),
                    None => {
                        sink.emit(PointerAction::WheelRelease(WheelDirection::Up));
                        sink.emit(PointerAction::WheelRelease(WheelDirection::Down));
                    }
                },
                None => {}
            }
        }

        self.rebase(snapshot);
    }

    //--- Internal Helpers -------------------------------------------------

    fn rebase(&mut self, snapshot: &Snapshot) {
        self.reference.clear();
        self.reference.extend_from_slice(snapshot.points());
    }

    fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.committed = 0;
        self.deadline = 0;
        self.reference.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
