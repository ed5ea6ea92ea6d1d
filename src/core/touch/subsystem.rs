//=========================================================================
// Touch Subsystem
//=========================================================================
//
// Per-tick poll driver owning every piece of touch recognition state.
//
// Architecture:
// ```text
//   poll()
//    ├─ read_snapshot(source, Front)   non-blocking peek
//    ├─ clock.now_ms()                 sampled once
//    ├─ snapshot != previous ?
//    │     yes → machine.on_snapshot()
//    │     no  → machine.expire()      deadlines only
//    └─ previous = snapshot            always
// ```
//
// Lifecycle: `new()` starts sampling on every surface; `shutdown()` or
// drop stops it again for every surface that started successfully.
//
// Threading: not Send/Sync by contract. The host drives `poll()` from a
// single thread, once per frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::gesture::{GestureMachine, GestureState};
use super::sampler::{read_snapshot, TouchSource};
use super::snapshot::{Snapshot, Surface};
use crate::core::clock::TickSource;
use crate::core::config::TouchConfig;
use crate::core::pointer::PointerSink;

//=== TouchSubsystem ======================================================

/// Touch-to-pointer backend for one device.
///
/// Only a changed snapshot advances the gesture machine. A poll whose
/// snapshot matches the previous one resolves pending deadlines and
/// nothing else, so a tap's button release (or the promotion of a still
/// touch to a hold) can arrive on a poll where no finger moved. Such a
/// poll never emits motion or scroll.
///
/// # Type Parameters
///
/// - `T`: platform touch source
/// - `C`: monotonic millisecond clock
/// - `K`: destination for synthesized pointer actions
///
/// # Examples
///
/// ```
/// use touch_pointer::core::{PointerAction, SystemClock, TouchConfig};
/// use touch_pointer::core::touch::{SamplingError, Surface, TouchReport, TouchSource, TouchSubsystem};
///
/// struct Untouched;
///
/// impl TouchSource for Untouched {
///     fn start_sampling(&mut self, _: Surface) -> Result<(), SamplingError> { Ok(()) }
///     fn stop_sampling(&mut self, _: Surface) -> Result<(), SamplingError> { Ok(()) }
///     fn peek(&self, _: Surface) -> Result<TouchReport, SamplingError> {
///         Ok(TouchReport::empty())
///     }
/// }
///
/// let mut touch = TouchSubsystem::new(
///     TouchConfig::new(),
///     Untouched,
///     SystemClock::new(),
///     Vec::<PointerAction>::new(),
/// );
///
/// touch.poll();
/// assert!(touch.sink().is_empty());
/// ```
pub struct TouchSubsystem<T, C, K>
where
    T: TouchSource,
    C: TickSource,
    K: PointerSink,
{
    source: T,
    clock: C,
    sink: K,
    machine: GestureMachine,
    previous: Snapshot,
    sampling: Vec<Surface>,
}

impl<T, C, K> TouchSubsystem<T, C, K>
where
    T: TouchSource,
    C: TickSource,
    K: PointerSink,
{
    //--- Construction -----------------------------------------------------

    /// Creates the subsystem and starts sampling on every surface.
    ///
    /// A surface that fails to start is logged and skipped; the subsystem
    /// still runs and that surface simply reads as untouched.
    pub fn new(config: TouchConfig, mut source: T, clock: C, sink: K) -> Self {
        let mut sampling = Vec::with_capacity(Surface::ALL.len());

        for surface in Surface::ALL {
            match source.start_sampling(surface) {
                Ok(()) => sampling.push(surface),
                Err(e) => warn!(target: "touch", "Cannot sample {:?} surface: {}", surface, e),
            }
        }

        info!(
            target: "touch",
            "Touch subsystem initialized (engage {} ms, tap {} ms, sampling {:?})",
            config.engage_window_ms(),
            config.tap_window_ms(),
            sampling
        );

        Self {
            source,
            clock,
            sink,
            machine: GestureMachine::new(config),
            previous: Snapshot::EMPTY,
            sampling,
        }
    }

    //--- Polling ----------------------------------------------------------

    /// Runs one recognition step. Call once per host frame.
    pub fn poll(&mut self) {
        let snapshot = read_snapshot(&self.source, Surface::Front);
        let now = self.clock.now_ms();

        if snapshot != self.previous {
            self.machine.on_snapshot(&snapshot, now, &mut self.sink);
        } else {
            self.machine.expire(&snapshot, now, &mut self.sink);
        }

        // Stored even when the machine ignored the change
        self.previous = snapshot;

        self.poll_back_surface();
    }

    /// Back-surface placeholder.
    ///
    /// The back panel is sampled at init but no gesture is defined for it,
    /// so it is never read.
    fn poll_back_surface(&mut self) {}

    //--- Shutdown ---------------------------------------------------------

    /// Stops sampling and consumes the subsystem, returning the sink.
    pub fn shutdown(mut self) -> K
    where
        K: Default,
    {
        self.release_sampling();
        std::mem::take(&mut self.sink)
    }

    fn release_sampling(&mut self) {
        for surface in self.sampling.drain(..) {
            match self.source.stop_sampling(surface) {
                Ok(()) => debug!(target: "touch", "Stopped sampling {:?} surface", surface),
                Err(e) => warn!(target: "touch", "Failed to stop {:?} surface: {}", surface, e),
            }
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn state(&self) -> GestureState {
        self.machine.state()
    }

    pub fn machine(&self) -> &GestureMachine {
        &self.machine
    }

    /// Last snapshot examined by `poll()`.
    pub fn previous_snapshot(&self) -> &Snapshot {
        &self.previous
    }

    /// Surfaces currently being sampled.
    pub fn sampling_surfaces(&self) -> &[Surface] {
        &self.sampling
    }

    pub fn source(&self) -> &T {
        &self.source
    }

    /// Mutable access for sources fed by the host (e.g. window events).
    pub fn source_mut(&mut self) -> &mut T {
        &mut self.source
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }
}

impl<T, C, K> Drop for TouchSubsystem<T, C, K>
where
    T: TouchSource,
    C: TickSource,
    K: PointerSink,
{
    fn drop(&mut self) {
        if !self.sampling.is_empty() {
            trace!(target: "touch", "Releasing sampling on drop");
            self.release_sampling();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pointer::{ChannelSink, PointerAction, PointerButton, WheelDirection};
    use crate::core::test_support::{ManualClock, ScriptedSource};
    use crate::core::touch::TouchPoint;
    use crossbeam_channel::unbounded;

    const ENGAGE: u64 = 100;
    const TAP: u64 = 50;

    type TestSubsystem = TouchSubsystem<ScriptedSource, ManualClock, Vec<PointerAction>>;

    fn setup() -> (TestSubsystem, ScriptedSource, ManualClock) {
        let source = ScriptedSource::new();
        let clock = ManualClock::new();
        let config = TouchConfig::new().with_engage_window(ENGAGE).with_tap_window(TAP);
        let touch = TouchSubsystem::new(config, source.clone(), clock.clone(), Vec::new());
        (touch, source, clock)
    }

    /// Polls once at `t` after applying `pose` (None = lifted).
    fn poll_at(
        touch: &mut TestSubsystem,
        source: &ScriptedSource,
        clock: &ManualClock,
        t: u64,
        pose: Option<&[(i16, i16)]>,
    ) {
        match pose {
            Some(points) => source.touch_at(points),
            None => source.lift(),
        }
        clock.set(t);
        touch.poll();
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    #[test]
    fn init_starts_sampling_on_both_surfaces() {
        let (touch, source, _) = setup();

        assert!(source.is_sampling(Surface::Front));
        assert!(source.is_sampling(Surface::Back));
        assert_eq!(touch.sampling_surfaces(), &[Surface::Front, Surface::Back]);
        assert_eq!(touch.state(), GestureState::Idle);
    }

    #[test]
    fn missing_back_surface_is_tolerated() {
        let source = ScriptedSource::new().without(Surface::Back);
        let touch = TouchSubsystem::new(
            TouchConfig::new(),
            source.clone(),
            ManualClock::new(),
            Vec::<PointerAction>::new(),
        );

        assert_eq!(touch.sampling_surfaces(), &[Surface::Front]);
        assert!(source.is_sampling(Surface::Front));
    }

    #[test]
    fn shutdown_stops_sampling_once() {
        let (touch, source, _) = setup();

        let _actions = touch.shutdown();

        assert!(!source.is_sampling(Surface::Front));
        assert!(!source.is_sampling(Surface::Back));
        // Drop after shutdown must not stop again
        assert_eq!(source.stops(), vec![Surface::Front, Surface::Back]);
    }

    #[test]
    fn drop_stops_sampling() {
        let (touch, source, _) = setup();
        drop(touch);

        assert_eq!(source.stops(), vec![Surface::Front, Surface::Back]);
    }

    //=====================================================================
    // Poll Driver
    //=====================================================================

    #[test]
    fn untouched_surface_never_emits() {
        let (mut touch, source, clock) = setup();

        for t in (0..2_000).step_by(16) {
            poll_at(&mut touch, &source, &clock, t, None);
        }

        assert!(touch.sink().is_empty());
        assert_eq!(touch.state(), GestureState::Idle);
    }

    #[test]
    fn every_poll_peeks_once() {
        let (mut touch, source, clock) = setup();

        poll_at(&mut touch, &source, &clock, 0, None);
        poll_at(&mut touch, &source, &clock, 16, None);

        assert_eq!(source.peeks(), 2);
    }

    #[test]
    fn quick_tap_presses_then_releases_left() {
        let (mut touch, source, clock) = setup();

        poll_at(&mut touch, &source, &clock, 0, Some(&[(200, 300)]));
        poll_at(&mut touch, &source, &clock, 40, None);
        assert_eq!(touch.sink(), &vec![PointerAction::ButtonPress(PointerButton::Left)]);

        // Unchanged polls inside the tap window
        poll_at(&mut touch, &source, &clock, 60, None);
        assert_eq!(touch.sink().len(), 1);

        poll_at(&mut touch, &source, &clock, 40 + TAP, None);
        assert_eq!(
            touch.sink(),
            &vec![
                PointerAction::ButtonPress(PointerButton::Left),
                PointerAction::ButtonRelease(PointerButton::Left),
            ]
        );
        assert!(!touch.sink().iter().any(|a| matches!(a, PointerAction::Motion { .. })));
    }

    #[test]
    fn release_arrives_on_unchanged_poll() {
        let (mut touch, source, clock) = setup();

        poll_at(&mut touch, &source, &clock, 0, Some(&[(10, 10), (50, 10)]));
        poll_at(&mut touch, &source, &clock, 20, None);
        assert_eq!(touch.state(), GestureState::TapPending);

        // Host drains what it has consumed so far
        let pressed: Vec<_> = touch.sink_mut().drain(..).collect();
        assert_eq!(pressed, vec![PointerAction::ButtonPress(PointerButton::Right)]);

        let before = *touch.previous_snapshot();
        poll_at(&mut touch, &source, &clock, 20 + TAP, None);

        assert_eq!(*touch.previous_snapshot(), before);
        assert_eq!(touch.sink(), &vec![PointerAction::ButtonRelease(PointerButton::Right)]);
        assert_eq!(touch.state(), GestureState::Idle);
    }

    #[test]
    fn finger_churn_while_engaged_defers_press() {
        let (mut touch, source, clock) = setup();

        poll_at(&mut touch, &source, &clock, 0, Some(&[(10, 10)]));
        poll_at(&mut touch, &source, &clock, 10, Some(&[(10, 10), (50, 50)]));
        assert!(touch.sink().is_empty());
        assert_eq!(touch.machine().committed_fingers(), 2);

        poll_at(&mut touch, &source, &clock, 20, Some(&[(10, 10)]));
        assert_eq!(touch.sink(), &vec![PointerAction::ButtonPress(PointerButton::Right)]);
    }

    #[test]
    fn held_finger_moves_pointer_once_per_change() {
        let (mut touch, source, clock) = setup();

        poll_at(&mut touch, &source, &clock, 0, Some(&[(100, 100)]));
        poll_at(&mut touch, &source, &clock, ENGAGE, Some(&[(100, 100)]));
        assert_eq!(touch.state(), GestureState::Held);

        poll_at(&mut touch, &source, &clock, 120, Some(&[(110, 100)]));
        poll_at(&mut touch, &source, &clock, 136, Some(&[(110, 100)]));

        assert_eq!(touch.sink(), &vec![PointerAction::Motion { dx: 5, dy: 0 }]);
        assert_eq!(touch.machine().reference_points(), &[TouchPoint::new(110, 100)]);
    }

    #[test]
    fn two_finger_scroll_then_pause() {
        let (mut touch, source, clock) = setup();

        poll_at(&mut touch, &source, &clock, 0, Some(&[(100, 100), (300, 100)]));
        poll_at(&mut touch, &source, &clock, ENGAGE, Some(&[(100, 100), (300, 100)]));
        poll_at(&mut touch, &source, &clock, 120, Some(&[(100, 120), (300, 120)]));
        assert_eq!(touch.sink(), &vec![PointerAction::WheelTick(WheelDirection::Down)]);

        poll_at(&mut touch, &source, &clock, 140, Some(&[(90, 120), (290, 120)]));
        assert_eq!(
            &touch.sink()[1..],
            &[
                PointerAction::WheelRelease(WheelDirection::Up),
                PointerAction::WheelRelease(WheelDirection::Down),
            ]
        );
    }

    #[test]
    fn identical_snapshot_does_not_reach_machine() {
        let (mut touch, source, clock) = setup();

        poll_at(&mut touch, &source, &clock, 0, Some(&[(0, 0)]));
        poll_at(&mut touch, &source, &clock, ENGAGE, Some(&[(0, 0)]));
        poll_at(&mut touch, &source, &clock, 110, Some(&[(40, 0)]));
        let machine_after_move = touch.machine().clone();

        poll_at(&mut touch, &source, &clock, 120, Some(&[(40, 0)]));

        assert_eq!(touch.machine(), &machine_after_move);
        assert_eq!(touch.sink(), &vec![PointerAction::Motion { dx: 20, dy: 0 }]);
    }

    #[test]
    fn previous_snapshot_is_stored_even_when_ignored() {
        let (mut touch, source, clock) = setup();

        poll_at(&mut touch, &source, &clock, 0, Some(&[(5, 5)]));
        poll_at(&mut touch, &source, &clock, 10, None);
        assert_eq!(touch.state(), GestureState::TapPending);

        // TapPending ignores this change, but it is still recorded
        poll_at(&mut touch, &source, &clock, 20, Some(&[(8, 8)]));
        assert_eq!(touch.previous_snapshot().points(), &[TouchPoint::new(8, 8)]);
    }

    #[test]
    fn tap_cycle_round_trips_to_initial_behavior() {
        let (mut touch, source, clock) = setup();

        poll_at(&mut touch, &source, &clock, 0, Some(&[(1, 1)]));
        poll_at(&mut touch, &source, &clock, 10, None);
        poll_at(&mut touch, &source, &clock, 10 + TAP, None);

        let fresh = GestureMachine::new(*touch.machine().config());
        assert_eq!(touch.machine(), &fresh);

        // Next gesture behaves like the first
        poll_at(&mut touch, &source, &clock, 200, Some(&[(1, 1)]));
        poll_at(&mut touch, &source, &clock, 210, None);
        assert_eq!(touch.sink()[2], PointerAction::ButtonPress(PointerButton::Left));
    }

    #[test]
    fn sampling_failure_reads_as_lift() {
        let (mut touch, source, clock) = setup();

        poll_at(&mut touch, &source, &clock, 0, Some(&[(1, 1)]));
        poll_at(&mut touch, &source, &clock, ENGAGE, Some(&[(1, 1)]));
        assert_eq!(touch.state(), GestureState::Held);

        source.fail();
        clock.set(120);
        touch.poll();

        assert_eq!(touch.state(), GestureState::Idle);
        assert!(touch.previous_snapshot().is_untouched());
    }

    #[test]
    fn channel_sink_delivers_across_threads() {
        let (tx, rx) = unbounded();
        let source = ScriptedSource::new();
        let clock = ManualClock::new();
        let mut touch = TouchSubsystem::new(
            TouchConfig::new().with_tap_window(TAP),
            source.clone(),
            clock.clone(),
            ChannelSink::new(tx),
        );

        source.touch_at(&[(3, 3), (4, 4), (5, 5)]);
        touch.poll();
        source.lift();
        clock.advance(5);
        touch.poll();
        clock.advance(TAP);
        touch.poll();

        let received = std::thread::spawn(move || rx.try_iter().collect::<Vec<_>>())
            .join()
            .unwrap();

        assert_eq!(
            received,
            vec![
                PointerAction::ButtonPress(PointerButton::Middle),
                PointerAction::ButtonRelease(PointerButton::Middle),
            ]
        );
    }
}
