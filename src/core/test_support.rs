//=========================================================================
// Test Support
//=========================================================================
//
// Injectable doubles for the touch source and tick clock. Both hand out
// shared handles so a test can keep driving them after the subsystem has
// taken ownership.
//
//=========================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use crate::core::clock::TickSource;
use crate::core::touch::{SamplingError, Surface, TouchPoint, TouchReport, TouchSource};

//=== ManualClock =========================================================

#[derive(Debug, Clone, Default)]
pub(crate) struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub(crate) fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl TickSource for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

//=== ScriptedSource ======================================================

#[derive(Debug, Default)]
struct ScriptedState {
    report: TouchReport,
    sampling: HashSet<Surface>,
    unsupported: HashSet<Surface>,
    failing: bool,
    peeks: usize,
    stops: Vec<Surface>,
}

/// Front-surface touch source whose report is set directly by the test.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedSource {
    state: Rc<RefCell<ScriptedState>>,
}

impl ScriptedSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Marks `surface` as absent: `start_sampling` fails for it.
    pub(crate) fn without(self, surface: Surface) -> Self {
        self.state.borrow_mut().unsupported.insert(surface);
        self
    }

    pub(crate) fn touch(&self, points: &[TouchPoint]) {
        self.state.borrow_mut().report = TouchReport::from(points);
    }

    pub(crate) fn touch_at(&self, points: &[(i16, i16)]) {
        let points: Vec<_> = points.iter().map(|&(x, y)| TouchPoint::new(x, y)).collect();
        self.touch(&points);
    }

    pub(crate) fn lift(&self) {
        self.state.borrow_mut().report = TouchReport::empty();
    }

    /// Makes every subsequent peek fail with `Disconnected`.
    pub(crate) fn fail(&self) {
        self.state.borrow_mut().failing = true;
    }

    pub(crate) fn is_sampling(&self, surface: Surface) -> bool {
        self.state.borrow().sampling.contains(&surface)
    }

    pub(crate) fn peeks(&self) -> usize {
        self.state.borrow().peeks
    }

    pub(crate) fn stops(&self) -> Vec<Surface> {
        self.state.borrow().stops.clone()
    }
}

impl TouchSource for ScriptedSource {
    fn start_sampling(&mut self, surface: Surface) -> Result<(), SamplingError> {
        let mut state = self.state.borrow_mut();
        if state.unsupported.contains(&surface) {
            return Err(SamplingError::Unsupported(surface));
        }
        state.sampling.insert(surface);
        Ok(())
    }

    fn stop_sampling(&mut self, surface: Surface) -> Result<(), SamplingError> {
        let mut state = self.state.borrow_mut();
        state.stops.push(surface);
        if state.sampling.remove(&surface) {
            Ok(())
        } else {
            Err(SamplingError::NotSampling(surface))
        }
    }

    fn peek(&self, surface: Surface) -> Result<TouchReport, SamplingError> {
        let mut state = self.state.borrow_mut();
        state.peeks += 1;

        if state.failing {
            return Err(SamplingError::Disconnected);
        }
        if !state.sampling.contains(&surface) {
            return Err(SamplingError::NotSampling(surface));
        }

        match surface {
            Surface::Front => Ok(state.report.clone()),
            Surface::Back => Ok(TouchReport::empty()),
        }
    }
}
