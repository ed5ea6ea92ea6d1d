//=========================================================================
// Touch Tracker
//=========================================================================
//
// `TouchSource` backed by winit touch events.
//
// Architecture:
//   WindowEvent::Touch → handle_touch() → active touches → peek() → TouchReport
//
// Winit delivers per-finger phase events with a tracking id; the gesture
// core wants a polled report. The tracker keeps the active fingers in the
// order they went down, which becomes the report order.
//
// Only the front surface exists on a windowed platform. The back surface
// reports `Unsupported`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use winit::event::Touch;

//=== Internal Dependencies ===============================================

use crate::core::touch::{SamplingError, Surface, TouchPoint, TouchReport, TouchSource};

//=== TouchPhase ==========================================================

/// Lifecycle phase of one finger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

impl From<winit::event::TouchPhase> for TouchPhase {
    fn from(phase: winit::event::TouchPhase) -> Self {
        match phase {
            winit::event::TouchPhase::Started => TouchPhase::Started,
            winit::event::TouchPhase::Moved => TouchPhase::Moved,
            winit::event::TouchPhase::Ended => TouchPhase::Ended,
            winit::event::TouchPhase::Cancelled => TouchPhase::Cancelled,
        }
    }
}

//=== TouchTracker ========================================================

/// Accumulates winit touch events into a pollable front-surface report.
#[derive(Debug, Default)]
pub(crate) struct TouchTracker {
    /// Active fingers as (tracking id, position), in touch-down order.
    active: Vec<(u64, TouchPoint)>,
    sampling: bool,
}

impl TouchTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    //--- Event Processing -------------------------------------------------

    /// Applies a winit touch event.
    pub(crate) fn handle_touch(&mut self, touch: &Touch) {
        self.apply(
            touch.id,
            TouchPhase::from(touch.phase),
            touch.location.x,
            touch.location.y,
        );
    }

    /// Applies one finger update in physical pixels.
    pub(crate) fn apply(&mut self, id: u64, phase: TouchPhase, x: f64, y: f64) {
        let point = TouchPoint::new(to_coord(x), to_coord(y));
        let slot = self.active.iter().position(|(active_id, _)| *active_id == id);

        match (phase, slot) {
            (TouchPhase::Started | TouchPhase::Moved, Some(index)) => {
                self.active[index].1 = point;
            }
            (TouchPhase::Started | TouchPhase::Moved, None) => {
                self.active.push((id, point));
            }
            (TouchPhase::Ended | TouchPhase::Cancelled, Some(index)) => {
                // Keep report order of the remaining fingers
                self.active.remove(index);
            }
            (TouchPhase::Ended | TouchPhase::Cancelled, None) => {
                trace!(target: "platform::touch", "{:?} for unknown touch {}", phase, id);
            }
        }
    }

    /// Forgets every active finger (e.g. window lost focus).
    pub(crate) fn clear(&mut self) {
        self.active.clear();
    }

    pub(crate) fn active_count(&self) -> usize {
        self.active.len()
    }
}

//--- to_coord() ----------------------------------------------------------

/// Saturating conversion into the 16-bit device coordinate range.
fn to_coord(v: f64) -> i16 {
    v as i16
}

//=== TouchSource =========================================================

impl TouchSource for TouchTracker {
    fn start_sampling(&mut self, surface: Surface) -> Result<(), SamplingError> {
        match surface {
            Surface::Front => {
                self.sampling = true;
                Ok(())
            }
            Surface::Back => Err(SamplingError::Unsupported(surface)),
        }
    }

    fn stop_sampling(&mut self, surface: Surface) -> Result<(), SamplingError> {
        match surface {
            Surface::Front if self.sampling => {
                self.sampling = false;
                Ok(())
            }
            Surface::Front => Err(SamplingError::NotSampling(surface)),
            Surface::Back => Err(SamplingError::Unsupported(surface)),
        }
    }

    fn peek(&self, surface: Surface) -> Result<TouchReport, SamplingError> {
        match surface {
            Surface::Front if self.sampling => Ok(TouchReport::new(
                self.active.iter().map(|(_, point)| *point).collect(),
            )),
            Surface::Front => Err(SamplingError::NotSampling(surface)),
            Surface::Back => Err(SamplingError::Unsupported(surface)),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
