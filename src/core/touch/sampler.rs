//=========================================================================
// Touch Sampler
//=========================================================================
//
// Non-blocking reads of the latest touch report for a surface.
//
// Architecture:
//   TouchSource::peek() → TouchReport → read_snapshot() → Snapshot
//
// Sampling never fails from the caller's point of view: an unavailable
// source reads as an untouched surface, an oversized report is clamped.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::snapshot::{Snapshot, Surface, TouchReport, MAX_TOUCH_POINTS};

//=== SamplingError =======================================================

/// Errors reported by a [`TouchSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SamplingError {
    /// `peek` called before `start_sampling` (or after `stop_sampling`).
    NotSampling(Surface),

    /// The source has no hardware behind this surface.
    Unsupported(Surface),

    /// The producer feeding the source went away.
    Disconnected,
}

impl std::fmt::Display for SamplingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotSampling(surface) => write!(f, "Sampling not started for {:?} surface", surface),
            Self::Unsupported(surface) => write!(f, "{:?} surface not supported by this source", surface),
            Self::Disconnected => write!(f, "Touch source disconnected"),
        }
    }
}

impl std::error::Error for SamplingError {}

//=== TouchSource =========================================================

/// Platform capability providing the latest touch report per surface.
pub trait TouchSource {
    /// Begins hardware sampling for `surface`.
    fn start_sampling(&mut self, surface: Surface) -> Result<(), SamplingError>;

    /// Ends hardware sampling for `surface`.
    fn stop_sampling(&mut self, surface: Surface) -> Result<(), SamplingError>;

    /// Returns the most recent report without waiting for a new sample.
    ///
    /// Must not block and must not consume the report: two peeks with no
    /// hardware activity in between return the same data.
    fn peek(&self, surface: Surface) -> Result<TouchReport, SamplingError>;
}

//--- read_snapshot() -----------------------------------------------------

/// Reads one snapshot, degrading failures to an untouched surface.
pub fn read_snapshot<T: TouchSource + ?Sized>(source: &T, surface: Surface) -> Snapshot {
    let report = match source.peek(surface) {
        Ok(report) => report,
        Err(e) => {
            debug!(target: "touch::sampler", "Peek failed ({}), reading as untouched", e);
            return Snapshot::EMPTY;
        }
    };

    if report.finger_count() > MAX_TOUCH_POINTS {
        warn!(
            target: "touch::sampler",
            "{:?} report has {} points, clamping to {}",
            surface,
            report.finger_count(),
            MAX_TOUCH_POINTS
        );
    }

    Snapshot::from_report(&report)
}

//=========================================================================
// Unit Tests
//=========================================================================
