//=========================================================================
// Touch Snapshot
//=========================================================================
//
// Value types describing one polled reading of a touch surface.
//
// Architecture:
//   TouchSource → TouchReport (raw, unbounded) → Snapshot (clamped, fixed)
//
// Snapshots are `Copy` and compared by exact equality over the finger count
// and every point slot. Unused slots stay zeroed so two readings of the same
// pose always compare equal.
//
//=========================================================================

//=== Constants ===========================================================

/// Maximum number of simultaneously reported touch points per surface.
pub const MAX_TOUCH_POINTS: usize = 8;

//=== Surface =============================================================

/// Physical touch-sensing region polled independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Primary panel (over the display). Drives the gesture machine.
    Front,

    /// Secondary panel. Sampled at init, never read.
    Back,
}

impl Surface {
    /// Every surface, in initialization order.
    pub const ALL: [Surface; 2] = [Surface::Front, Surface::Back];
}

//=== TouchPoint ==========================================================

/// One finger position in device-native coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TouchPoint {
    pub x: i16,
    pub y: i16,
}

impl TouchPoint {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

//=== TouchReport =========================================================

/// Raw report as delivered by a [`TouchSource`](super::TouchSource).
///
/// Unlike [`Snapshot`], a report may carry more points than the surface
/// maximum; [`Snapshot::from_report`] clamps it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchReport {
    pub points: Vec<TouchPoint>,
}

impl TouchReport {
    pub fn new(points: Vec<TouchPoint>) -> Self {
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn finger_count(&self) -> usize {
        self.points.len()
    }
}

impl From<&[TouchPoint]> for TouchReport {
    fn from(points: &[TouchPoint]) -> Self {
        Self::new(points.to_vec())
    }
}

//=== Snapshot ============================================================

/// Fixed-capacity reading of all active touch points on a surface.
///
/// Invariant: `fingers <= MAX_TOUCH_POINTS` and every slot at index
/// `>= fingers` is [`TouchPoint::ZERO`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Snapshot {
    fingers: usize,
    points: [TouchPoint; MAX_TOUCH_POINTS],
}

impl Snapshot {
    /// The untouched surface.
    pub const EMPTY: Self = Self {
        fingers: 0,
        points: [TouchPoint::ZERO; MAX_TOUCH_POINTS],
    };

    /// Builds a snapshot from report-ordered points, truncating past the maximum.
    pub fn from_points(points: &[TouchPoint]) -> Self {
        let fingers = points.len().min(MAX_TOUCH_POINTS);
        let mut snapshot = Self::EMPTY;
        snapshot.points[..fingers].copy_from_slice(&points[..fingers]);
        snapshot.fingers = fingers;
        snapshot
    }

    /// Clamps a raw report into a snapshot.
    pub fn from_report(report: &TouchReport) -> Self {
        Self::from_points(&report.points)
    }

    pub fn finger_count(&self) -> usize {
        self.fingers
    }

    pub fn is_untouched(&self) -> bool {
        self.fingers == 0
    }

    /// Active points in report order.
    pub fn points(&self) -> &[TouchPoint] {
        &self.points[..self.fingers]
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::EMPTY
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
