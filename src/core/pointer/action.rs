//=========================================================================
// Pointer Actions
//=========================================================================
//
// Abstract pointer events synthesized from recognized touch gestures.
//
// The surrounding event system receives these through a `PointerSink`.
// All motion is relative; there is no absolute cursor position here.
//
//=========================================================================

//=== PointerButton =======================================================

/// Emulated mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary button (one-finger tap).
    Left,

    /// Secondary button (two-finger tap).
    Right,

    /// Middle button (three-finger tap).
    Middle,
}

//=== WheelDirection ======================================================

/// Scroll wheel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelDirection {
    Up,
    Down,
}

impl WheelDirection {
    /// Direction for a vertical delta: up for negative, down for positive.
    ///
    /// Returns `None` for a zero delta.
    pub fn from_delta(dy: i32) -> Option<Self> {
        match dy.signum() {
            -1 => Some(Self::Up),
            1 => Some(Self::Down),
            _ => None,
        }
    }
}

//=== PointerAction =======================================================

/// One synthesized pointer event.
///
/// ```text
/// ButtonPress(Left) ... ButtonRelease(Left)   one-finger tap
/// Motion { dx, dy }                            one-finger hold/drag
/// WheelTick(Down)                              two-finger drag down
/// WheelRelease(Up) + WheelRelease(Down)        two-finger drag paused
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerAction {
    ButtonPress(PointerButton),
    ButtonRelease(PointerButton),

    /// Relative cursor motion in damped panel units.
    Motion { dx: i32, dy: i32 },

    /// Wheel pressed in a direction (one scroll tick).
    WheelTick(WheelDirection),

    /// Wheel state released for a direction.
    WheelRelease(WheelDirection),
}

//=========================================================================
// Unit Tests
//=========================================================================
