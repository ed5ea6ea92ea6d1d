//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use touch_pointer::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Backend facade
pub use crate::{Backend, BackendBuilder, PlatformError};

// Configuration and clock
pub use crate::core::{SystemClock, TickSource, TouchConfig};

// Touch recognition
pub use crate::core::touch::{
    GestureState, SamplingError, Snapshot, Surface, TouchPoint, TouchReport, TouchSource,
    TouchSubsystem,
};

// Pointer output
pub use crate::core::{PointerAction, PointerButton, PointerSink, WheelDirection};
