//=========================================================================
// Core Systems
//
// Platform-independent touch-to-pointer recognition.
//
// Responsibilities:
// - Define the touch source, tick clock and pointer sink contracts
// - Recognize taps and holds from polled snapshots
// - Synthesize button, motion and wheel actions
//
// Notes:
// Nothing in here touches winit. Platform backends implement
// `TouchSource` and consume `PointerAction`s; tests inject doubles for
// every seam.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod clock;
pub mod config;
pub mod pointer;
pub mod touch;

#[cfg(test)]
pub(crate) mod test_support;

//=== Public API ==========================================================

pub use clock::{SystemClock, TickSource};
pub use config::TouchConfig;
pub use pointer::{ChannelSink, PointerAction, PointerButton, PointerSink, WheelDirection};
pub use touch::{GestureState, Snapshot, Surface, TouchPoint, TouchSubsystem};
