//=========================================================================
// Pointer Emitter
//=========================================================================
//
// Pointer action types and the sink they are delivered through.
//
// Components:
// - `action`: button / wheel / motion action definitions
// - `sink`: `PointerSink` trait and the crossbeam-backed `ChannelSink`
//
//=========================================================================

//=== Module Declarations =================================================

pub mod action;
pub mod sink;

//=== Public API ==========================================================

pub use action::{PointerAction, PointerButton, WheelDirection};
pub use sink::{ChannelSink, PointerSink};
