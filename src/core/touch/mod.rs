//=========================================================================
// Touch Recognition
//=========================================================================
//
// Turns polled touch snapshots into pointer actions.
//
// Components:
// - `snapshot`: touch points, snapshots and surfaces (value types)
// - `sampler`: `TouchSource` contract and degrading snapshot reads
// - `gesture`: the tap / hold state machine
// - `subsystem`: per-tick poll driver owning all of the above
//
//=========================================================================

//=== Module Declarations =================================================

pub mod gesture;
pub mod sampler;
pub mod snapshot;
pub mod subsystem;

//=== Public API ==========================================================

pub use gesture::{centroid_delta, tap_button, GestureMachine, GestureState};
pub use sampler::{read_snapshot, SamplingError, TouchSource};
pub use snapshot::{Snapshot, Surface, TouchPoint, TouchReport, MAX_TOUCH_POINTS};
pub use subsystem::TouchSubsystem;
