//=========================================================================
// Touch Pointer — Library Root
//
// Turns polled multi-finger touch-panel snapshots into emulated pointer
// events: taps become button clicks, one-finger holds move the pointer,
// two-finger holds scroll.
//
// Responsibilities:
// - Expose the recognition core (`core`) for hosts with their own loop
// - Keep the winit backend (`platform`) private behind `Backend`
//
// Typical usage:
// ```no_run
// use touch_pointer::BackendBuilder;
//
// fn main() {
//     let backend = BackendBuilder::new().build();
//     let actions = backend.pointer_events();
//     std::thread::spawn(move || for a in actions { println!("{:?}", a) });
//     backend.run().unwrap();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the gesture state machine, the poll driver and the
// source / clock / sink contracts. Hosts that already own a frame loop
// drive `core::TouchSubsystem` directly.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` hosts the subsystem in a winit event loop and is not part
// of the public API surface.
//
mod backend;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use backend::{Backend, BackendBuilder};
pub use platform::PlatformError;
