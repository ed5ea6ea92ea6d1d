//=========================================================================
// Platform Subsystem
//
// Hosts the touch subsystem inside a winit event loop.
//
// Architecture:
// ```text
//  Main Thread:                          Consumer Thread:
//  ┌───────────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop             │    │  Application     │
//  │   ↓                           │    │                  │
//  │  WindowEvent::Touch           │    │  Receiver<       │
//  │   ↓                           │    │   PointerAction> │
//  │  TouchTracker (TouchSource)   │    │                  │
//  │   ↓                           │    └──────────────────┘
//  │  RedrawRequested              │             ↑
//  │   ↓ (poll)                    │             │
//  │  TouchSubsystem ──ChannelSink─┼─────────────┘
//  └───────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = poll tick**: one recognition step per frame
// - **Single owner**: the subsystem lives on the event-loop thread; only
//   pointer actions cross threads
// - **Graceful channel disconnect**: a missing consumer drops actions with
//   a warning, the window keeps running
//
//=========================================================================

//=== Submodules ==========================================================

mod touch_tracker;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::{ChannelSink, PointerAction, SystemClock, TouchConfig, TouchSubsystem};
use touch_tracker::TouchTracker;

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal: without an event loop there are no touch events.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=== Platform ============================================================

type WinitTouch = TouchSubsystem<TouchTracker, SystemClock, ChannelSink>;

/// Window owner and touch poll host.
///
/// # Thread Safety
///
/// Not Send/Sync: must stay on the thread running the event loop.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    /// Touch recognition, polled once per frame.
    touch: WinitTouch,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates the platform and starts touch sampling.
    ///
    /// Does not create the window yet; that happens lazily in `resumed()`.
    pub fn new(config: TouchConfig, sender: Sender<PointerAction>) -> Self {
        let touch = TouchSubsystem::new(
            config,
            TouchTracker::new(),
            SystemClock::new(),
            ChannelSink::new(sender),
        );

        info!(target: "platform", "Platform subsystem initialized");
        Self { window: None, touch }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// exits with an error.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Frame boundary: one recognition step.
    fn on_frame(&mut self) {
        self.touch.poll();

        let dropped = self.touch.sink().dropped();
        if dropped > 0 {
            trace!(target: "platform::touch", "{} pointer actions dropped so far", dropped);
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("Touch Pointer")
            .with_inner_size(LogicalSize::new(960, 544));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::Touch(touch) => {
                self.touch.source_mut().handle_touch(touch);
            }

            WindowEvent::Focused(false) => {
                // Touches in flight will never see their Ended event
                let active = self.touch.source().active_count();
                if active > 0 {
                    debug!(target: "platform::touch", "Focus lost, dropping {} touches", active);
                    self.touch.source_mut().clear();
                }
            }

            WindowEvent::RedrawRequested => {
                self.on_frame();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {
                // Ignore: Resized, keyboard, mouse, etc.
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
