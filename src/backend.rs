//=========================================================================
// Touch Pointer Backend
//
// Main entry point: configures the touch subsystem and runs it inside the
// platform event loop.
//
// Architecture:
// ```text
//     BackendBuilder  ──build()──>  Backend  ──run()──>  [Event Loop]
//         │                           │
//         ├─ with_engage_window()     ├─ pointer_events() → Receiver
//         ├─ with_tap_window()        └─ blocks until window closes
//         └─ with_channel_capacity()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::info;

//=== Internal Dependencies ===============================================

use crate::core::{PointerAction, TouchConfig};
use crate::platform::{Platform, PlatformError};

//=== BackendBuilder ======================================================

/// Builder for configuring and constructing a [`Backend`].
///
/// # Default Values
///
/// - **Engage window**: 100 ms
/// - **Tap window**: 100 ms
/// - **Channel capacity**: 128 actions
///
/// # Examples
///
/// ```no_run
/// use touch_pointer::BackendBuilder;
///
/// let backend = BackendBuilder::new()
///     .with_engage_window(120)
///     .with_tap_window(30)
///     .build();
///
/// let actions = backend.pointer_events();
/// std::thread::spawn(move || {
///     for action in actions {
///         println!("{:?}", action);
///     }
/// });
///
/// backend.run().expect("event loop failed");
/// ```
#[derive(Debug, Clone)]
pub struct BackendBuilder {
    config: TouchConfig,
    channel_capacity: usize,
}

impl BackendBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: TouchConfig::new(),
            channel_capacity: 128,
        }
    }

    /// Sets how long a touch must stay engaged before it becomes a hold.
    ///
    /// # Panics
    ///
    /// Panics if `ms == 0`.
    pub fn with_engage_window(mut self, ms: u64) -> Self {
        self.config = self.config.with_engage_window(ms);
        self
    }

    /// Sets the delay between a tap's press and release.
    ///
    /// # Panics
    ///
    /// Panics if `ms == 0`.
    pub fn with_tap_window(mut self, ms: u64) -> Self {
        self.config = self.config.with_tap_window(ms);
        self
    }

    /// Sets the pointer action channel capacity.
    ///
    /// When the consumer falls behind and the channel is full, further
    /// actions are dropped rather than stalling the event loop.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the backend and its pointer action channel.
    pub fn build(self) -> Backend {
        info!(
            "Building touch backend (engage: {} ms, tap: {} ms, channel: {})",
            self.config.engage_window_ms(),
            self.config.tap_window_ms(),
            self.channel_capacity
        );

        let (sender, receiver) = bounded(self.channel_capacity);

        Backend {
            config: self.config,
            sender,
            receiver,
        }
    }
}

impl Default for BackendBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Backend =============================================================

/// Configured touch-to-pointer backend, ready to run.
pub struct Backend {
    config: TouchConfig,
    sender: Sender<PointerAction>,
    receiver: Receiver<PointerAction>,
}

impl Backend {
    /// Returns a receiver for synthesized pointer actions.
    ///
    /// May be called several times; receivers share one queue.
    pub fn pointer_events(&self) -> Receiver<PointerAction> {
        self.receiver.clone()
    }

    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// Runs the platform event loop, blocking until the window closes.
    ///
    /// Touch sampling starts here and stops when the loop exits.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    pub fn run(self) -> Result<(), PlatformError> {
        info!("Starting touch backend");

        let Backend { config, sender, receiver } = self;
        // Only receivers handed out via pointer_events() stay connected
        drop(receiver);

        let result = Platform::new(config, sender).run();

        info!("Touch backend shut down");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
