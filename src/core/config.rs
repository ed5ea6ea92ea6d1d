//=========================================================================
// Touch Configuration
//=========================================================================
//
// The two timing windows governing gesture classification.
//
//=========================================================================

//=== Defaults ============================================================

/// Default time a touch must stay put before it counts as a hold.
pub const DEFAULT_ENGAGE_WINDOW_MS: u64 = 100;

/// Default delay between a tap's press and its release.
pub const DEFAULT_TAP_WINDOW_MS: u64 = 100;

//=== TouchConfig =========================================================

/// Timing parameters for the gesture state machine.
///
/// # Examples
///
/// ```
/// use touch_pointer::core::TouchConfig;
///
/// let config = TouchConfig::new()
///     .with_engage_window(150)
///     .with_tap_window(40);
///
/// assert_eq!(config.engage_window_ms(), 150);
/// assert_eq!(config.tap_window_ms(), 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchConfig {
    engage_window_ms: u64,
    tap_window_ms: u64,
}

impl TouchConfig {
    /// Creates a configuration with the default windows.
    pub fn new() -> Self {
        Self {
            engage_window_ms: DEFAULT_ENGAGE_WINDOW_MS,
            tap_window_ms: DEFAULT_TAP_WINDOW_MS,
        }
    }

    /// Sets how long a touch must stay engaged before it becomes a hold.
    ///
    /// Also the extension applied to the deadline on each one-finger motion.
    ///
    /// # Panics
    ///
    /// Panics if `ms == 0`.
    pub fn with_engage_window(mut self, ms: u64) -> Self {
        assert!(ms > 0, "Engage window must be positive");
        self.engage_window_ms = ms;
        self
    }

    /// Sets the delay between a tap's press and its confirming release.
    ///
    /// # Panics
    ///
    /// Panics if `ms == 0`.
    pub fn with_tap_window(mut self, ms: u64) -> Self {
        assert!(ms > 0, "Tap window must be positive");
        self.tap_window_ms = ms;
        self
    }

    pub fn engage_window_ms(&self) -> u64 {
        self.engage_window_ms
    }

    pub fn tap_window_ms(&self) -> u64 {
        self.tap_window_ms
    }
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
