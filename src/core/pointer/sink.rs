//=========================================================================
// Pointer Sink
//=========================================================================
//
// Delivery of synthesized pointer actions to the surrounding event system.
//
// Architecture:
//   GestureMachine → PointerSink::emit() → (channel) → consumer thread
//
// Delivery is fire-and-forget. A dropped action is preferable to stalling
// the poll loop, so failures are logged and never retried.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Sender, TrySendError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::action::PointerAction;

//=== PointerSink =========================================================

/// Outbound capability accepting synthesized pointer actions.
pub trait PointerSink {
    /// Delivers one action synchronously. Must not block.
    fn emit(&mut self, action: PointerAction);
}

/// Collects actions in memory (headless hosts, tests).
impl PointerSink for Vec<PointerAction> {
    fn emit(&mut self, action: PointerAction) {
        self.push(action);
    }
}

//=== ChannelSink =========================================================

/// Forwards actions over a crossbeam channel to another thread.
///
/// Uses `try_send` so a full bounded channel drops the action instead of
/// blocking the poll loop.
pub struct ChannelSink {
    sender: Sender<PointerAction>,
    dropped: u64,
}

impl ChannelSink {
    pub fn new(sender: Sender<PointerAction>) -> Self {
        Self { sender, dropped: 0 }
    }

    /// Number of actions that could not be delivered.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl PointerSink for ChannelSink {
    fn emit(&mut self, action: PointerAction) {
        match self.sender.try_send(action) {
            Ok(()) => {
                trace!(target: "pointer", "Emitted {:?}", action);
            }
            Err(TrySendError::Full(action)) => {
                self.dropped += 1;
                warn!(target: "pointer", "Channel full, dropping {:?}", action);
            }
            Err(TrySendError::Disconnected(action)) => {
                self.dropped += 1;
                warn!(target: "pointer", "Channel disconnected, dropping {:?}", action);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
