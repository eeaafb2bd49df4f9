//! Cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cancellation signal checked between agents inside a tick.
///
/// Cancelling abandons the remainder of the tick (never partial-agent
/// state) and marks the tick report as aborted.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates an unsignalled token.
    #[must_use]
    pub fn new() -> Self {
        CancelToken::default()
    }

    /// Signals cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clears the signal (between ticks).
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
