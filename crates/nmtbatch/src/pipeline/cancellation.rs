//! # Cancellation

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A shared, sticky cancellation flag.
///
/// Clones observe the same flag; it is safe to set from a signal handler thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    ///
    /// ## Returns
    /// `true` if the token was already cancelled.
    pub fn cancel(&self) -> bool {
        self.cancelled.swap(true, Ordering::SeqCst)
    }

    /// Has cancellation been requested?
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
