//! Cooperative cancellation
//!
//! Operations check the signal before starting work; the spam sweep also
//! checks it between users. A held lock is never interrupted.

use crate::error::StoreError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag
///
/// Clones observe the same flag. Once cancelled it stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    cancelled: Arc<AtomicBool>,
}

impl CancelSignal {
    /// Create a live signal
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a signal that is already cancelled
    #[inline]
    #[must_use]
    pub fn cancelled() -> Self {
        let signal = Self::new();
        signal.cancel();
        signal
    }

    /// Trip the signal for every clone
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Fail with [`StoreError::Cancelled`] once tripped
    ///
    /// # Errors
    /// Returns [`StoreError::Cancelled`] if the signal is set.
    #[inline]
    pub fn check(&self) -> Result<(), StoreError> {
        if self.is_cancelled() {
            Err(StoreError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_flag() {
        let signal = CancelSignal::new();
        let clone = signal.clone();
        assert!(clone.check().is_ok());

        signal.cancel();
        assert!(clone.is_cancelled());
        assert!(matches!(clone.check(), Err(StoreError::Cancelled)));
    }

    #[test]
    fn pre_cancelled() {
        assert!(CancelSignal::cancelled().is_cancelled());
    }
}
