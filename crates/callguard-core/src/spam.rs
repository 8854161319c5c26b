//! Spam classification sweep
//!
//! A batch pass over every known user. The sweep is not atomic across
//! users: it stops at the first store failure or cancellation, and every
//! flag written before that point stays written. The returned error is the
//! only signal of that partial state.

use callguard_model::User;
use callguard_store::{CancelSignal, StoreError, UserStore};
use std::sync::Arc;

/// Decides whether a user should be flagged
#[cfg_attr(test, mockall::automock)]
pub trait SpamPredicate: Send + Sync {
    /// Verdict for one not-yet-flagged user
    fn is_spam(&self, user: &User) -> bool;
}

impl<F> SpamPredicate for F
where
    F: Fn(&User) -> bool + Send + Sync,
{
    fn is_spam(&self, user: &User) -> bool {
        self(user)
    }
}

/// Flags every user that is not flagged yet
///
/// Stand-in until a real scoring model is plugged in.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagUnflagged;

impl SpamPredicate for FlagUnflagged {
    fn is_spam(&self, _user: &User) -> bool {
        true
    }
}

/// Counters from a completed sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Users in the snapshot
    pub scanned: usize,
    /// Users skipped because they were already flagged
    pub already_flagged: usize,
    /// Users the predicate flagged
    pub flagged: usize,
    /// Users the predicate left unflagged
    pub cleared: usize,
}

/// Recomputes spam flags across the user store
#[derive(Clone)]
pub struct SpamSweep {
    users: Arc<dyn UserStore>,
    predicate: Arc<dyn SpamPredicate>,
}

impl SpamSweep {
    /// Create sweep over a store with the given predicate
    #[inline]
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>, predicate: Arc<dyn SpamPredicate>) -> Self {
        Self { users, predicate }
    }

    /// Create sweep with [`FlagUnflagged`]
    #[inline]
    #[must_use]
    pub fn with_default_predicate(users: Arc<dyn UserStore>) -> Self {
        Self::new(users, Arc::new(FlagUnflagged))
    }

    /// Run one pass over a snapshot of all users
    ///
    /// Cancellation is re-checked before each user, so a cancelled sweep
    /// does at most one more update.
    ///
    /// # Errors
    /// Returns the first store error or `StoreError::Cancelled`; updates
    /// made before it are not rolled back.
    pub fn run(&self, signal: &CancelSignal) -> Result<SweepSummary, StoreError> {
        signal.check()?;
        let snapshot = self.users.get_all(signal)?;

        let mut summary = SweepSummary {
            scanned: snapshot.len(),
            ..SweepSummary::default()
        };

        for user in &snapshot {
            if let Err(e) = signal
                .check()
                .and_then(|()| self.classify(signal, user, &mut summary))
            {
                tracing::warn!(
                    error = %e,
                    phone = %user.phone_number,
                    flagged = summary.flagged,
                    cleared = summary.cleared,
                    "spam sweep aborted"
                );
                return Err(e);
            }
        }

        tracing::info!(
            scanned = summary.scanned,
            already_flagged = summary.already_flagged,
            flagged = summary.flagged,
            cleared = summary.cleared,
            "spam sweep completed"
        );
        Ok(summary)
    }

    fn classify(
        &self,
        signal: &CancelSignal,
        user: &User,
        summary: &mut SweepSummary,
    ) -> Result<(), StoreError> {
        if user.is_spam {
            summary.already_flagged += 1;
            return Ok(());
        }

        let verdict = self.predicate.is_spam(user);
        self.users
            .update_spam_status(signal, &user.phone_number, verdict)?;

        if verdict {
            summary.flagged += 1;
        } else {
            summary.cleared += 1;
        }
        Ok(())
    }
}
