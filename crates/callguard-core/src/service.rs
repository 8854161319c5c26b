//! Service root
//!
//! Owns the configuration and the store instances for the life of the
//! process and hands them to the workflows explicitly.

use crate::config::CallguardConfig;
use crate::contacts::{CallerInfo, ContactService};
use crate::scheduler::{SchedulerHandle, SweepScheduler};
use crate::spam::{FlagUnflagged, SpamPredicate, SpamSweep, SweepSummary};
use callguard_model::Contact;
use callguard_store::{
    CancelSignal, MemoryPhoneBookStore, MemoryUserStore, PhoneBookStore, StoreError, UserStore,
};
use std::sync::Arc;

/// Caller-id service wired to its stores
#[derive(Clone)]
pub struct Callguard {
    config: CallguardConfig,
    users: Arc<dyn UserStore>,
    phone_books: Arc<dyn PhoneBookStore>,
    contacts: ContactService,
    sweep: SpamSweep,
}

impl Callguard {
    /// Create service over explicit backends
    #[must_use]
    pub fn new(
        config: CallguardConfig,
        users: Arc<dyn UserStore>,
        phone_books: Arc<dyn PhoneBookStore>,
        predicate: Arc<dyn SpamPredicate>,
    ) -> Self {
        Self {
            contacts: ContactService::new(Arc::clone(&users), Arc::clone(&phone_books)),
            sweep: SpamSweep::new(Arc::clone(&users), predicate),
            config,
            users,
            phone_books,
        }
    }

    /// Create service over fresh in-memory stores with [`FlagUnflagged`]
    #[must_use]
    pub fn in_memory(config: CallguardConfig) -> Self {
        Self::new(
            config,
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryPhoneBookStore::new()),
            Arc::new(FlagUnflagged),
        )
    }

    /// Configuration in effect
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CallguardConfig {
        &self.config
    }

    /// User store
    #[inline]
    #[must_use]
    pub fn users(&self) -> &Arc<dyn UserStore> {
        &self.users
    }

    /// Phone book store
    #[inline]
    #[must_use]
    pub fn phone_books(&self) -> &Arc<dyn PhoneBookStore> {
        &self.phone_books
    }

    /// See [`ContactService::upload_contacts`]
    ///
    /// # Errors
    /// Validation, cancellation or phone book store errors, unchanged.
    pub fn upload_contacts(
        &self,
        signal: &CancelSignal,
        owner_phone_number: &str,
        contacts: &[Contact],
    ) -> Result<(), StoreError> {
        self.contacts
            .upload_contacts(signal, owner_phone_number, contacts)
    }

    /// See [`ContactService::lookup_user`]
    ///
    /// # Errors
    /// Validation, cancellation or user store errors, unchanged.
    pub fn lookup_user(
        &self,
        signal: &CancelSignal,
        phone_number: &str,
    ) -> Result<CallerInfo, StoreError> {
        self.contacts.lookup_user(signal, phone_number)
    }

    /// Run one spam sweep now
    ///
    /// # Errors
    /// See [`SpamSweep::run`].
    pub fn run_sweep(&self, signal: &CancelSignal) -> Result<SweepSummary, StoreError> {
        self.sweep.run(signal)
    }

    /// Start the periodic sweep if enabled in config
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start_scheduler(&self) -> Option<SchedulerHandle> {
        if !self.config.sweep.enabled {
            tracing::info!("spam sweep scheduler disabled");
            return None;
        }
        Some(SweepScheduler::spawn(self.sweep.clone(), &self.config.sweep))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callguard_model::User;
    use callguard_test_utils::{contact, phone};

    #[test]
    fn in_memory_round_trip() {
        let service = Callguard::in_memory(CallguardConfig::default());
        let signal = CancelSignal::new();

        service
            .users()
            .upsert(&signal, &User::new(phone(1), "Alice"))
            .unwrap();
        service
            .upload_contacts(&signal, &phone(1), &[contact(2, "Bob")])
            .unwrap();

        let info = service.lookup_user(&signal, &phone(1)).unwrap();
        assert_eq!(info.name, "Alice");
        assert!(!info.is_spam);

        let summary = service.run_sweep(&signal).unwrap();
        assert_eq!(summary.flagged, 1);
        assert!(service.lookup_user(&signal, &phone(1)).unwrap().is_spam);
    }

    #[test]
    fn upload_does_not_create_users() {
        let service = Callguard::in_memory(CallguardConfig::default());
        let signal = CancelSignal::new();

        service
            .upload_contacts(&signal, &phone(1), &[contact(2, "Bob")])
            .unwrap();

        assert!(service.lookup_user(&signal, &phone(2)).unwrap_err().is_not_found());
        assert!(service.users().get_all(&signal).unwrap().is_empty());
    }

    #[tokio::test]
    async fn scheduler_respects_enabled_flag() {
        let disabled = Callguard::in_memory(CallguardConfig::new().with_sweep_enabled(false));
        assert!(disabled.start_scheduler().is_none());

        let enabled = Callguard::in_memory(CallguardConfig::new());
        let handle = enabled.start_scheduler().unwrap();
        handle.shutdown().await;
    }
}
