//! In-memory user store

use crate::cancel::CancelSignal;
use crate::contract::UserStore;
use crate::error::{RecordKind, StoreError};
use callguard_model::User;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Users keyed by phone number behind a reader/writer lock
///
/// Reads share the lock, writes take it exclusively and only for the map
/// mutation itself.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Check if store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserStore for MemoryUserStore {
    fn upsert(&self, signal: &CancelSignal, user: &User) -> Result<(), StoreError> {
        signal.check()?;
        user.validate()?;
        if user.phone_number.is_empty() {
            return Err(StoreError::EmptyKey(RecordKind::User));
        }

        let record = user.clone();
        let replaced = self
            .users
            .write()
            .insert(record.phone_number.clone(), record)
            .is_some();

        tracing::debug!(phone = %user.phone_number, replaced, "upserted user");
        Ok(())
    }

    fn get_by_phone_number(
        &self,
        signal: &CancelSignal,
        phone_number: &str,
    ) -> Result<User, StoreError> {
        signal.check()?;
        self.users
            .read()
            .get(phone_number)
            .cloned()
            .ok_or_else(|| StoreError::not_found(RecordKind::User, phone_number))
    }

    fn get_all(&self, signal: &CancelSignal) -> Result<Vec<User>, StoreError> {
        signal.check()?;
        let users = self.users.read();
        let mut snapshot = Vec::with_capacity(users.len());
        for user in users.values() {
            signal.check()?;
            snapshot.push(user.clone());
        }
        Ok(snapshot)
    }

    fn update_spam_status(
        &self,
        signal: &CancelSignal,
        phone_number: &str,
        is_spam: bool,
    ) -> Result<(), StoreError> {
        signal.check()?;
        let mut users = self.users.write();
        let user = users
            .get_mut(phone_number)
            .ok_or_else(|| StoreError::not_found(RecordKind::User, phone_number))?;
        user.is_spam = is_spam;
        drop(users);

        tracing::debug!(phone = %phone_number, is_spam, "updated spam status");
        Ok(())
    }
}
