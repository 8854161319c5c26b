//! Contact upload and caller lookup workflows
//!
//! Both workflows validate before touching a store and hand store failures
//! back unchanged; neither retries.

use callguard_model::{validate, validate_contacts, Contact, PhoneBook, PLACEHOLDER_NAME};
use callguard_store::{CancelSignal, PhoneBookStore, StoreError, UserStore};
use std::sync::Arc;

/// Name and spam flag resolved for a phone number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerInfo {
    /// Display name on record
    pub name: String,
    /// Current spam classification
    pub is_spam: bool,
}

/// Per-request workflows over the user and phone book stores
#[derive(Clone)]
pub struct ContactService {
    users: Arc<dyn UserStore>,
    phone_books: Arc<dyn PhoneBookStore>,
}

impl ContactService {
    /// Create service over explicit store instances
    #[inline]
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>, phone_books: Arc<dyn PhoneBookStore>) -> Self {
        Self { users, phone_books }
    }

    /// Replace the owner's phone book with `contacts`
    ///
    /// All or nothing: the first invalid contact aborts the upload before
    /// any write happens.
    ///
    /// # Errors
    /// - `StoreError::Cancelled` if `signal` is already set
    /// - `StoreError::Validation` for a malformed owner number or contact
    /// - any error from the phone book store, unchanged
    pub fn upload_contacts(
        &self,
        signal: &CancelSignal,
        owner_phone_number: &str,
        contacts: &[Contact],
    ) -> Result<(), StoreError> {
        signal.check()?;
        validate(owner_phone_number, PLACEHOLDER_NAME)?;
        validate_contacts(contacts)?;

        let phone_book = PhoneBook::new(owner_phone_number, contacts.to_vec());
        self.phone_books.upsert(signal, &phone_book)?;

        tracing::info!(
            owner = %owner_phone_number,
            contacts = contacts.len(),
            "uploaded contacts"
        );
        Ok(())
    }

    /// Resolve a phone number to its display name and spam flag
    ///
    /// # Errors
    /// - `StoreError::Cancelled` if `signal` is already set
    /// - `StoreError::Validation` for a malformed phone number
    /// - `StoreError::NotFound` or any other store error, unchanged
    pub fn lookup_user(
        &self,
        signal: &CancelSignal,
        phone_number: &str,
    ) -> Result<CallerInfo, StoreError> {
        signal.check()?;
        validate(phone_number, PLACEHOLDER_NAME)?;

        let user = self.users.get_by_phone_number(signal, phone_number)?;
        tracing::debug!(phone = %phone_number, is_spam = user.is_spam, "resolved caller");

        Ok(CallerInfo {
            name: user.name,
            is_spam: user.is_spam,
        })
    }
}
