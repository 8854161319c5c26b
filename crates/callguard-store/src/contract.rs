//! Store contracts
//!
//! Backends are interchangeable behind these traits: the in-memory stores in
//! [`crate::memory`], the overridable mocks used in tests, or a durable
//! backend. Implementations must hand out and keep independent copies of
//! records, and must never let a reader observe a half-written record.

use crate::cancel::CancelSignal;
use crate::error::StoreError;
use callguard_model::{PhoneBook, User};

/// Keyed user records
pub trait UserStore: Send + Sync {
    /// Insert or replace the user keyed by its phone number
    ///
    /// # Errors
    /// - `StoreError::Cancelled` if `signal` is already set
    /// - `StoreError::Validation` if the record fails shape validation
    /// - `StoreError::EmptyKey` if the key is empty after validation
    fn upsert(&self, signal: &CancelSignal, user: &User) -> Result<(), StoreError>;

    /// Fetch a copy of one user
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if no record exists for the key.
    fn get_by_phone_number(
        &self,
        signal: &CancelSignal,
        phone_number: &str,
    ) -> Result<User, StoreError>;

    /// Copy every stored user at one instant, in no particular order
    ///
    /// # Errors
    /// Returns `StoreError::Cancelled` if the signal trips during the scan.
    fn get_all(&self, signal: &CancelSignal) -> Result<Vec<User>, StoreError>;

    /// Set only the spam flag of an existing user
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if the key is absent.
    fn update_spam_status(
        &self,
        signal: &CancelSignal,
        phone_number: &str,
        is_spam: bool,
    ) -> Result<(), StoreError>;
}

/// Phone books keyed by owner
pub trait PhoneBookStore: Send + Sync {
    /// Insert or replace the owner's whole phone book
    ///
    /// # Errors
    /// - `StoreError::Cancelled` if `signal` is already set
    /// - `StoreError::Validation` if the owner or any contact is malformed
    /// - `StoreError::EmptyKey` if the owner key is empty after validation
    fn upsert(&self, signal: &CancelSignal, phone_book: &PhoneBook) -> Result<(), StoreError>;

    /// Fetch a copy of the owner's phone book
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if the owner has no phone book.
    fn get_by_owner_phone_number(
        &self,
        signal: &CancelSignal,
        phone_number: &str,
    ) -> Result<PhoneBook, StoreError>;
}
