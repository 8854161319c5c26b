//! Testing utilities for Callguard workspace
//!
//! Shared fixtures and store doubles whose operations can be overridden one
//! at a time.

#![allow(missing_docs)]

use callguard_model::{Contact, PhoneBook, User};
use callguard_store::{CancelSignal, PhoneBookStore, RecordKind, StoreError, UserStore};
use parking_lot::Mutex;
use std::sync::Arc;

pub type UpsertUserFn = Box<dyn Fn(&CancelSignal, &User) -> Result<(), StoreError> + Send + Sync>;
pub type GetUserFn = Box<dyn Fn(&CancelSignal, &str) -> Result<User, StoreError> + Send + Sync>;
pub type GetAllUsersFn = Box<dyn Fn(&CancelSignal) -> Result<Vec<User>, StoreError> + Send + Sync>;
pub type UpdateSpamFn =
    Box<dyn Fn(&CancelSignal, &str, bool) -> Result<(), StoreError> + Send + Sync>;
pub type UpsertPhoneBookFn =
    Box<dyn Fn(&CancelSignal, &PhoneBook) -> Result<(), StoreError> + Send + Sync>;
pub type GetPhoneBookFn =
    Box<dyn Fn(&CancelSignal, &str) -> Result<PhoneBook, StoreError> + Send + Sync>;

/// Canonical phone number for fixture `n`
pub fn phone(n: u64) -> String {
    format!("91{n:010}")
}

pub fn user(n: u64, name: &str) -> User {
    User::new(phone(n), name)
}

pub fn contact(n: u64, name: &str) -> Contact {
    Contact::new(phone(n), name)
}

pub fn phone_book(owner: u64, contacts: &[(u64, &str)]) -> PhoneBook {
    PhoneBook::new(
        phone(owner),
        contacts.iter().map(|(n, name)| contact(*n, name)).collect(),
    )
}

/// User store double
///
/// Unset operations delegate to `inner` when one is wrapped, otherwise they
/// succeed with an empty result (`NotFound` for point lookups).
#[derive(Default)]
pub struct MockUserStore {
    pub inner: Option<Arc<dyn UserStore>>,
    pub on_upsert: Option<UpsertUserFn>,
    pub on_get_by_phone_number: Option<GetUserFn>,
    pub on_get_all: Option<GetAllUsersFn>,
    pub on_update_spam_status: Option<UpdateSpamFn>,
    spam_updates: Mutex<Vec<(String, bool)>>,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delegate every non-overridden operation to `inner`
    pub fn wrapping(inner: Arc<dyn UserStore>) -> Self {
        Self {
            inner: Some(inner),
            ..Self::default()
        }
    }

    pub fn with_upsert(
        mut self,
        f: impl Fn(&CancelSignal, &User) -> Result<(), StoreError> + Send + Sync + 'static,
    ) -> Self {
        self.on_upsert = Some(Box::new(f));
        self
    }

    pub fn with_get_by_phone_number(
        mut self,
        f: impl Fn(&CancelSignal, &str) -> Result<User, StoreError> + Send + Sync + 'static,
    ) -> Self {
        self.on_get_by_phone_number = Some(Box::new(f));
        self
    }

    pub fn with_get_all(
        mut self,
        f: impl Fn(&CancelSignal) -> Result<Vec<User>, StoreError> + Send + Sync + 'static,
    ) -> Self {
        self.on_get_all = Some(Box::new(f));
        self
    }

    pub fn with_update_spam_status(
        mut self,
        f: impl Fn(&CancelSignal, &str, bool) -> Result<(), StoreError> + Send + Sync + 'static,
    ) -> Self {
        self.on_update_spam_status = Some(Box::new(f));
        self
    }

    /// Every `update_spam_status` call received, in order
    pub fn spam_updates(&self) -> Vec<(String, bool)> {
        self.spam_updates.lock().clone()
    }
}

impl UserStore for MockUserStore {
    fn upsert(&self, signal: &CancelSignal, user: &User) -> Result<(), StoreError> {
        match (&self.on_upsert, &self.inner) {
            (Some(f), _) => f(signal, user),
            (None, Some(inner)) => inner.upsert(signal, user),
            (None, None) => Ok(()),
        }
    }

    fn get_by_phone_number(
        &self,
        signal: &CancelSignal,
        phone_number: &str,
    ) -> Result<User, StoreError> {
        match (&self.on_get_by_phone_number, &self.inner) {
            (Some(f), _) => f(signal, phone_number),
            (None, Some(inner)) => inner.get_by_phone_number(signal, phone_number),
            (None, None) => Err(StoreError::not_found(RecordKind::User, phone_number)),
        }
    }

    fn get_all(&self, signal: &CancelSignal) -> Result<Vec<User>, StoreError> {
        match (&self.on_get_all, &self.inner) {
            (Some(f), _) => f(signal),
            (None, Some(inner)) => inner.get_all(signal),
            (None, None) => Ok(Vec::new()),
        }
    }

    fn update_spam_status(
        &self,
        signal: &CancelSignal,
        phone_number: &str,
        is_spam: bool,
    ) -> Result<(), StoreError> {
        self.spam_updates
            .lock()
            .push((phone_number.to_string(), is_spam));
        match (&self.on_update_spam_status, &self.inner) {
            (Some(f), _) => f(signal, phone_number, is_spam),
            (None, Some(inner)) => inner.update_spam_status(signal, phone_number, is_spam),
            (None, None) => Ok(()),
        }
    }
}

/// Phone book store double
///
/// Records every phone book it is asked to upsert.
#[derive(Default)]
pub struct MockPhoneBookStore {
    pub on_upsert: Option<UpsertPhoneBookFn>,
    pub on_get_by_owner_phone_number: Option<GetPhoneBookFn>,
    upserts: Mutex<Vec<PhoneBook>>,
}

impl MockPhoneBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_upsert(
        mut self,
        f: impl Fn(&CancelSignal, &PhoneBook) -> Result<(), StoreError> + Send + Sync + 'static,
    ) -> Self {
        self.on_upsert = Some(Box::new(f));
        self
    }

    pub fn with_get_by_owner_phone_number(
        mut self,
        f: impl Fn(&CancelSignal, &str) -> Result<PhoneBook, StoreError> + Send + Sync + 'static,
    ) -> Self {
        self.on_get_by_owner_phone_number = Some(Box::new(f));
        self
    }

    /// Phone books passed to `upsert`, in order
    pub fn upserts(&self) -> Vec<PhoneBook> {
        self.upserts.lock().clone()
    }
}

impl PhoneBookStore for MockPhoneBookStore {
    fn upsert(&self, signal: &CancelSignal, phone_book: &PhoneBook) -> Result<(), StoreError> {
        self.upserts.lock().push(phone_book.clone());
        match &self.on_upsert {
            Some(f) => f(signal, phone_book),
            None => Ok(()),
        }
    }

    fn get_by_owner_phone_number(
        &self,
        signal: &CancelSignal,
        phone_number: &str,
    ) -> Result<PhoneBook, StoreError> {
        match &self.on_get_by_owner_phone_number {
            Some(f) => f(signal, phone_number),
            None => Err(StoreError::not_found(RecordKind::PhoneBook, phone_number)),
        }
    }
}
