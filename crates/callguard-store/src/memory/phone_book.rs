//! In-memory phone book store

use crate::cancel::CancelSignal;
use crate::contract::PhoneBookStore;
use crate::error::{RecordKind, StoreError};
use callguard_model::PhoneBook;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Phone books keyed by owner phone number
#[derive(Debug, Default)]
pub struct MemoryPhoneBookStore {
    books: RwLock<HashMap<String, PhoneBook>>,
}

impl MemoryPhoneBookStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of owners with a phone book
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.read().len()
    }

    /// Check if store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PhoneBookStore for MemoryPhoneBookStore {
    fn upsert(&self, signal: &CancelSignal, phone_book: &PhoneBook) -> Result<(), StoreError> {
        signal.check()?;
        phone_book.validate()?;
        if phone_book.owner_phone_number.is_empty() {
            return Err(StoreError::EmptyKey(RecordKind::PhoneBook));
        }

        // Deep copy: the contact list is cloned along with the owner
        let record = phone_book.clone();
        self.books
            .write()
            .insert(record.owner_phone_number.clone(), record);

        tracing::debug!(
            owner = %phone_book.owner_phone_number,
            contacts = phone_book.len(),
            "upserted phone book"
        );
        Ok(())
    }

    fn get_by_owner_phone_number(
        &self,
        signal: &CancelSignal,
        phone_number: &str,
    ) -> Result<PhoneBook, StoreError> {
        signal.check()?;
        self.books
            .read()
            .get(phone_number)
            .cloned()
            .ok_or_else(|| StoreError::not_found(RecordKind::PhoneBook, phone_number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callguard_model::Contact;
    use pretty_assertions::assert_eq;

    fn book() -> PhoneBook {
        PhoneBook::new("919876543210", vec![Contact::new("919123456789", "Bob")])
    }

    #[test]
    fn upsert_and_lookup() {
        let store = MemoryPhoneBookStore::new();
        let signal = CancelSignal::new();

        store.upsert(&signal, &book()).unwrap();

        let found = store
            .get_by_owner_phone_number(&signal, "919876543210")
            .unwrap();
        assert_eq!(found.contacts.len(), 1);
        assert_eq!(found.contacts[0].name, "Bob");
    }

    #[test]
    fn lookup_missing() {
        let store = MemoryPhoneBookStore::new();
        let err = store
            .get_by_owner_phone_number(&CancelSignal::new(), "919999999999")
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotFound {
                kind: RecordKind::PhoneBook,
                ..
            }
        ));
    }

    #[test]
    fn rejects_bad_owner() {
        let store = MemoryPhoneBookStore::new();
        let err = store
            .upsert(&CancelSignal::new(), &PhoneBook::new("123", Vec::new()))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(store.is_empty());
    }

    #[test]
    fn rejects_bad_contact() {
        let store = MemoryPhoneBookStore::new();
        let mut bad = book();
        bad.contacts.push(Contact::new("919123456780", ""));

        let err = store.upsert(&CancelSignal::new(), &bad).unwrap_err();
        assert!(err.is_validation());
        assert!(store.is_empty());
    }

    #[test]
    fn honours_cancellation() {
        let store = MemoryPhoneBookStore::new();
        let err = store.upsert(&CancelSignal::cancelled(), &book()).unwrap_err();
        assert!(err.is_cancelled());
        assert!(store.is_empty());
    }

    #[test]
    fn replaces_not_merges() {
        let store = MemoryPhoneBookStore::new();
        let signal = CancelSignal::new();
        store.upsert(&signal, &book()).unwrap();

        let replacement = PhoneBook::new(
            "919876543210",
            vec![
                Contact::new("919000000001", "Carol"),
                Contact::new("919000000002", "Dan"),
            ],
        );
        store.upsert(&signal, &replacement).unwrap();

        let found = store
            .get_by_owner_phone_number(&signal, "919876543210")
            .unwrap();
        assert_eq!(found, replacement);
    }

    #[test]
    fn contact_lists_are_isolated() {
        let store = MemoryPhoneBookStore::new();
        let signal = CancelSignal::new();
        let mut input = book();
        store.upsert(&signal, &input).unwrap();

        input.contacts[0].name = "Mallory".to_string();
        input.contacts.push(Contact::new("919000000001", "Eve"));

        let mut found = store
            .get_by_owner_phone_number(&signal, "919876543210")
            .unwrap();
        assert_eq!(found, book());

        found.contacts.clear();
        assert_eq!(
            store
                .get_by_owner_phone_number(&signal, "919876543210")
                .unwrap(),
            book()
        );
    }

    #[test]
    fn empty_book_is_stored() {
        let store = MemoryPhoneBookStore::new();
        let signal = CancelSignal::new();
        store
            .upsert(&signal, &PhoneBook::new("919876543210", Vec::new()))
            .unwrap();

        let found = store
            .get_by_owner_phone_number(&signal, "919876543210")
            .unwrap();
        assert!(found.is_empty());
    }
}
