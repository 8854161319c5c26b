//! Stored records: users, contacts and phone books
//!
//! Records are plain values. Stores clone them on the way in and on the way
//! out, so a caller never holds an alias of persisted state.

use crate::validation::{self, ValidationError};
use serde::{Deserialize, Serialize};

/// A known phone number with its most recent display name
///
/// `is_spam` is owned by the spam sweep; upload paths never set it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    /// Unique key, canonical 12-digit form
    pub phone_number: String,

    /// Display name
    pub name: String,

    /// Spam classification
    #[serde(default)]
    pub is_spam: bool,
}

impl User {
    /// Create an unflagged user
    #[inline]
    #[must_use]
    pub fn new(phone_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            name: name.into(),
            is_spam: false,
        }
    }

    /// With spam flag
    #[inline]
    #[must_use]
    pub fn with_spam(mut self, is_spam: bool) -> Self {
        self.is_spam = is_spam;
        self
    }

    /// Check phone number and name shape
    ///
    /// # Errors
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate(&self.phone_number, &self.name)
    }
}

/// One entry of an uploaded phone book
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    /// Contact's phone number
    pub phone_number: String,

    /// Name the owner saved the contact under
    pub name: String,
}

impl Contact {
    /// Create contact
    #[inline]
    #[must_use]
    pub fn new(phone_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            name: name.into(),
        }
    }

    /// Check phone number and name shape (same rules as [`User`])
    ///
    /// # Errors
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate(&self.phone_number, &self.name)
    }
}

impl From<&Contact> for User {
    fn from(contact: &Contact) -> Self {
        Self::new(contact.phone_number.clone(), contact.name.clone())
    }
}

/// Contacts uploaded by one owner
///
/// Upserts replace the whole book; contact order is preserved as uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhoneBook {
    /// Owner's phone number, the store key
    #[serde(rename = "phone_number")]
    pub owner_phone_number: String,

    /// Uploaded contacts, possibly empty
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

impl PhoneBook {
    /// Create phone book
    #[inline]
    #[must_use]
    pub fn new(owner_phone_number: impl Into<String>, contacts: Vec<Contact>) -> Self {
        Self {
            owner_phone_number: owner_phone_number.into(),
            contacts,
        }
    }

    /// Number of contacts
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether the book has no contacts
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Check the owner number and every contact
    ///
    /// # Errors
    /// Returns the owner's phone number violation, or the first failing
    /// contact wrapped in [`ValidationError::Contact`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_phone_number(&self.owner_phone_number)?;
        validate_contacts(&self.contacts)
    }
}

/// Check every contact of a batch, stopping at the first failure
///
/// # Errors
/// Returns the violation wrapped with the contact's batch index.
pub fn validate_contacts(contacts: &[Contact]) -> Result<(), ValidationError> {
    contacts
        .iter()
        .enumerate()
        .try_for_each(|(i, c)| c.validate().map_err(|e| e.at_contact(i)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_user_is_not_spam() {
        let user = User::new("919876543210", "Alice");
        assert!(!user.is_spam);
        assert!(user.validate().is_ok());
    }

    #[test]
    fn contact_uses_user_rules() {
        assert!(Contact::new("919876543210", "Bob").validate().is_ok());
        assert!(Contact::new("9187654321", "Bob").validate().is_err());
        assert!(Contact::new("919876543210", "").validate().is_err());
    }

    #[test]
    fn phone_book_accepts_empty_list() {
        let book = PhoneBook::new("919876543210", Vec::new());
        assert!(book.validate().is_ok());
        assert!(book.is_empty());
    }

    #[test]
    fn phone_book_rejects_bad_owner() {
        let book = PhoneBook::new(
            "9187654321",
            vec![Contact::new("919123456789", "Alice")],
        );
        let err = book.validate().unwrap_err();
        assert!(matches!(err, ValidationError::PhoneNumber { .. }));
    }

    #[test]
    fn phone_book_reports_first_bad_contact() {
        let book = PhoneBook::new(
            "919876543210",
            vec![
                Contact::new("919123456789", "Alice"),
                Contact::new("919123456780", " "),
                Contact::new("9181234567", "Bob"),
            ],
        );
        let err = book.validate().unwrap_err();
        assert!(matches!(err, ValidationError::Contact { index: 1, .. }));
        assert!(err.is_name());
    }

    #[test]
    fn serde_field_names() {
        let book = PhoneBook::new("919876543210", vec![Contact::new("919123456789", "Bob")]);
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["phone_number"], "919876543210");
        assert_eq!(json["contacts"][0]["name"], "Bob");

        let user: User =
            serde_json::from_str(r#"{"phone_number":"919876543210","name":"Alice"}"#).unwrap();
        assert_eq!(user, User::new("919876543210", "Alice"));
    }
}
