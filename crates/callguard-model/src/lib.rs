//! Callguard record model
//!
//! Records and shape validation shared by every layer.
//!
//! # Overview
//!
//! - **User**: a phone number with its display name and spam flag
//! - **Contact**: one entry of an uploaded phone book
//! - **PhoneBook**: an owner's uploaded contacts
//! - **validate**: the single rule set every write path goes through
//!
//! # Example
//!
//! ```rust
//! use callguard_model::{Contact, PhoneBook, User};
//!
//! let user = User::new("919876543210", "Alice");
//! assert!(user.validate().is_ok());
//!
//! let book = PhoneBook::new("919876543210", vec![Contact::new("123", "Bob")]);
//! assert!(book.validate().unwrap_err().is_phone_number());
//! ```

#![warn(missing_docs)]

pub mod record;
pub mod validation;

// Re-exports
pub use record::{validate_contacts, Contact, PhoneBook, User};
pub use validation::{
    validate, validate_name, validate_phone_number, NameViolation, PhoneNumberViolation,
    ValidationError, MAX_NAME_LEN, PHONE_NUMBER_LEN, PHONE_NUMBER_PREFIX, PLACEHOLDER_NAME,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with records
    pub use crate::{Contact, PhoneBook, User, ValidationError};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
