//! Shape rules for phone numbers and display names
//!
//! Every write path runs records through [`validate`] before anything is
//! persisted. Checks run in a fixed order so the reported violation is
//! stable: phone length and prefix, then the all-digits check, then the name.

use std::fmt::{self, Display, Formatter};

/// Exact length of a canonical phone number
pub const PHONE_NUMBER_LEN: usize = 12;

/// Country prefix every canonical phone number starts with
pub const PHONE_NUMBER_PREFIX: &str = "91";

/// Maximum raw (untrimmed) name length, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Name used when only a phone number is being checked
///
/// Phone book owners and lookup keys carry no display name of their own.
pub const PLACEHOLDER_NAME: &str = "owner";

/// Validate a `(phone_number, name)` pair
///
/// # Errors
/// Returns the first violated rule as a [`ValidationError`].
pub fn validate(phone_number: &str, name: &str) -> Result<(), ValidationError> {
    validate_phone_number(phone_number)?;
    validate_name(name)
}

/// Validate a phone number on its own
///
/// Equivalent to [`validate`] with [`PLACEHOLDER_NAME`].
///
/// # Errors
/// Returns [`ValidationError::PhoneNumber`] describing the violation.
pub fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    let violation = if phone_number.len() != PHONE_NUMBER_LEN {
        Some(PhoneNumberViolation::Length {
            actual: phone_number.len(),
        })
    } else if !phone_number.starts_with(PHONE_NUMBER_PREFIX) {
        Some(PhoneNumberViolation::Prefix)
    } else if !phone_number.bytes().all(|b| b.is_ascii_digit()) {
        Some(PhoneNumberViolation::NonDigit)
    } else {
        None
    };

    match violation {
        Some(reason) => Err(ValidationError::PhoneNumber {
            number: phone_number.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Validate a display name
///
/// # Errors
/// Returns [`ValidationError::Name`] when the name is blank or too long.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Name {
            reason: NameViolation::Blank,
        });
    }

    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(ValidationError::Name {
            reason: NameViolation::TooLong { len },
        });
    }

    Ok(())
}

/// Record shape violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Phone number is not in canonical form
    #[error("invalid phone number '{number}': {reason}")]
    PhoneNumber {
        /// Offending input
        number: String,
        /// Which rule failed
        reason: PhoneNumberViolation,
    },

    /// Display name is blank or too long
    #[error("invalid name: {reason}")]
    Name {
        /// Which rule failed
        reason: NameViolation,
    },

    /// A contact inside a phone book failed validation
    #[error("invalid contact at index {index}: {source}")]
    Contact {
        /// Position of the contact in the batch
        index: usize,
        /// Underlying violation
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Whether the violation concerns a phone number
    #[must_use]
    pub fn is_phone_number(&self) -> bool {
        match self {
            Self::PhoneNumber { .. } => true,
            Self::Name { .. } => false,
            Self::Contact { source, .. } => source.is_phone_number(),
        }
    }

    /// Whether the violation concerns a display name
    #[must_use]
    pub fn is_name(&self) -> bool {
        match self {
            Self::PhoneNumber { .. } => false,
            Self::Name { .. } => true,
            Self::Contact { source, .. } => source.is_name(),
        }
    }

    /// Attach the batch position of the contact that failed
    #[must_use]
    pub fn at_contact(self, index: usize) -> Self {
        Self::Contact {
            index,
            source: Box::new(self),
        }
    }
}

/// Phone number rule that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneNumberViolation {
    /// Wrong number of characters
    Length {
        /// Observed length in bytes
        actual: usize,
    },
    /// Does not start with the country prefix
    Prefix,
    /// Contains something other than ASCII digits
    NonDigit,
}

impl Display for PhoneNumberViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length { actual } => write!(
                f,
                "expected {PHONE_NUMBER_LEN} characters, got {actual}"
            ),
            Self::Prefix => write!(f, "must start with '{PHONE_NUMBER_PREFIX}'"),
            Self::NonDigit => write!(f, "must contain only ASCII digits"),
        }
    }
}

/// Name rule that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameViolation {
    /// Empty after trimming whitespace
    Blank,
    /// Longer than [`MAX_NAME_LEN`]
    TooLong {
        /// Observed length in characters
        len: usize,
    },
}

impl Display for NameViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "name is required"),
            Self::TooLong { len } => {
                write!(f, "name must be at most {MAX_NAME_LEN} characters, got {len}")
            }
        }
    }
}
