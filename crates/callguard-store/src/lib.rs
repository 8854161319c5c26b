//! Callguard record stores
//!
//! Concurrent keyed stores for users and phone books.
//!
//! # Overview
//!
//! - **UserStore** / **PhoneBookStore**: backend-neutral contracts
//! - **MemoryUserStore** / **MemoryPhoneBookStore**: lock-guarded maps
//! - **CancelSignal**: cooperative cancellation checked on entry
//! - **StoreError**: the error every store and workflow reports
//!
//! # Example
//!
//! ```rust
//! use callguard_model::User;
//! use callguard_store::{CancelSignal, MemoryUserStore, UserStore};
//!
//! let store = MemoryUserStore::new();
//! let signal = CancelSignal::new();
//!
//! store.upsert(&signal, &User::new("919876543210", "Alice")).unwrap();
//! let user = store.get_by_phone_number(&signal, "919876543210").unwrap();
//! assert_eq!(user.name, "Alice");
//! ```

#![warn(missing_docs)]

pub mod cancel;
pub mod contract;
pub mod error;
pub mod memory;

// Re-exports
pub use cancel::CancelSignal;
pub use contract::{PhoneBookStore, UserStore};
pub use error::{RecordKind, StoreError};
pub use memory::{MemoryPhoneBookStore, MemoryUserStore};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for store operations
    pub use crate::{
        CancelSignal, MemoryPhoneBookStore, MemoryUserStore, PhoneBookStore, StoreError,
        UserStore,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
