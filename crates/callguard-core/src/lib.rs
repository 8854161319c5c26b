//! Callguard Core - caller-id workflows
//!
//! The per-request and batch operations over the record stores:
//! - Uploads an owner's contacts as one phone book, all or nothing
//! - Resolves a phone number to a display name and spam flag
//! - Sweeps every known user through a pluggable spam predicate
//! - Schedules the sweep and wires config and logging
//!
//! # Example
//!
//! ```rust
//! use callguard_core::{Callguard, CallguardConfig};
//! use callguard_model::{Contact, User};
//! use callguard_store::CancelSignal;
//!
//! let service = Callguard::in_memory(CallguardConfig::new());
//! let signal = CancelSignal::new();
//!
//! service.users().upsert(&signal, &User::new("919876543210", "Alice")).unwrap();
//! service
//!     .upload_contacts(&signal, "919876543210", &[Contact::new("919123456789", "Bob")])
//!     .unwrap();
//!
//! service.run_sweep(&signal).unwrap();
//! assert!(service.lookup_user(&signal, "919876543210").unwrap().is_spam);
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod contacts;
pub mod scheduler;
pub mod service;
pub mod spam;
pub mod telemetry;

// Re-exports for convenience
pub use config::{CallguardConfig, ConfigError, LogFormat, LoggingConfig, SweepConfig};
pub use contacts::{CallerInfo, ContactService};
pub use scheduler::{SchedulerHandle, SchedulerStats, SweepScheduler};
pub use service::Callguard;
pub use spam::{FlagUnflagged, SpamPredicate, SpamSweep, SweepSummary};
pub use telemetry::init_tracing;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Callguard Core
    pub use crate::{
        Callguard, CallguardConfig, CallerInfo, ContactService, SpamPredicate, SpamSweep,
        SweepScheduler,
    };
    pub use callguard_store::{CancelSignal, StoreError};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
