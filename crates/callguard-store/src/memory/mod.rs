//! In-memory store variants
//!
//! Each store is an independently locked map; the two are never locked
//! together.

mod phone_book;
mod user;

pub use phone_book::MemoryPhoneBookStore;
pub use user::MemoryUserStore;
