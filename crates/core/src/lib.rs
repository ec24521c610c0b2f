//! GèrTonArgent Core - Domain entities, handlers, and traits.
//!
//! This crate contains the notification rules of the GèrTonArgent backend.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` and `push` crates.

pub mod advice;
pub mod alerts;
pub mod callable;
pub mod constants;
pub mod errors;
pub mod events;
pub mod notifications;
pub mod summary;
pub mod tokens;
pub mod totals;
pub mod transactions;
pub mod users;
pub mod utils;

pub use callable::{AuthContext, CallContext};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
