//! # eligo-store
//!
//! In-memory reference implementations of the Eligo store traits.
//!
//! Both stores keep their records in a `Vec` behind a `Mutex` and apply
//! update patches under that single lock, so a reader can never observe a
//! half-applied update. Swapping in a real database means implementing
//! [`eligo_core::traits::VerificationStore`] and
//! [`eligo_core::traits::PriorAuthStore`] against it; nothing else in the
//! workspace changes.

pub mod prior_auth;
pub mod verification;

pub use prior_auth::MemoryPriorAuthStore;
pub use verification::MemoryVerificationStore;
