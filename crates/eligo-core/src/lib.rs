//! # eligo-core
//!
//! The verification lifecycle and the trait seams it is built on.
//!
//! This crate provides:
//! - The pipeline traits (`Classifier`, stores, `AuditRecorder`, `Notifier`,
//!   `AccessPolicy`, `PayerChannel`)
//! - The `VerificationService` that wires them together in the correct order
//! - Patient validation, the shared `RetryPolicy`, and `AppConfig`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use eligo_core::{VerificationService, traits::Classifier};
//! ```

pub mod config;
pub mod lifecycle;
pub mod retry;
pub mod traits;
pub mod validate;

pub use lifecycle::VerificationService;
