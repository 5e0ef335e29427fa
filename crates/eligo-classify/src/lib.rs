//! # eligo-classify
//!
//! The AI classifier gateway for Eligo.
//!
//! This crate provides [`gateway::ClassifierGateway`], which implements the
//! [`eligo_core::traits::Classifier`] trait. A classification runs in three
//! phases:
//!
//! 1. **Prompt** — every provided patient field is embedded, together with
//!    the exact response-format contract ([`prompt::build_prompt`]).
//! 2. **Transport** — the prompt goes to a [`backend::GenerativeBackend`]
//!    with exponential-backoff retries for transient failures.
//! 3. **Parse** — the reply is fence-stripped, validated against the fixed
//!    judgement schema, and decoded ([`parse::parse_judgement`]).
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use eligo_classify::{backend::ScriptedBackend, gateway::ClassifierGateway};
//! use eligo_core::config::ClassifierConfig;
//!
//! let backend = ScriptedBackend::replying(r#"{"status": "eligible", ...}"#);
//! let classifier = ClassifierGateway::from_config(
//!     Box::new(backend),
//!     &ClassifierConfig::default(),
//! );
//! ```

pub mod backend;
pub mod gateway;
pub mod parse;
pub mod prompt;

pub use gateway::ClassifierGateway;
