//! # eligo-priorauth
//!
//! The prior authorization workflow: opening a request against a
//! `requires_auth` verification, submitting it to the payer, and applying
//! the determination (approval unblocks the verification; a more-info
//! answer keeps the request open for resubmission; a denial is terminal).
//!
//! The payer sits behind [`eligo_core::traits::PayerChannel`]; this crate
//! ships [`ScriptedPayer`] for tests and demos. Every operation is
//! access-checked and audited through the same trait seams as the
//! verification lifecycle.
//!
//! ```rust,ignore
//! let workflow = PriorAuthWorkflow::new(requests, verifications, payer, audit, access);
//!
//! let request = workflow.initiate(&actor, verification_id, form)?;
//! let settled = workflow.submit(&actor, request.id)?;
//! ```

pub mod payer;
pub mod workflow;

pub use payer::{ScriptedPayer, MORE_INFO_MESSAGE};
pub use workflow::{PriorAuthForm, PriorAuthWorkflow};
