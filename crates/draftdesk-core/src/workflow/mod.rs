//! Reply drafting workflow.
//!
//! Phases move `Idle → Generating → Ready → Sending → Sent`, with
//! `Deleting → Deleted` reachable from `Ready` and `Sent`. Failures revert
//! to the last stable phase and never discard the user's text.

mod controller;
mod draft;
mod error;
mod phase;

pub use controller::{
    Applied, Completion, Outcome, PendingRequest, ReplyWorkflow, Request, Ticket,
};
pub use draft::DraftState;
pub use error::{DeleteError, GenerationError, SendError, WorkflowError};
pub use phase::{DisplayStatus, Phase};
