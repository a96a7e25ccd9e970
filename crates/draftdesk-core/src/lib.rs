//! # draftdesk-core
//!
//! Core logic for the `DraftDesk` email triage client.
//!
//! This crate provides:
//! - Email and thread models
//! - The reply workflow state machine (draft, edit, send, archive)
//! - The triage session and list items with derived status badges
//! - Backend service traits and an HTTP implementation
//! - Client settings

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
mod error;
pub mod model;
pub mod service;
pub mod triage;
pub mod workflow;

pub use config::{BackendConfig, Settings};
pub use error::{Error, Result};
pub use model::{Email, EmailId, ThreadId, ThreadMemory};
pub use service::{
    AgentStatus, DeleteRequest, DraftRequest, DraftResponse, DraftService, HttpBackend,
    InboxService, ReplyRequest, ServiceError,
};
pub use triage::{Notice, NoticeLevel, TriageListItem, TriageSession};
pub use workflow::{
    Applied, Completion, DeleteError, DisplayStatus, DraftState, GenerationError, Outcome,
    PendingRequest, Phase, ReplyWorkflow, Request, SendError, Ticket, WorkflowError,
};
