//! Backend services used by the reply workflow and the inbox.
//!
//! The workflow only depends on the [`DraftService`] capability; the HTTP
//! backend implements it together with [`InboxService`]. Tests substitute
//! their own implementations.

mod error;
mod http;
mod types;

use std::future::Future;

pub use error::ServiceError;
pub use http::HttpBackend;
pub use types::{AgentStatus, DeleteRequest, DraftRequest, DraftResponse, ReplyRequest};

use crate::model::{Email, ThreadId, ThreadMemory};

/// Remote operations needed to draft, send and archive a reply.
pub trait DraftService {
    /// Generate a reply draft for an email.
    fn generate(
        &self,
        request: &DraftRequest,
    ) -> impl Future<Output = Result<DraftResponse, ServiceError>> + Send;

    /// Send a reply.
    fn send(&self, reply: &ReplyRequest) -> impl Future<Output = Result<(), ServiceError>> + Send;

    /// Delete (archive) an email.
    fn delete(
        &self,
        request: &DeleteRequest,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;
}

/// Remote operations that supply the triage list.
pub trait InboxService {
    /// Fetch the current working set of emails.
    fn list_emails(&self) -> impl Future<Output = Result<Vec<Email>, ServiceError>> + Send;

    /// Fetch the agent's memory for a thread.
    fn thread_memory(
        &self,
        thread_id: &ThreadId,
    ) -> impl Future<Output = Result<ThreadMemory, ServiceError>> + Send;

    /// Ask the backend agent to process the inbox.
    fn run_agent(&self) -> impl Future<Output = Result<AgentStatus, ServiceError>> + Send;
}
