//! Reply workflow controller.
//!
//! One [`ReplyWorkflow`] exists per open email and is never reused for a
//! different email. Each trigger is gated on the current phase, so at most
//! one backend request is outstanding per workflow.
//!
//! Triggers come in two flavours:
//! - `begin_*` methods move the phase forward and hand back a
//!   [`PendingRequest`] for the caller to run; its [`Completion`] is fed back
//!   through [`ReplyWorkflow::apply`]. This lets an event loop keep serving
//!   the user while the request is in flight.
//! - `request_draft`/`send_draft`/`delete_or_archive` do the same in one
//!   `await`.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, warn};

use super::{DeleteError, DraftState, GenerationError, Phase, SendError, WorkflowError};
use crate::model::{Email, EmailId};
use crate::service::{DeleteRequest, DraftRequest, DraftService, ReplyRequest, ServiceError};

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Identifies one workflow instance.
///
/// Every request carries the ticket of the workflow that issued it; a
/// response whose ticket no longer matches is stale and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    fn next() -> Self {
        Self(NEXT_TICKET.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A backend request to issue on behalf of a workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Generate a draft.
    Generate(DraftRequest),
    /// Send the reply.
    Send(ReplyRequest),
    /// Archive the email.
    Delete(DeleteRequest),
}

/// A request that has been admitted by the phase gate but not yet run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "the workflow stays in flight until the request's completion is applied"]
pub struct PendingRequest {
    ticket: Ticket,
    email: EmailId,
    subject: String,
    request: Request,
}

impl PendingRequest {
    /// Ticket of the issuing workflow.
    pub const fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Email the request acts on.
    pub const fn email(&self) -> &EmailId {
        &self.email
    }

    /// Request payload.
    pub const fn request(&self) -> &Request {
        &self.request
    }

    /// Pair an outcome with this request.
    pub fn complete(&self, outcome: Outcome) -> Completion {
        Completion {
            ticket: self.ticket,
            email: self.email.clone(),
            subject: self.subject.clone(),
            outcome,
        }
    }

    /// Run the request against a service.
    pub async fn run<S: DraftService>(self, service: &S) -> Completion {
        let outcome = match &self.request {
            Request::Generate(request) => {
                Outcome::Generated(service.generate(request).await.map(|r| r.draft))
            }
            Request::Send(reply) => Outcome::Sent(service.send(reply).await),
            Request::Delete(request) => Outcome::Deleted(service.delete(request).await),
        };

        self.complete(outcome)
    }
}

/// Result of a backend request.
#[derive(Debug)]
pub enum Outcome {
    /// Generation finished with a draft or an error.
    Generated(Result<String, ServiceError>),
    /// Send finished.
    Sent(Result<(), ServiceError>),
    /// Delete finished.
    Deleted(Result<(), ServiceError>),
}

/// A finished request, tagged with the ticket of the workflow that issued it
/// and the email it acted on.
///
/// Built with [`PendingRequest::complete`].
#[derive(Debug)]
pub struct Completion {
    ticket: Ticket,
    email: EmailId,
    subject: String,
    outcome: Outcome,
}

impl Completion {
    /// Ticket of the issuing workflow.
    #[must_use]
    pub const fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Email the request acted on.
    #[must_use]
    pub const fn email(&self) -> &EmailId {
        &self.email
    }

    /// Subject of that email.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Request result.
    #[must_use]
    pub const fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Consume the completion, keeping the result.
    #[must_use]
    pub fn into_outcome(self) -> Outcome {
        self.outcome
    }
}

/// What applying a completion did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A draft is ready.
    DraftReady,
    /// The reply was sent.
    Sent,
    /// The email was archived.
    Archived,
    /// The completion belonged to another workflow or phase and was dropped.
    Stale,
}

/// Drafting, sending and archiving a reply to one email.
#[derive(Debug)]
pub struct ReplyWorkflow {
    ticket: Ticket,
    email: Email,
    draft: DraftState,
}

impl ReplyWorkflow {
    /// Start a fresh workflow in the `Idle` phase.
    #[must_use]
    pub fn new(email: Email) -> Self {
        let ticket = Ticket::next();
        debug!(%ticket, email = %email.id, "Workflow opened");
        Self {
            ticket,
            email,
            draft: DraftState::new(),
        }
    }

    /// This workflow's ticket.
    #[must_use]
    pub const fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Email being replied to.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Current draft state.
    #[must_use]
    pub const fn draft(&self) -> &DraftState {
        &self.draft
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.draft.phase()
    }

    /// Move to `Generating` and return the generation request.
    ///
    /// Returns `None`, issuing nothing, unless the phase is `Idle` or `Failed`.
    pub fn begin_draft(&mut self) -> Option<PendingRequest> {
        self.admit_draft()
            .map(|request| self.pending(Request::Generate(request)))
    }

    /// Replace the working copy of the draft.
    ///
    /// Only allowed in `Ready`; returns whether the text was updated.
    pub fn update_draft_text(&mut self, text: impl Into<String>) -> bool {
        if !self.phase().is_editable() {
            self.ignored("edit");
            return false;
        }

        self.draft.set_edited_text(text.into());
        true
    }

    /// Move to `Sending` and return the send request.
    ///
    /// Returns `None`, issuing nothing, unless the phase is `Ready`.
    pub fn begin_send(&mut self) -> Option<PendingRequest> {
        self.admit_send()
            .map(|reply| self.pending(Request::Send(reply)))
    }

    /// Move to `Deleting` and return the delete request.
    ///
    /// Returns `None`, issuing nothing, unless the phase is `Ready` or `Sent`.
    pub fn begin_delete(&mut self) -> Option<PendingRequest> {
        self.admit_delete()
            .map(|request| self.pending(Request::Delete(request)))
    }

    /// Apply a finished request.
    ///
    /// Completions issued by another workflow, or that do not match the
    /// request currently in flight, are dropped and reported as
    /// [`Applied::Stale`]. Only the phase mismatch is logged here; callers
    /// that route completions between workflows report foreign tickets.
    ///
    /// # Errors
    ///
    /// Returns the failure of the completed operation after the phase has
    /// reverted.
    pub fn apply(&mut self, completion: Completion) -> Result<Applied, WorkflowError> {
        if completion.ticket != self.ticket {
            return Ok(Applied::Stale);
        }

        match (self.phase(), completion.outcome) {
            (Phase::Generating, Outcome::Generated(result)) => {
                self.finish_draft(result)?;
                Ok(Applied::DraftReady)
            }
            (Phase::Sending, Outcome::Sent(result)) => {
                self.finish_send(result)?;
                Ok(Applied::Sent)
            }
            (Phase::Deleting, Outcome::Deleted(result)) => {
                self.finish_delete(result)?;
                Ok(Applied::Archived)
            }
            (phase, outcome) => {
                warn!(%phase, ?outcome, "Dropping response that does not match the phase");
                Ok(Applied::Stale)
            }
        }
    }

    /// Request a generated draft and wait for it.
    ///
    /// Does nothing unless the phase is `Idle` or `Failed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails; the phase becomes `Failed`.
    pub async fn request_draft<S: DraftService>(
        &mut self,
        service: &S,
    ) -> Result<(), GenerationError> {
        let Some(request) = self.admit_draft() else {
            return Ok(());
        };
        let result = service.generate(&request).await.map(|r| r.draft);
        self.finish_draft(result)
    }

    /// Send the draft and wait for the result.
    ///
    /// Does nothing unless the phase is `Ready`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails; the phase returns to `Ready`
    /// with the edited text intact.
    pub async fn send_draft<S: DraftService>(&mut self, service: &S) -> Result<(), SendError> {
        let Some(reply) = self.admit_send() else {
            return Ok(());
        };
        let result = service.send(&reply).await;
        self.finish_send(result)
    }

    /// Archive the email and wait for the result.
    ///
    /// Does nothing unless the phase is `Ready` or `Sent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails; the phase returns to where it was.
    pub async fn delete_or_archive<S: DraftService>(
        &mut self,
        service: &S,
    ) -> Result<(), DeleteError> {
        let Some(request) = self.admit_delete() else {
            return Ok(());
        };
        let result = service.delete(&request).await;
        self.finish_delete(result)
    }

    fn admit_draft(&mut self) -> Option<DraftRequest> {
        if !self.phase().can_request_draft() {
            self.ignored("draft");
            return None;
        }

        self.draft = DraftState::new();
        self.draft.begin(Phase::Generating);
        Some(DraftRequest {
            email_text: self.email.body.clone(),
            sender: self.email.from.clone(),
        })
    }

    fn admit_send(&mut self) -> Option<ReplyRequest> {
        if !self.phase().is_editable() {
            self.ignored("send");
            return None;
        }

        self.draft.begin(Phase::Sending);
        Some(ReplyRequest {
            to: self.email.from.clone(),
            subject: self.email.reply_subject(),
            body: self.draft.edited_text().to_string(),
        })
    }

    fn admit_delete(&mut self) -> Option<DeleteRequest> {
        if !self.phase().can_delete() {
            self.ignored("archive");
            return None;
        }

        self.draft.begin(Phase::Deleting);
        Some(DeleteRequest {
            message_id: self.email.id.as_str().to_string(),
        })
    }

    fn finish_draft(&mut self, result: Result<String, ServiceError>) -> Result<(), GenerationError> {
        match result {
            Ok(draft) => {
                info!(email = %self.email.id, "Draft ready");
                self.draft = DraftState::ready(draft);
                Ok(())
            }
            Err(e) => {
                let error = GenerationError(e);
                warn!(email = %self.email.id, "{error}");
                self.draft = DraftState::new();
                self.draft.fail(error.to_string(), Phase::Failed);
                Err(error)
            }
        }
    }

    fn finish_send(&mut self, result: Result<(), ServiceError>) -> Result<(), SendError> {
        match result {
            Ok(()) => {
                info!(email = %self.email.id, to = %self.email.from, "Reply sent");
                self.draft.finish(Phase::Sent);
                Ok(())
            }
            Err(e) => {
                let error = SendError(e);
                warn!(email = %self.email.id, "{error}");
                self.draft.fail(error.to_string(), Phase::Ready);
                Err(error)
            }
        }
    }

    fn finish_delete(&mut self, result: Result<(), ServiceError>) -> Result<(), DeleteError> {
        match result {
            Ok(()) => {
                info!(email = %self.email.id, "Email archived");
                self.draft.finish(Phase::Deleted);
                Ok(())
            }
            Err(e) => {
                let error = DeleteError(e);
                warn!(email = %self.email.id, "{error}");
                let previous = self.draft.resume_phase();
                self.draft.fail(error.to_string(), previous);
                Err(error)
            }
        }
    }

    fn pending(&self, request: Request) -> PendingRequest {
        debug!(ticket = %self.ticket, phase = %self.phase(), "Request issued");
        PendingRequest {
            ticket: self.ticket,
            email: self.email.id.clone(),
            subject: self.email.subject.clone(),
            request,
        }
    }

    fn ignored(&self, trigger: &str) {
        debug!(
            email = %self.email.id,
            phase = %self.phase(),
            "Ignoring {trigger} trigger"
        );
    }
}
