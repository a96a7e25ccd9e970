//! Triage session: the container around the list and the open workflow.

use std::collections::{HashMap, HashSet, VecDeque};

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use super::TriageListItem;
use crate::model::{Email, EmailId, ThreadId};
use crate::workflow::{
    Applied, Completion, DeleteError, DisplayStatus, Outcome, PendingRequest, Phase,
    ReplyWorkflow, SendError, WorkflowError,
};

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// An operation succeeded.
    Success,
    /// An operation failed and can be retried.
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text to show.
    pub message: String,
    /// When the notice was raised.
    pub at: DateTime<Local>,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            at: Local::now(),
        }
    }
}

/// The working set of emails, the current selection and its workflow.
///
/// Selecting an email, including the one already selected, always starts a
/// new [`ReplyWorkflow`]; responses to requests issued by a previous workflow
/// are dropped when they arrive.
#[derive(Debug, Default)]
pub struct TriageSession {
    emails: Vec<Email>,
    summaries: HashMap<ThreadId, String>,
    workflow: Option<ReplyWorkflow>,
    notices: VecDeque<Notice>,
}

impl TriageSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the working set.
    ///
    /// Duplicate ids keep their first occurrence. The open workflow survives
    /// if its email is still present and is closed otherwise.
    pub fn set_emails(&mut self, emails: Vec<Email>) {
        let mut seen = HashSet::new();
        self.emails = emails
            .into_iter()
            .filter(|email| {
                let fresh = seen.insert(email.id.clone());
                if !fresh {
                    warn!(email = %email.id, "Dropping duplicate email id");
                }
                fresh
            })
            .collect();

        if let Some(id) = self.selected_id().cloned()
            && self.email(&id).is_none()
        {
            debug!(email = %id, "Selected email left the inbox");
            self.workflow = None;
        }
    }

    /// Emails in list order.
    #[must_use]
    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    /// Look up an email by id.
    #[must_use]
    pub fn email(&self, id: &EmailId) -> Option<&Email> {
        self.emails.iter().find(|e| &e.id == id)
    }

    /// Record (or clear) the memory summary for a thread.
    pub fn set_summary(&mut self, thread_id: ThreadId, summary: Option<String>) {
        match summary {
            Some(summary) => {
                self.summaries.insert(thread_id, summary);
            }
            None => {
                self.summaries.remove(&thread_id);
            }
        }
    }

    /// Memory summary for a thread.
    #[must_use]
    pub fn summary(&self, thread_id: &ThreadId) -> Option<&str> {
        self.summaries.get(thread_id).map(String::as_str)
    }

    /// Select an email, discarding the previous workflow.
    ///
    /// Returns `false` if no email has that id.
    pub fn select(&mut self, id: &EmailId) -> bool {
        let Some(email) = self.email(id).cloned() else {
            warn!(email = %id, "Cannot select unknown email");
            return false;
        };

        self.workflow = Some(ReplyWorkflow::new(email));
        true
    }

    /// Id of the selected email.
    #[must_use]
    pub fn selected_id(&self) -> Option<&EmailId> {
        self.workflow.as_ref().map(|w| &w.email().id)
    }

    /// The selected email.
    #[must_use]
    pub fn selected(&self) -> Option<&Email> {
        self.workflow.as_ref().map(ReplyWorkflow::email)
    }

    /// The open workflow.
    #[must_use]
    pub const fn workflow(&self) -> Option<&ReplyWorkflow> {
        self.workflow.as_ref()
    }

    /// Badge for an email. Emails without an open workflow are `NEW`.
    #[must_use]
    pub fn status(&self, id: &EmailId) -> DisplayStatus {
        let phase = self
            .workflow
            .as_ref()
            .filter(|w| &w.email().id == id)
            .map_or(Phase::Idle, ReplyWorkflow::phase);
        DisplayStatus::from_phase(phase)
    }

    /// Build the list items, attaching `on_select(id)` to each.
    pub fn list_items<M, F>(&self, on_select: F) -> Vec<TriageListItem<'_, M>>
    where
        M: Clone,
        F: Fn(&EmailId) -> M,
    {
        let selected = self.selected_id();
        self.emails
            .iter()
            .map(|email| {
                TriageListItem::new(
                    email,
                    selected == Some(&email.id),
                    self.status(&email.id),
                    self.summary(&email.thread_id),
                    on_select(&email.id),
                )
            })
            .collect()
    }

    /// Request a draft for the selected email.
    ///
    /// Returns the request to run, or `None` if nothing is selected or the
    /// workflow's phase does not allow it.
    pub fn request_draft(&mut self) -> Option<PendingRequest> {
        self.workflow.as_mut()?.begin_draft()
    }

    /// Edit the selected email's draft. Returns whether the text changed.
    pub fn update_draft_text(&mut self, text: impl Into<String>) -> bool {
        self.workflow
            .as_mut()
            .is_some_and(|w| w.update_draft_text(text))
    }

    /// Send the selected email's draft.
    pub fn send_draft(&mut self) -> Option<PendingRequest> {
        self.workflow.as_mut()?.begin_send()
    }

    /// Archive the selected email.
    pub fn delete_or_archive(&mut self) -> Option<PendingRequest> {
        self.workflow.as_mut()?.begin_delete()
    }

    /// Apply a finished request to the workflow that issued it.
    ///
    /// Successful sends and archives, and every failure, raise a notice.
    /// Completions from a workflow that is no longer open never touch the
    /// current one and return [`Applied::Stale`]; their sends and archives
    /// are still announced, naming the email.
    ///
    /// # Errors
    ///
    /// Returns the operation's failure, after it has been raised as a notice.
    pub fn apply(&mut self, completion: Completion) -> Result<Applied, WorkflowError> {
        let Some(workflow) = self
            .workflow
            .as_mut()
            .filter(|w| w.ticket() == completion.ticket())
        else {
            self.settle_detached(completion);
            return Ok(Applied::Stale);
        };

        match workflow.apply(completion) {
            Ok(applied) => {
                match applied {
                    Applied::Sent => self.notify(NoticeLevel::Success, "Sent!"),
                    Applied::Archived => self.notify(NoticeLevel::Success, "Archived"),
                    Applied::DraftReady | Applied::Stale => {}
                }
                Ok(applied)
            }
            Err(e) => {
                self.notify(NoticeLevel::Error, e.to_string());
                Err(e)
            }
        }
    }

    /// Report a request that finished after its workflow was closed.
    ///
    /// The open workflow is left alone. Sends and archives still raise a
    /// notice naming their email; a late draft is discarded.
    fn settle_detached(&mut self, completion: Completion) {
        warn!(
            ticket = %completion.ticket(),
            email = %completion.email(),
            "Response arrived after its workflow closed"
        );
        let subject = completion.subject().to_string();

        match completion.into_outcome() {
            Outcome::Generated(_) => {}
            Outcome::Sent(Ok(())) => {
                self.notify(NoticeLevel::Success, format!("Sent! ({subject})"));
            }
            Outcome::Sent(Err(e)) => {
                self.notify(NoticeLevel::Error, format!("{} ({subject})", SendError(e)));
            }
            Outcome::Deleted(Ok(())) => {
                self.notify(NoticeLevel::Success, format!("Archived ({subject})"));
            }
            Outcome::Deleted(Err(e)) => {
                self.notify(NoticeLevel::Error, format!("{} ({subject})", DeleteError(e)));
            }
        }
    }

    /// Raise a notice.
    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push_back(Notice::new(level, message));
    }

    /// Pending notices, oldest first.
    #[must_use]
    pub const fn notices(&self) -> &VecDeque<Notice> {
        &self.notices
    }

    /// Take all pending notices.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }
}
