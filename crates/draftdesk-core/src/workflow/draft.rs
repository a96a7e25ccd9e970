//! Per-email draft state.

use super::Phase;

/// Draft lifecycle state for the currently open email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftState {
    phase: Phase,
    suggested_text: Option<String>,
    edited_text: String,
    /// Phase to return to if the in-flight request fails.
    resume: Phase,
    last_error: Option<String>,
}

impl DraftState {
    /// Fresh state for a newly selected email.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State holding a freshly generated draft.
    pub(crate) fn ready(draft: String) -> Self {
        Self {
            phase: Phase::Ready,
            edited_text: draft.clone(),
            suggested_text: Some(draft),
            resume: Phase::Ready,
            last_error: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Text returned by the generator, once a draft exists.
    #[must_use]
    pub fn suggested_text(&self) -> Option<&str> {
        self.suggested_text.as_deref()
    }

    /// User's working copy of the reply.
    #[must_use]
    pub fn edited_text(&self) -> &str {
        &self.edited_text
    }

    /// Message of the most recent failure, until the next trigger.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the user edited the suggestion.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.suggested_text
            .as_deref()
            .is_some_and(|s| s != self.edited_text)
    }

    /// Enter an in-flight phase, remembering where to resume on failure.
    pub(crate) fn begin(&mut self, phase: Phase) {
        debug_assert!(phase.is_in_flight());
        self.resume = self.phase;
        self.phase = phase;
        self.last_error = None;
    }

    pub(crate) fn set_edited_text(&mut self, text: String) {
        self.edited_text = text;
    }

    /// Request succeeded.
    pub(crate) fn finish(&mut self, phase: Phase) {
        self.phase = phase;
        self.resume = phase;
    }

    /// Request failed: record the error, then revert.
    pub(crate) fn fail(&mut self, error: String, revert_to: Phase) {
        self.last_error = Some(error);
        self.phase = revert_to;
        self.resume = revert_to;
    }

    /// Phase that preceded the in-flight request.
    pub(crate) const fn resume_phase(&self) -> Phase {
        self.resume
    }
}
