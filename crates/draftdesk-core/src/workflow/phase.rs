//! Workflow phases and the status badge derived from them.

/// Lifecycle state of a reply workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No draft requested yet.
    #[default]
    Idle,
    /// Draft generation request in flight.
    Generating,
    /// Draft available and editable.
    Ready,
    /// Send request in flight.
    Sending,
    /// Reply sent; the draft is read-only.
    Sent,
    /// Delete/archive request in flight.
    Deleting,
    /// Email archived.
    Deleted,
    /// Draft generation failed; a new request may be issued.
    Failed,
}

impl Phase {
    /// All phases, in lifecycle order.
    pub const ALL: [Self; 8] = [
        Self::Idle,
        Self::Generating,
        Self::Ready,
        Self::Sending,
        Self::Sent,
        Self::Deleting,
        Self::Deleted,
        Self::Failed,
    ];

    /// Whether a backend request is outstanding in this phase.
    #[must_use]
    pub const fn is_in_flight(self) -> bool {
        matches!(self, Self::Generating | Self::Sending | Self::Deleting)
    }

    /// Whether a draft may be requested from this phase.
    #[must_use]
    pub const fn can_request_draft(self) -> bool {
        matches!(self, Self::Idle | Self::Failed)
    }

    /// Whether the draft text may be edited or sent from this phase.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Whether the email may be deleted/archived from this phase.
    #[must_use]
    pub const fn can_delete(self) -> bool {
        matches!(self, Self::Ready | Self::Sent)
    }

    /// Short lowercase name, used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Generating => "generating",
            Self::Ready => "ready",
            Self::Sending => "sending",
            Self::Sent => "sent",
            Self::Deleting => "deleting",
            Self::Deleted => "deleted",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badge shown next to an email in the triage list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayStatus {
    /// Nothing drafted yet.
    New,
    /// A draft exists and has not been sent.
    DraftReady,
    /// The reply went out.
    Sent,
    /// The email was removed from the inbox.
    Archived,
}

impl DisplayStatus {
    /// Derive the badge for a workflow phase.
    #[must_use]
    pub const fn from_phase(phase: Phase) -> Self {
        match phase {
            Phase::Idle | Phase::Generating | Phase::Failed => Self::New,
            Phase::Ready | Phase::Sending | Phase::Deleting => Self::DraftReady,
            Phase::Sent => Self::Sent,
            Phase::Deleted => Self::Archived,
        }
    }

    /// Badge text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::DraftReady => "DRAFT READY",
            Self::Sent => "SENT",
            Self::Archived => "ARCHIVED",
        }
    }
}

impl From<Phase> for DisplayStatus {
    fn from(phase: Phase) -> Self {
        Self::from_phase(phase)
    }
}

impl std::fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
