//! One row of the triage list.

use crate::model::{Email, EmailId};
use crate::workflow::DisplayStatus;

/// Presentation of one email in the triage list.
///
/// Holds no state of its own: everything is borrowed from the caller, and
/// clicking yields the `on_select` message the caller attached.
#[derive(Debug, Clone)]
pub struct TriageListItem<'a, M> {
    email: &'a Email,
    selected: bool,
    status: DisplayStatus,
    memory_summary: Option<&'a str>,
    on_select: M,
}

impl<'a, M: Clone> TriageListItem<'a, M> {
    /// Creates a list item.
    #[must_use]
    pub const fn new(
        email: &'a Email,
        selected: bool,
        status: DisplayStatus,
        memory_summary: Option<&'a str>,
        on_select: M,
    ) -> Self {
        Self {
            email,
            selected,
            status,
            memory_summary,
            on_select,
        }
    }

    /// Identifier of the email shown.
    #[must_use]
    pub const fn email_id(&self) -> &'a EmailId {
        &self.email.id
    }

    /// Subject line.
    #[must_use]
    pub fn subject(&self) -> &'a str {
        &self.email.subject
    }

    /// Sender.
    #[must_use]
    pub fn sender(&self) -> &'a str {
        &self.email.from
    }

    /// First line of the thread summary, or `""` when there is none.
    #[must_use]
    pub fn summary_line(&self) -> &'a str {
        first_line(self.memory_summary)
    }

    /// Badge status.
    #[must_use]
    pub const fn status(&self) -> DisplayStatus {
        self.status
    }

    /// Whether this is the selected email.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// Message to dispatch when the item is clicked.
    #[must_use]
    pub fn click(&self) -> M {
        self.on_select.clone()
    }
}

impl<M> std::fmt::Display for TriageListItem<'_, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = if self.selected { '>' } else { ' ' };
        writeln!(
            f,
            "{marker} {} | {} [{}]",
            self.email.subject, self.email.from, self.status
        )?;
        write!(f, "    {}", first_line(self.memory_summary))
    }
}

fn first_line(text: Option<&str>) -> &str {
    text.and_then(|s| s.lines().map(str::trim).find(|l| !l.is_empty()))
        .unwrap_or("")
}
