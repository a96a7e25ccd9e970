//! Text rendering of the triage list and the reading pane.

use std::fmt::Write;

use draftdesk_core::{Notice, NoticeLevel, Phase, TriageSession};

/// Usage text.
pub const HELP: &str = "\
Commands:
  list              show the inbox
  open <n>          open the n-th email
  show              show the open email
  draft             generate a reply draft
  edit <text>       replace the draft (\\n for a line break)
  append <text>     add a line to the draft
  send              send the draft
  archive           archive the open email
  refresh           reload the inbox
  agent             let the backend agent process the inbox
  help              show this text
  quit              leave";

/// Render the triage list, numbered for `open <n>`.
pub fn inbox(session: &TriageSession, is_loading: bool) -> String {
    if is_loading && session.emails().is_empty() {
        return "Loading inbox...".to_string();
    }
    if session.emails().is_empty() {
        return "Inbox is empty.".to_string();
    }

    let mut out = String::from("Inbox\n");
    for (index, item) in session.list_items(|_| ()).iter().enumerate() {
        let _ = writeln!(out, "{:>3}{item}", index + 1);
    }
    out
}

/// Render the open email and its draft.
pub fn reading_pane(session: &TriageSession) -> String {
    let Some(workflow) = session.workflow() else {
        return "Select an email to view details.".to_string();
    };

    let email = workflow.email();
    let draft = workflow.draft();
    let mut out = String::new();

    let _ = writeln!(out, "{}  [{}]", email.subject, session.status(&email.id));
    let _ = writeln!(out, "From: {}", email.from);
    let _ = writeln!(out, "\n{}\n", email.body.trim_end());

    match workflow.phase() {
        Phase::Idle => out.push_str("Type `draft` to generate a reply."),
        Phase::Generating => out.push_str("Generating draft..."),
        Phase::Failed => out.push_str("No draft. Type `draft` to try again."),
        phase => {
            if let Some(suggested) = draft.suggested_text() {
                let _ = writeln!(out, "Suggestion:\n{suggested}\n");
            }
            let _ = write!(out, "Your reply:\n{}", draft.edited_text());
            match phase {
                Phase::Sending => out.push_str("\n\n(sending...)"),
                Phase::Sent => out.push_str("\n\n(sent)"),
                Phase::Deleting => out.push_str("\n\n(archiving...)"),
                Phase::Deleted => out.push_str("\n\n(archived)"),
                _ => {}
            }
        }
    }

    if let Some(error) = draft.last_error() {
        let _ = write!(out, "\n\n! {error}");
    }
    out
}

/// Explain why a command did nothing.
pub fn ignored(command: &str, session: &TriageSession) -> String {
    session.workflow().map_or_else(
        || "No email open. Use `open <n>` first.".to_string(),
        |w| format!("Cannot {command} while the email is {}.", w.phase()),
    )
}

/// Render a notification line.
pub fn notice(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Error => "error",
    };
    format!(
        "[{} {tag}] {}",
        notice.at.format("%H:%M:%S"),
        notice.message
    )
}
