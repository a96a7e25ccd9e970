//! Commands typed by the user and events posted by background requests.

use draftdesk_core::{AgentStatus, Completion, Email, EmailId, ThreadId, ThreadMemory};

/// A user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the triage list.
    List,
    /// Open the n-th email of the list (1-based).
    Open(usize),
    /// Select an email by id (dispatched by list items).
    Select(EmailId),
    /// Show the reading pane.
    Show,
    /// Request a generated draft.
    Draft,
    /// Replace the draft text.
    Edit(String),
    /// Append a line to the draft text.
    Append(String),
    /// Send the draft.
    Send,
    /// Archive the selected email.
    Archive,
    /// Reload the inbox.
    Refresh,
    /// Ask the backend agent to process the inbox.
    RunAgent,
    /// Show usage.
    Help,
    /// Leave the program.
    Quit,
}

impl Command {
    /// Parse one input line. `\n` in edit text becomes a line break.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_lowercase().as_str() {
            "" | "show" => Ok(Self::Show),
            "list" | "ls" => Ok(Self::List),
            "open" | "o" => rest
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(Self::Open)
                .ok_or_else(|| "Usage: open <number>".to_string()),
            "draft" | "d" => Ok(Self::Draft),
            "edit" | "e" => Ok(Self::Edit(unescape(rest))),
            "append" | "a" => Ok(Self::Append(unescape(rest))),
            "send" => Ok(Self::Send),
            "archive" | "delete" => Ok(Self::Archive),
            "refresh" | "r" => Ok(Self::Refresh),
            "agent" => Ok(Self::RunAgent),
            "help" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(format!("Unknown command `{other}` (type `help`)")),
        }
    }
}

fn unescape(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Results posted back to the event loop by background requests.
#[derive(Debug)]
pub enum Event {
    /// A workflow request finished.
    Completed(Completion),
    /// Inbox loaded.
    InboxLoaded(Result<Vec<Email>, String>),
    /// Thread memory loaded.
    MemoryLoaded(ThreadId, Result<ThreadMemory, String>),
    /// Agent run finished.
    AgentFinished(Result<AgentStatus, String>),
}
