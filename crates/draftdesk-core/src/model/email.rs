//! Email records supplied by the inbox.

use serde::{Deserialize, Deserializer, Serialize};

/// Unique identifier of a message within the session's working set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailId(String);

impl EmailId {
    /// Create a new email ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmailId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of the conversation an email belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(String);

impl ThreadId {
    /// Create a new thread ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ThreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An incoming email. Immutable once handed to the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    /// Message identifier.
    pub id: EmailId,
    /// Conversation identifier.
    #[serde(rename = "threadId", default)]
    pub thread_id: ThreadId,
    /// Sender address, possibly in `Name <addr>` form.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub from: String,
    /// Subject line.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subject: String,
    /// Plain text body.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
}

impl Email {
    /// Creates an email record.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        thread_id: impl Into<String>,
        from: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: EmailId::new(id),
            thread_id: ThreadId::new(thread_id),
            from: from.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Subject used for a reply to this email.
    ///
    /// The prefix is always added, even when the subject already starts with `Re:`.
    #[must_use]
    pub fn reply_subject(&self) -> String {
        format!("Re: {}", self.subject)
    }
}

/// The inbox endpoint reports missing headers as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
