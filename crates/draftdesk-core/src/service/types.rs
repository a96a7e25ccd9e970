//! Request and response payloads exchanged with the backend.

use serde::{Deserialize, Serialize};

/// Body of a draft generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRequest {
    /// Text of the email to reply to.
    pub email_text: String,
    /// Sender of the email.
    pub sender: String,
}

/// Body of a draft generation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftResponse {
    /// Generated reply text.
    pub draft: String,
}

/// Body of a send request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRequest {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Reply body.
    pub body: String,
}

/// Body of a delete/archive request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    /// Identifier of the message to archive.
    pub message_id: String,
}

/// Status reported after the agent processed the inbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStatus {
    /// Backend-reported status, e.g. `done`.
    #[serde(default)]
    pub status: String,
}
