//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use draftdesk_core::{
    DeleteRequest, DraftRequest, DraftResponse, DraftService, Email, ReplyRequest, ServiceError,
};

/// A request the fake backend received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Generate(DraftRequest),
    Send(ReplyRequest),
    Delete(DeleteRequest),
}

/// Backend fake that records every call and answers from its configuration.
#[derive(Debug)]
pub struct FakeService {
    /// Draft to return, or `None` to fail generation.
    pub draft: Option<String>,
    pub send_ok: bool,
    pub delete_ok: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeService {
    pub fn drafting(draft: &str) -> Self {
        Self {
            draft: Some(draft.to_string()),
            send_ok: true,
            delete_ok: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            draft: None,
            send_ok: false,
            delete_ok: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn generate_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Generate(_)))
    }

    pub fn send_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Send(_)))
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn unavailable() -> ServiceError {
    ServiceError::status(503, "backend unavailable")
}

impl DraftService for FakeService {
    async fn generate(&self, request: &DraftRequest) -> Result<DraftResponse, ServiceError> {
        self.record(Call::Generate(request.clone()));
        self.draft
            .clone()
            .map(|draft| DraftResponse { draft })
            .ok_or_else(unavailable)
    }

    async fn send(&self, reply: &ReplyRequest) -> Result<(), ServiceError> {
        self.record(Call::Send(reply.clone()));
        if self.send_ok {
            Ok(())
        } else {
            Err(unavailable())
        }
    }

    async fn delete(&self, request: &DeleteRequest) -> Result<(), ServiceError> {
        self.record(Call::Delete(request.clone()));
        if self.delete_ok {
            Ok(())
        } else {
            Err(unavailable())
        }
    }
}

/// The email used by the documented scenarios.
pub fn scenario_email() -> Email {
    Email::new("m1", "t1", "a@x.com", "Hi", "Are you free on Thursday?")
}

pub fn other_email() -> Email {
    Email::new("m2", "t2", "b@y.com", "Invoice", "Please find attached.")
}
