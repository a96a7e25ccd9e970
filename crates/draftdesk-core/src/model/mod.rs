//! Data models shared by the workflow, the triage session and the backend.

mod email;
mod thread;

pub use email::{Email, EmailId, ThreadId};
pub use thread::ThreadMemory;
