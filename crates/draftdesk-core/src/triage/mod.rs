//! Triage list and the session that owns the open reply workflow.

mod list_item;
mod session;

pub use list_item::TriageListItem;
pub use session::{Notice, NoticeLevel, TriageSession};
