//! Failures of the three workflow operations.
//!
//! Each wraps the transport failure that caused it. None of them is fatal;
//! the workflow reverts to its last stable phase and the user may retry.

use thiserror::Error;

use crate::service::ServiceError;

/// Draft generation failed.
#[derive(Debug, Error)]
#[error("Draft generation failed: {0}")]
pub struct GenerationError(#[from] pub ServiceError);

/// Sending the reply failed.
#[derive(Debug, Error)]
#[error("Send failed: {0}")]
pub struct SendError(#[from] pub ServiceError);

/// Deleting/archiving the email failed.
#[derive(Debug, Error)]
#[error("Archive failed: {0}")]
pub struct DeleteError(#[from] pub ServiceError);

/// Any workflow operation failure.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Draft generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Sending the reply failed.
    #[error(transparent)]
    Send(#[from] SendError),

    /// Deleting/archiving the email failed.
    #[error(transparent)]
    Delete(#[from] DeleteError),
}
