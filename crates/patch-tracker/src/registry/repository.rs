use serde::{Deserialize, Serialize};

use super::domain::{SubmissionId, SubmissionKind, SubmissionRecord};

/// Storage abstraction for accepted submissions, so the service can be
/// exercised without a real backend.
pub trait SubmissionRepository: Send + Sync {
    fn insert(&self, record: SubmissionRecord) -> Result<SubmissionRecord, RepositoryError>;
    fn fetch(&self, id: &SubmissionId) -> Result<Option<SubmissionRecord>, RepositoryError>;
    fn pending(&self, limit: usize) -> Result<Vec<SubmissionRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("submission already exists")]
    Conflict,
    #[error("submission not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound seam to the moderation workflow that will eventually approve or
/// reject submissions.
pub trait ModerationQueue: Send + Sync {
    fn enqueue(&self, notice: ModerationNotice) -> Result<(), QueueError>;
}

/// Notice handed to moderators for each accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationNotice {
    pub submission_id: SubmissionId,
    pub kind: SubmissionKind,
    pub headline: String,
}

/// Queue dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("moderation queue unavailable: {0}")]
    Transport(String),
}
