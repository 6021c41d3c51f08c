use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Local;
use tracing::info;

use super::domain::{
    FixSubmission, SubmissionId, SubmissionPayload, SubmissionRecord, SubmissionStatus,
    SystemRegistration,
};
use super::repository::{
    ModerationNotice, ModerationQueue, QueueError, RepositoryError, SubmissionRepository,
};
use super::validation::{validate_fix, validate_registration, ValidationError};
use crate::directory::SystemCatalog;

static REGISTRATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static FIX_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_registration_id() -> SubmissionId {
    let id = REGISTRATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SubmissionId(format!("reg-{id:06}"))
}

fn next_fix_id() -> SubmissionId {
    let id = FIX_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SubmissionId(format!("fix-{id:06}"))
}

/// Service composing validation, the submission repository, and the
/// moderation queue behind the two intake forms.
pub struct RegistryService<R, Q> {
    catalog: Arc<SystemCatalog>,
    repository: Arc<R>,
    queue: Arc<Q>,
}

impl<R, Q> RegistryService<R, Q>
where
    R: SubmissionRepository + 'static,
    Q: ModerationQueue + 'static,
{
    pub fn new(catalog: Arc<SystemCatalog>, repository: Arc<R>, queue: Arc<Q>) -> Self {
        Self {
            catalog,
            repository,
            queue,
        }
    }

    /// Accept a system registration: validate, store, enqueue for moderation.
    pub fn register_system(
        &self,
        registration: SystemRegistration,
    ) -> Result<SubmissionRecord, RegistryError> {
        validate_registration(&registration, Local::now().date_naive())?;

        let record = SubmissionRecord {
            submission_id: next_registration_id(),
            received_on: Local::now().date_naive(),
            status: SubmissionStatus::PendingReview,
            payload: SubmissionPayload::Registration(registration),
        };

        let stored = self.repository.insert(record)?;
        self.notify(&stored)?;
        info!(submission = %stored.submission_id, "system registration accepted");
        Ok(stored)
    }

    /// Accept a fix submission against a registered system.
    pub fn submit_fix(&self, fix: FixSubmission) -> Result<SubmissionRecord, RegistryError> {
        validate_fix(&fix)?;

        if self.catalog.find(&fix.system_id).is_none() {
            return Err(RegistryError::UnknownSystem(fix.system_id.0));
        }

        let record = SubmissionRecord {
            submission_id: next_fix_id(),
            received_on: Local::now().date_naive(),
            status: SubmissionStatus::PendingReview,
            payload: SubmissionPayload::Fix(fix),
        };

        let stored = self.repository.insert(record)?;
        self.notify(&stored)?;
        info!(submission = %stored.submission_id, "fix submission accepted");
        Ok(stored)
    }

    /// Fetch one stored submission for status responses.
    pub fn get(&self, id: &SubmissionId) -> Result<SubmissionRecord, RegistryError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    fn notify(&self, record: &SubmissionRecord) -> Result<(), RegistryError> {
        self.queue.enqueue(ModerationNotice {
            submission_id: record.submission_id.clone(),
            kind: record.payload.kind(),
            headline: record.payload.headline(),
        })?;
        Ok(())
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no registered system with id '{0}'")]
    UnknownSystem(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Queue(#[from] QueueError),
}
