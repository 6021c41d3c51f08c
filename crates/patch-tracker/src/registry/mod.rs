//! Registration and fix-submission intake.
//!
//! Both form flows follow the same shape: validate the payload field by
//! field, persist the accepted submission, and hand a notice to the
//! moderation queue. The queue is a trait seam; the approval workflow behind
//! it does not exist yet.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

pub use domain::{
    Contributor, FixSubmission, SubmissionId, SubmissionKind, SubmissionPayload, SubmissionReceipt,
    SubmissionRecord, SubmissionStatus, SystemRegistration,
};
pub use repository::{
    ModerationNotice, ModerationQueue, QueueError, RepositoryError, SubmissionRepository,
};
pub use router::registry_router;
pub use service::{RegistryError, RegistryService};
pub use validation::{FieldError, ValidationError};
