use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::directory::SystemId;

/// Identifier wrapper for accepted submissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Candidate directory entry collected by the Register System form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRegistration {
    pub name: String,
    pub vendor: String,
    pub installation_year: u16,
    pub platform: String,
    pub purpose: String,
    #[serde(default)]
    pub known_issues: Vec<String>,
    pub institution: String,
    pub justification: String,
}

/// Community-contributed fix for an already-registered system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSubmission {
    pub system_id: SystemId,
    pub vulnerability: String,
    pub fix_steps: Vec<String>,
    pub source: String,
    #[serde(default)]
    pub contributor: Option<Contributor>,
}

/// Optional attribution attached to a fix submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    #[serde(default)]
    pub contact: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    Registration,
    Fix,
}

impl SubmissionKind {
    pub const fn label(self) -> &'static str {
        match self {
            SubmissionKind::Registration => "registration",
            SubmissionKind::Fix => "fix",
        }
    }
}

/// Moderation status of a stored submission. Everything lands as
/// `PendingReview`; further states belong to the unbuilt admin workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    PendingReview,
}

impl SubmissionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SubmissionStatus::PendingReview => "pending_review",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmissionPayload {
    Registration(SystemRegistration),
    Fix(FixSubmission),
}

impl SubmissionPayload {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            SubmissionPayload::Registration(_) => SubmissionKind::Registration,
            SubmissionPayload::Fix(_) => SubmissionKind::Fix,
        }
    }

    /// One-line description used in moderation notices.
    pub fn headline(&self) -> String {
        match self {
            SubmissionPayload::Registration(registration) => format!(
                "{} ({}, {})",
                registration.name, registration.vendor, registration.institution
            ),
            SubmissionPayload::Fix(fix) => {
                format!("fix for {}: {}", fix.system_id, fix.vulnerability)
            }
        }
    }
}

/// Repository record for one accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub submission_id: SubmissionId,
    pub received_on: NaiveDate,
    pub status: SubmissionStatus,
    pub payload: SubmissionPayload,
}

impl SubmissionRecord {
    pub fn receipt(&self) -> SubmissionReceipt {
        SubmissionReceipt {
            submission_id: self.submission_id.clone(),
            kind: self.payload.kind().label(),
            status: self.status.label(),
            received_on: self.received_on,
        }
    }
}

/// Sanitized acknowledgement returned to the submitting client.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub submission_id: SubmissionId,
    pub kind: &'static str,
    pub status: &'static str,
    pub received_on: NaiveDate,
}
