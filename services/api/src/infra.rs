use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use patch_tracker::directory::{SystemCatalog, SystemId, SystemRecord, SystemStatus};
use patch_tracker::registry::{
    ModerationNotice, ModerationQueue, QueueError, RepositoryError, SubmissionId, SubmissionRecord,
    SubmissionRepository,
};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<SystemCatalog>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySubmissionRepository {
    records: Arc<Mutex<Vec<SubmissionRecord>>>,
}

impl SubmissionRepository for InMemorySubmissionRepository {
    fn insert(&self, record: SubmissionRecord) -> Result<SubmissionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard
            .iter()
            .any(|stored| stored.submission_id == record.submission_id)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &SubmissionId) -> Result<Option<SubmissionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .find(|record| &record.submission_id == id)
            .cloned())
    }

    fn pending(&self, limit: usize) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().take(limit).cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryModerationQueue {
    notices: Arc<Mutex<Vec<ModerationNotice>>>,
}

impl ModerationQueue for InMemoryModerationQueue {
    fn enqueue(&self, notice: ModerationNotice) -> Result<(), QueueError> {
        let mut guard = self.notices.lock().expect("queue mutex poisoned");
        guard.push(notice);
        Ok(())
    }
}

impl InMemoryModerationQueue {
    pub(crate) fn notices(&self) -> Vec<ModerationNotice> {
        self.notices.lock().expect("queue mutex poisoned").clone()
    }
}

fn patch_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("seed patch date is valid")
}

/// The five systems the directory ships with until a real data source exists.
pub(crate) fn seed_records() -> Vec<SystemRecord> {
    vec![
        SystemRecord {
            id: SystemId("sys-001".to_string()),
            name: "Digital Archive Management System".to_string(),
            vendor: "Greenstone".to_string(),
            installation_year: 2018,
            platform: "Linux/Apache".to_string(),
            purpose: "Digital collection management".to_string(),
            last_patch: patch_date(2022, 3, 15),
            known_issues: vec![
                "XSS vulnerability in search".to_string(),
                "Outdated SSL certificates".to_string(),
            ],
            fix_count: 3,
            status: SystemStatus::Critical,
            institution: "Metropolitan Museum of Art".to_string(),
        },
        SystemRecord {
            id: SystemId("sys-002".to_string()),
            name: "Collection Database".to_string(),
            vendor: "Microsoft".to_string(),
            installation_year: 2015,
            platform: "SQL Server".to_string(),
            purpose: "Artifact cataloging".to_string(),
            last_patch: patch_date(2023, 11, 20),
            known_issues: vec!["Weak password policy".to_string()],
            fix_count: 1,
            status: SystemStatus::Moderate,
            institution: "Smithsonian Institution".to_string(),
        },
        SystemRecord {
            id: SystemId("sys-003".to_string()),
            name: "Visitor Management Portal".to_string(),
            vendor: "Custom Development".to_string(),
            installation_year: 2016,
            platform: "PHP/MySQL".to_string(),
            purpose: "Online ticket booking".to_string(),
            last_patch: patch_date(2024, 1, 10),
            known_issues: Vec::new(),
            fix_count: 0,
            status: SystemStatus::Secure,
            institution: "Museum of Science".to_string(),
        },
        SystemRecord {
            id: SystemId("sys-004".to_string()),
            name: "Digital Preservation System".to_string(),
            vendor: "Fedora Commons".to_string(),
            installation_year: 2019,
            platform: "Java/Tomcat".to_string(),
            purpose: "Long-term digital preservation".to_string(),
            last_patch: patch_date(2021, 8, 30),
            known_issues: vec![
                "Remote code execution via file upload".to_string(),
                "Information disclosure".to_string(),
            ],
            fix_count: 5,
            status: SystemStatus::Critical,
            institution: "Library of Congress".to_string(),
        },
        SystemRecord {
            id: SystemId("sys-005".to_string()),
            name: "Exhibition Planning Tool".to_string(),
            vendor: "Gallery Systems".to_string(),
            installation_year: 2020,
            platform: "Cloud-based".to_string(),
            purpose: "Exhibition management".to_string(),
            last_patch: patch_date(2024, 2, 15),
            known_issues: vec!["CSRF vulnerability".to_string()],
            fix_count: 2,
            status: SystemStatus::Moderate,
            institution: "Art Institute of Chicago".to_string(),
        },
    ]
}
