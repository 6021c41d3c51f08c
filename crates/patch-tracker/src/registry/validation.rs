use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::domain::{FixSubmission, SystemRegistration};

/// Registrations older than this are treated as data-entry mistakes.
pub const EARLIEST_PLAUSIBLE_YEAR: u16 = 1950;

/// One failed field check, keyed by the form field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Validation failure carrying every failing field at once so the form can
/// surface all of them in a single round trip.
#[derive(Debug, Clone, thiserror::Error)]
#[error("submission failed validation on {} field(s)", .0.len())]
pub struct ValidationError(pub Vec<FieldError>);

impl ValidationError {
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }
}

#[derive(Default)]
struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    fn require_text(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.errors.push(FieldError {
                field,
                message: format!("{field} must not be empty"),
            });
        }
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError(self.errors))
        }
    }
}

/// Field-level validation for the Register System form.
pub fn validate_registration(
    registration: &SystemRegistration,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    let mut checks = Checks::default();

    checks.require_text("name", &registration.name);
    checks.require_text("vendor", &registration.vendor);
    checks.require_text("platform", &registration.platform);
    checks.require_text("purpose", &registration.purpose);
    checks.require_text("institution", &registration.institution);
    checks.require_text("justification", &registration.justification);

    let current_year = today.year().max(i32::from(EARLIEST_PLAUSIBLE_YEAR)) as u16;
    if registration.installation_year < EARLIEST_PLAUSIBLE_YEAR
        || registration.installation_year > current_year
    {
        checks.push(
            "installation_year",
            format!(
                "installation_year must fall between {EARLIEST_PLAUSIBLE_YEAR} and {current_year}"
            ),
        );
    }

    if registration.known_issues.iter().any(|issue| issue.trim().is_empty()) {
        checks.push("known_issues", "known_issues entries must not be blank");
    }

    checks.finish()
}

/// Field-level validation for the Submit Fix form.
pub fn validate_fix(fix: &FixSubmission) -> Result<(), ValidationError> {
    let mut checks = Checks::default();

    checks.require_text("system_id", &fix.system_id.0);
    checks.require_text("vulnerability", &fix.vulnerability);
    checks.require_text("source", &fix.source);

    if fix.fix_steps.is_empty() || fix.fix_steps.iter().all(|step| step.trim().is_empty()) {
        checks.push("fix_steps", "at least one non-empty fix step is required");
    }

    if let Some(contributor) = &fix.contributor {
        checks.require_text("contributor.name", &contributor.name);
        if let Some(contact) = &contributor.contact {
            // Contact is free-form but must at least look like an email or URL.
            if !contact.contains('@') && !contact.contains("://") {
                checks.push(
                    "contributor.contact",
                    "contact must be an email address or a URL",
                );
            }
        }
    }

    checks.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::SystemId;
    use crate::registry::domain::Contributor;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).expect("valid date")
    }

    fn valid_registration() -> SystemRegistration {
        SystemRegistration {
            name: "Digital Archive Management System".to_string(),
            vendor: "Greenstone".to_string(),
            installation_year: 2018,
            platform: "Linux/Apache".to_string(),
            purpose: "Digital collection management".to_string(),
            known_issues: vec!["XSS vulnerability in search".to_string()],
            institution: "Metropolitan Museum of Art".to_string(),
            justification: "Holds the museum's full digitized collection".to_string(),
        }
    }

    fn valid_fix() -> FixSubmission {
        FixSubmission {
            system_id: SystemId("sys-001".to_string()),
            vulnerability: "XSS vulnerability in search".to_string(),
            fix_steps: vec!["Escape query parameters before rendering".to_string()],
            source: "https://example.org/advisories/42".to_string(),
            contributor: Some(Contributor {
                name: "A. Conservator".to_string(),
                contact: Some("security@example.org".to_string()),
            }),
        }
    }

    #[test]
    fn accepts_a_complete_registration() {
        assert!(validate_registration(&valid_registration(), today()).is_ok());
    }

    #[test]
    fn reports_every_failing_field_at_once() {
        let registration = SystemRegistration {
            name: "  ".to_string(),
            vendor: String::new(),
            installation_year: 1890,
            ..valid_registration()
        };
        let error = validate_registration(&registration, today()).expect_err("invalid");
        let fields: Vec<&str> = error.fields().iter().map(|field| field.field).collect();
        assert_eq!(fields, vec!["name", "vendor", "installation_year"]);
    }

    #[test]
    fn rejects_future_installation_years() {
        let registration = SystemRegistration {
            installation_year: today().year() as u16 + 1,
            ..valid_registration()
        };
        let error = validate_registration(&registration, today()).expect_err("invalid");
        assert_eq!(error.fields()[0].field, "installation_year");
    }

    #[test]
    fn rejects_blank_known_issue_entries() {
        let registration = SystemRegistration {
            known_issues: vec!["Outdated SSL certificates".to_string(), " ".to_string()],
            ..valid_registration()
        };
        let error = validate_registration(&registration, today()).expect_err("invalid");
        assert_eq!(error.fields()[0].field, "known_issues");
    }

    #[test]
    fn accepts_a_complete_fix_submission() {
        assert!(validate_fix(&valid_fix()).is_ok());
    }

    #[test]
    fn fix_requires_at_least_one_real_step() {
        let fix = FixSubmission {
            fix_steps: vec!["   ".to_string()],
            ..valid_fix()
        };
        let error = validate_fix(&fix).expect_err("invalid");
        assert_eq!(error.fields()[0].field, "fix_steps");
    }

    #[test]
    fn contributor_contact_must_look_like_email_or_url() {
        let fix = FixSubmission {
            contributor: Some(Contributor {
                name: "A. Conservator".to_string(),
                contact: Some("call me maybe".to_string()),
            }),
            ..valid_fix()
        };
        let error = validate_fix(&fix).expect_err("invalid");
        assert_eq!(error.fields()[0].field, "contributor.contact");
    }

    #[test]
    fn anonymous_fixes_are_allowed() {
        let fix = FixSubmission {
            contributor: None,
            ..valid_fix()
        };
        assert!(validate_fix(&fix).is_ok());
    }
}
