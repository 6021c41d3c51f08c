use crate::infra::{seed_records, InMemoryModerationQueue, InMemorySubmissionRepository};
use clap::Args;
use patch_tracker::directory::{
    derive_facets, filter, FilterCriteria, Selection, SystemCatalog, SystemId, SystemRecord,
};
use patch_tracker::error::AppError;
use patch_tracker::registry::{
    Contributor, FixSubmission, RegistryService, SystemRegistration,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DirectoryQueryArgs {
    /// Free-text search across name, vendor, institution, and purpose
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Restrict to one vendor (exact match)
    #[arg(long)]
    pub(crate) vendor: Option<String>,
    /// Restrict to one status: critical, moderate, or secure
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// Restrict to one installation year
    #[arg(long)]
    pub(crate) year: Option<String>,
    /// Print the derived facet lists after the results
    #[arg(long)]
    pub(crate) facets: bool,
}

impl DirectoryQueryArgs {
    fn criteria(&self) -> FilterCriteria {
        fn selection(raw: &Option<String>) -> Selection {
            match raw {
                None => Selection::All,
                Some(value) => Selection::from(value.as_str()),
            }
        }

        FilterCriteria {
            search_text: self.search.clone().unwrap_or_default(),
            vendor: selection(&self.vendor),
            status: selection(&self.status),
            year: selection(&self.year),
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the intake portion of the demo
    #[arg(long)]
    pub(crate) skip_intake: bool,
}

fn print_record(record: &SystemRecord) {
    println!(
        "- [{}] {} | {} ({}) | {} | {} fixes | {}",
        record.status.label(),
        record.name,
        record.vendor,
        record.installation_year,
        record.institution,
        record.fix_count,
        record.platform
    );
    for issue in &record.known_issues {
        println!("    issue: {issue}");
    }
}

pub(crate) fn run_directory_query(args: DirectoryQueryArgs) -> Result<(), AppError> {
    let records = seed_records();
    let criteria = args.criteria();
    let matches = filter(&records, &criteria);

    println!("Showing {} of {} systems", matches.len(), records.len());
    if matches.is_empty() {
        println!("No systems found. Try adjusting your search criteria or filters.");
    }
    for record in &matches {
        print_record(record);
    }

    if args.facets {
        let facets = derive_facets(&records);
        println!("\nVendors: {}", facets.vendors.join(", "));
        println!("Years:   {}", facets.years.join(", "));
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let records = seed_records();
    let catalog = Arc::new(SystemCatalog::new(records));

    println!("PatchTracker directory demo");
    println!("{} systems registered", catalog.len());

    let facets = catalog.facets();
    println!("Vendors: {}", facets.vendors.join(", "));
    println!("Years:   {}", facets.years.join(", "));

    let critical = catalog.query(&FilterCriteria {
        status: Selection::only("critical"),
        ..FilterCriteria::default()
    });
    println!(
        "\nCritical systems ({} of {}):",
        critical.matched, critical.total
    );
    for record in &critical.records {
        print_record(record);
    }

    let searched = catalog.query(&FilterCriteria {
        search_text: "archive".to_string(),
        ..FilterCriteria::default()
    });
    println!(
        "\nFree-text search 'archive' ({} of {}):",
        searched.matched, searched.total
    );
    for record in &searched.records {
        print_record(record);
    }

    if args.skip_intake {
        return Ok(());
    }

    println!("\nIntake demo");
    let repository = Arc::new(InMemorySubmissionRepository::default());
    let queue = Arc::new(InMemoryModerationQueue::default());
    let service = RegistryService::new(catalog.clone(), repository, queue.clone());

    let registration = service.register_system(SystemRegistration {
        name: "Oral History Recorder".to_string(),
        vendor: "Custom Development".to_string(),
        installation_year: 2014,
        platform: "Windows Server".to_string(),
        purpose: "Interview capture and transcription".to_string(),
        known_issues: vec!["Unpatched media codec library".to_string()],
        institution: "City Archives".to_string(),
        justification: "Stores irreplaceable oral-history masters".to_string(),
    })?;
    println!(
        "registered 'Oral History Recorder' as {}",
        registration.submission_id
    );

    let fix = service.submit_fix(FixSubmission {
        system_id: SystemId("sys-001".to_string()),
        vulnerability: "XSS vulnerability in search".to_string(),
        fix_steps: vec![
            "Escape query parameters before rendering".to_string(),
            "Upgrade to Greenstone 3.11".to_string(),
        ],
        source: "https://example.org/advisories/42".to_string(),
        contributor: Some(Contributor {
            name: "A. Conservator".to_string(),
            contact: Some("security@example.org".to_string()),
        }),
    })?;
    println!("fix accepted as {}", fix.submission_id);

    println!("\nModeration queue:");
    for notice in queue.notices() {
        println!(
            "- {} [{}] {}",
            notice.submission_id,
            notice.kind.label(),
            notice.headline
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_args_map_to_criteria() {
        let args = DirectoryQueryArgs {
            search: Some("archive".to_string()),
            vendor: Some("all".to_string()),
            status: Some("critical".to_string()),
            year: None,
            facets: false,
        };
        let criteria = args.criteria();
        assert_eq!(criteria.search_text, "archive");
        assert!(criteria.vendor.is_all());
        assert_eq!(criteria.status, Selection::only("critical"));
        assert!(criteria.year.is_all());
    }

    #[test]
    fn demo_runs_end_to_end_against_the_seed_data() {
        run_demo(DemoArgs::default()).expect("demo completes");
    }

    #[test]
    fn directory_query_handles_empty_results() {
        let args = DirectoryQueryArgs {
            year: Some("1999".to_string()),
            ..DirectoryQueryArgs::default()
        };
        run_directory_query(args).expect("query completes");
    }
}
