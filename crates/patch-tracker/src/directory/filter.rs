use super::domain::{FilterCriteria, SystemRecord};

/// Evaluate all four directory predicates against one record.
///
/// Text search is case-insensitive substring containment over name, vendor,
/// institution, and purpose; the categorical selections are exact matches.
pub fn matches(record: &SystemRecord, criteria: &FilterCriteria) -> bool {
    matches_search(record, &criteria.search_text)
        && criteria.vendor.matches(&record.vendor)
        && criteria.status.matches(record.status.label())
        && criteria.year.matches(&record.installation_year.to_string())
}

fn matches_search(record: &SystemRecord, search_text: &str) -> bool {
    if search_text.is_empty() {
        return true;
    }

    let needle = search_text.to_lowercase();
    [
        record.name.as_str(),
        record.vendor.as_str(),
        record.institution.as_str(),
        record.purpose.as_str(),
    ]
    .into_iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Produce the ordered subsequence of `records` satisfying every active
/// criterion.
///
/// The filter is stable: output preserves the relative order of the input.
/// Over-constrained criteria yield an empty result, never an error. The scan
/// is linear in the collection, which is the intended contract for the
/// directory's expected scale.
pub fn filter<'a>(records: &'a [SystemRecord], criteria: &FilterCriteria) -> Vec<&'a SystemRecord> {
    records
        .iter()
        .filter(|record| matches(record, criteria))
        .collect()
}
