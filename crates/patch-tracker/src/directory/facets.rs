use std::collections::BTreeSet;

use serde::Serialize;

use super::domain::SystemRecord;

/// Derived, read-only lists of distinct attribute values used to populate the
/// directory's filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetSet {
    /// Distinct vendors, ascending lexicographic.
    pub vendors: Vec<String>,
    /// Distinct installation years as decimal strings, most recent first.
    pub years: Vec<String>,
}

/// Compute the facet lists for a record collection.
///
/// A function of the records only, never of filter state: identical
/// collections produce identical facets regardless of internal order.
pub fn derive_facets(records: &[SystemRecord]) -> FacetSet {
    let vendors: BTreeSet<&str> = records.iter().map(|record| record.vendor.as_str()).collect();
    let years: BTreeSet<u16> = records.iter().map(|record| record.installation_year).collect();

    FacetSet {
        vendors: vendors.into_iter().map(str::to_owned).collect(),
        years: years.into_iter().rev().map(|year| year.to_string()).collect(),
    }
}
