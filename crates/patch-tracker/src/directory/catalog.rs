use std::sync::{Arc, RwLock};

use serde::Serialize;

use super::domain::{FilterCriteria, SystemId, SystemRecord};
use super::facets::{derive_facets, FacetSet};
use super::filter::filter;

/// One query's worth of directory output: the matching records plus the
/// counts and facets the consuming view renders around them.
///
/// An empty `records` list with non-zero `total` is the normal
/// over-constrained outcome; the view shows its "no results" affordance, not
/// an error.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryPage {
    pub records: Vec<SystemRecord>,
    pub matched: usize,
    pub total: usize,
    pub facets: FacetSet,
}

#[derive(Clone)]
struct Snapshot {
    records: Arc<Vec<SystemRecord>>,
    facets: Arc<FacetSet>,
}

/// Owner of the current record collection.
///
/// The collection is held as an immutable snapshot and replaced wholesale, so
/// a filter pass never observes a partially updated collection. Facets are
/// recomputed once per replacement, not per query.
pub struct SystemCatalog {
    inner: RwLock<Snapshot>,
}

impl SystemCatalog {
    pub fn new(records: Vec<SystemRecord>) -> Self {
        let facets = derive_facets(&records);
        Self {
            inner: RwLock::new(Snapshot {
                records: Arc::new(records),
                facets: Arc::new(facets),
            }),
        }
    }

    /// Swap in a whole new collection atomically, recomputing facets once.
    pub fn replace(&self, records: Vec<SystemRecord>) {
        let facets = derive_facets(&records);
        let mut guard = self.inner.write().expect("catalog lock poisoned");
        *guard = Snapshot {
            records: Arc::new(records),
            facets: Arc::new(facets),
        };
    }

    /// Cheap handle to the current collection and its memoized facets.
    pub fn snapshot(&self) -> (Arc<Vec<SystemRecord>>, Arc<FacetSet>) {
        let guard = self.inner.read().expect("catalog lock poisoned");
        (guard.records.clone(), guard.facets.clone())
    }

    pub fn facets(&self) -> Arc<FacetSet> {
        self.inner
            .read()
            .expect("catalog lock poisoned")
            .facets
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .expect("catalog lock poisoned")
            .records
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up one record by id, cloning it out of the snapshot.
    pub fn find(&self, id: &SystemId) -> Option<SystemRecord> {
        let (records, _) = self.snapshot();
        records.iter().find(|record| &record.id == id).cloned()
    }

    /// Run one filter pass against the current snapshot.
    pub fn query(&self, criteria: &FilterCriteria) -> DirectoryPage {
        let (records, facets) = self.snapshot();
        let matches: Vec<SystemRecord> = filter(&records, criteria)
            .into_iter()
            .cloned()
            .collect();

        DirectoryPage {
            matched: matches.len(),
            total: records.len(),
            records: matches,
            facets: (*facets).clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::domain::{Selection, SystemStatus};
    use chrono::NaiveDate;

    fn record(id: &str, vendor: &str, year: u16) -> SystemRecord {
        SystemRecord {
            id: SystemId(id.to_string()),
            name: format!("System {id}"),
            vendor: vendor.to_string(),
            installation_year: year,
            platform: "SQL Server".to_string(),
            purpose: "Artifact cataloging".to_string(),
            last_patch: NaiveDate::from_ymd_opt(2023, 11, 20).expect("valid patch date"),
            known_issues: vec!["Weak password policy".to_string()],
            fix_count: 1,
            status: SystemStatus::Moderate,
            institution: "Smithsonian Institution".to_string(),
        }
    }

    #[test]
    fn idle_query_returns_whole_collection() {
        let catalog = SystemCatalog::new(vec![record("a", "Microsoft", 2015)]);
        let page = catalog.query(&FilterCriteria::default());
        assert_eq!(page.matched, 1);
        assert_eq!(page.total, 1);
        assert_eq!(page.records.len(), 1);
    }

    #[test]
    fn over_constrained_query_is_empty_but_keeps_total() {
        let catalog = SystemCatalog::new(vec![record("a", "Microsoft", 2015)]);
        let criteria = FilterCriteria {
            vendor: Selection::only("Greenstone"),
            ..FilterCriteria::default()
        };
        let page = catalog.query(&criteria);
        assert!(page.records.is_empty());
        assert_eq!(page.matched, 0);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn replace_swaps_records_and_facets_together() {
        let catalog = SystemCatalog::new(vec![record("a", "Microsoft", 2015)]);
        assert_eq!(catalog.facets().vendors, vec!["Microsoft"]);

        catalog.replace(vec![record("b", "Greenstone", 2018), record("c", "Greenstone", 2019)]);
        assert_eq!(catalog.len(), 2);
        let facets = catalog.facets();
        assert_eq!(facets.vendors, vec!["Greenstone"]);
        assert_eq!(facets.years, vec!["2019", "2018"]);
    }

    #[test]
    fn find_locates_records_by_id() {
        let catalog = SystemCatalog::new(vec![record("a", "Microsoft", 2015)]);
        assert!(catalog.find(&SystemId("a".to_string())).is_some());
        assert!(catalog.find(&SystemId("missing".to_string())).is_none());
    }
}
