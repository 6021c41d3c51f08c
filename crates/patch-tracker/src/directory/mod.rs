//! Directory search over the registered-system collection.
//!
//! Filtering is a pure function of a record snapshot and a [`FilterCriteria`]
//! value; facets are a pure function of the snapshot alone. `SystemCatalog`
//! ties the two together and owns the atomic collection swap.

pub mod catalog;
pub mod domain;
pub mod facets;
pub mod filter;

pub use catalog::{DirectoryPage, SystemCatalog};
pub use domain::{FilterCriteria, Selection, SystemId, SystemRecord, SystemStatus};
pub use facets::{derive_facets, FacetSet};
pub use filter::{filter, matches};
