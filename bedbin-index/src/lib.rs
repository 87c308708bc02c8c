//! Binned genomic interval index and overlap queries.
//!
//! Records are grouped by chromosome, then by the bin of a fixed six-level
//! hierarchy that fully contains them. A query only walks the few bins its own
//! range touches on each level, instead of every record on the chromosome.
//!
//! ## Quick Start
//!
//! ```rust
//! use bedbin_core::models::{BedRecord, Strand};
//! use bedbin_index::{BinnedIndex, Query};
//!
//! let mut index = BinnedIndex::from_records(vec![
//!     BedRecord::new("chr1", 10, 20).with_strand(Strand::Forward),
//!     BedRecord::new("chr1", 15, 25).with_strand(Strand::Reverse),
//!     BedRecord::new("chr2", 10, 20).with_strand(Strand::Forward),
//! ]);
//!
//! let query = BedRecord::new("chr1", 18, 30).with_strand(Strand::Forward);
//!
//! // any strand
//! assert_eq!(index.find_overlaps(&Query::from_record(&query, false)).len(), 2);
//! // same strand only
//! assert_eq!(index.find_overlaps(&Query::from_record(&query, true)).len(), 1);
//!
//! // at least half of the query covered by one record?
//! assert!(!index.any_overlap(&Query::from_record(&query, false), 0.7));
//!
//! // count the query into the records it hits
//! index.count_hits(&query, false);
//! assert_eq!(index.records().filter(|r| r.count() == 1).count(), 2);
//! ```

/// Bin computation and query-side bin enumeration.
pub mod binning;

/// Counting hits from another dataset into indexed records.
pub mod coverage;

/// Binned and flat per-chromosome indexes.
pub mod dataset;

/// Overlap queries.
pub mod query;

// re-exports
pub use self::coverage::CoverageSummary;
pub use self::dataset::{BinnedIndex, ChromBins, FlatIndex, RecordId};
pub use self::query::{Query, overlap, passes_fraction};
