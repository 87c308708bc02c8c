//! Overlap queries against a [BinnedIndex].
//!
//! All three query modes share one primitive: look the chromosome up, walk the
//! [candidate bins](crate::binning::candidate_bins) of the query range, and test
//! each record of each occupied bin against the exact coordinates (and strand,
//! when forced).
//!
//! - [BinnedIndex::find_overlaps]: every qualifying record
//! - [BinnedIndex::any_overlap]: is there one covering at least a fraction of the query?
//! - [BinnedIndex::any_reciprocal_overlap]: ... and of itself as well?
//!
//! A chromosome missing from the index is not an error; it just has no hits.
use bedbin_core::models::{BedRecord, Strand};

use crate::binning::candidate_bins;
use crate::dataset::{BinnedIndex, ChromBins, RecordId};

///
/// Amount of overlap between `[a_start, a_end)` and `[b_start, b_end)`.
///
/// Positive when they overlap. Otherwise minus the distance between them (0 when
/// they merely touch).
///
#[inline]
pub fn overlap(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> i64 {
    i64::from(a_end.min(b_end)) - i64::from(a_start.max(b_start))
}

///
/// An overlap query: `[start, end)` on `chrom`.
///
/// With `force_strand` set, only records whose strand equals `strand` exactly
/// qualify.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query<'a> {
    pub chrom: &'a str,
    pub start: u32,
    pub end: u32,
    pub strand: Option<&'a Strand>,
    pub force_strand: bool,
}

impl<'a> Query<'a> {
    pub fn new(chrom: &'a str, start: u32, end: u32) -> Self {
        Query {
            chrom,
            start,
            end,
            strand: None,
            force_strand: false,
        }
    }

    /// Same query, restricted to records on `strand`.
    pub fn on_strand(mut self, strand: &'a Strand) -> Self {
        self.strand = Some(strand);
        self.force_strand = true;
        self
    }

    ///
    /// Query with the range and strand of a record from another dataset.
    ///
    pub fn from_record(record: &'a BedRecord, force_strand: bool) -> Self {
        Query {
            chrom: &record.chrom,
            start: record.start,
            end: record.end,
            strand: record.strand.as_ref(),
            force_strand,
        }
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `record` passes the strand filter of this query.
    pub fn strand_matches(&self, record: &BedRecord) -> bool {
        !self.force_strand || record.strand.as_ref() == self.strand
    }

    /// Overlap of `record` with the query range, `None` unless it is positive
    /// and the strand filter passes.
    pub fn overlap_with(&self, record: &BedRecord) -> Option<u32> {
        let bases = overlap(record.start, record.end, self.start, self.end);
        if bases > 0 && self.strand_matches(record) {
            // bases is at most the query length, itself a u32
            Some(bases as u32)
        } else {
            None
        }
    }
}

///
/// Whether `bases` of overlap is enough: at least `fraction` of the query length,
/// and with `reciprocal` also at least `fraction` of the record length.
///
pub fn passes_fraction(
    bases: u32,
    query_len: u32,
    record_len: u32,
    fraction: f64,
    reciprocal: bool,
) -> bool {
    let bases = f64::from(bases);
    bases / f64::from(query_len) >= fraction
        && (!reciprocal || bases / f64::from(record_len) >= fraction)
}

impl ChromBins {
    ///
    /// Records overlapping the query, bin by bin, with their overlap in bases.
    ///
    pub(crate) fn hits<'a, 'q>(
        &'a self,
        query: Query<'q>,
    ) -> impl Iterator<Item = (RecordId, &'a BedRecord, u32)> {
        candidate_bins(query.start, query.end)
            .filter_map(move |bin| self.bins.get(&bin))
            .flatten()
            .filter_map(move |id| {
                let record = &self.records[id.0];
                query.overlap_with(record).map(|bases| (*id, record, bases))
            })
    }
}

impl BinnedIndex {
    ///
    /// Iterate over every record overlapping the query.
    ///
    /// Records come out finest bin level first, and in insertion order within a
    /// bin.
    ///
    pub fn find_overlaps_iter<'a, 'q>(
        &'a self,
        query: &Query<'q>,
    ) -> impl Iterator<Item = &'a BedRecord> {
        let query = *query;
        self.chroms
            .get(query.chrom)
            .into_iter()
            .flat_map(move |bins| bins.hits(query).map(|(_, record, _)| record))
    }

    ///
    /// Collect every record overlapping the query.
    ///
    /// # Arguments
    /// - query: range, chromosome and strand filter
    ///
    /// # Returns
    /// The overlapping records; empty when there are none or the chromosome is
    /// not indexed.
    pub fn find_overlaps(&self, query: &Query<'_>) -> Vec<&BedRecord> {
        match self.chroms.get(query.chrom) {
            Some(bins) => bins.hits(*query).map(|(_, record, _)| record).collect(),
            None => Vec::new(),
        }
    }

    /// Like [find_overlaps](BinnedIndex::find_overlaps), returning ids on the
    /// query's chromosome instead of records.
    pub fn find_overlap_ids(&self, query: &Query<'_>) -> Vec<RecordId> {
        match self.chroms.get(query.chrom) {
            Some(bins) => bins.hits(*query).map(|(id, _, _)| id).collect(),
            None => Vec::new(),
        }
    }

    ///
    /// Is there at least one record covering `fraction` or more of the query?
    ///
    /// Stops at the first such record. A fraction of 0 accepts any positive
    /// overlap.
    ///
    pub fn any_overlap(&self, query: &Query<'_>, fraction: f64) -> bool {
        let Some(bins) = self.chroms.get(query.chrom) else {
            return false;
        };
        bins.hits(*query).any(|(_, record, bases)| {
            passes_fraction(bases, query.len(), record.len(), fraction, false)
        })
    }

    ///
    /// Is there at least one record such that the overlap covers `fraction` or
    /// more of the query *and* of the record itself?
    ///
    /// This rejects a short query clipping a long record, and a long query
    /// clipping a short record, which [any_overlap](BinnedIndex::any_overlap)
    /// would accept.
    ///
    pub fn any_reciprocal_overlap(&self, query: &Query<'_>, fraction: f64) -> bool {
        let Some(bins) = self.chroms.get(query.chrom) else {
            return false;
        };
        bins.hits(*query).any(|(_, record, bases)| {
            passes_fraction(bases, query.len(), record.len(), fraction, true)
        })
    }
}
