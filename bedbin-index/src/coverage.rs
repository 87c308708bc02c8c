//! Counting overlaps from a second dataset into the index's own records.
//!
//! This is the only place where a query changes stored records: each record hit
//! by a query gets its count bumped and the shared range noted in its depth map.
use bedbin_core::models::BedRecord;
use fxhash::FxHashMap as HashMap;
use log::debug;
use rayon::prelude::*;

use crate::binning::candidate_bins;
use crate::dataset::{BinnedIndex, ChromBins};
use crate::query::Query;

impl ChromBins {
    pub(crate) fn count_hits(&mut self, a: &BedRecord, force_strand: bool) {
        let query = Query::from_record(a, force_strand);

        for bin in candidate_bins(a.start, a.end) {
            let Some(ids) = self.bins.get(&bin) else {
                continue;
            };
            for id in ids {
                let record = &mut self.records[id.0];
                if query.overlap_with(record).is_some() {
                    record.record_hit(a.start, a.end);
                }
            }
        }
    }
}

impl BinnedIndex {
    ///
    /// Record `a` as a hit on every indexed record it overlaps.
    ///
    /// # Arguments
    /// - a: a record from another dataset
    /// - force_strand: only count records on the same strand as `a`
    pub fn count_hits(&mut self, a: &BedRecord, force_strand: bool) {
        if let Some(bins) = self.chroms.get_mut(&a.chrom) {
            bins.count_hits(a, force_strand);
        }
    }

    ///
    /// [count_hits](BinnedIndex::count_hits) for a whole batch, one chromosome per
    /// rayon task.
    ///
    /// Chromosomes share no records, so the result is the same as counting the
    /// batch in order on one thread.
    ///
    pub fn count_hits_par(&mut self, queries: &[BedRecord], force_strand: bool) {
        let mut by_chrom: HashMap<&str, Vec<&BedRecord>> = HashMap::default();
        for a in queries {
            by_chrom.entry(a.chrom.as_str()).or_default().push(a);
        }

        self.chroms.par_iter_mut().for_each(|(chrom, bins)| {
            if let Some(queries) = by_chrom.get(chrom.as_str()) {
                debug!("Counting {} queries on {}", queries.len(), chrom);
                for a in queries {
                    bins.count_hits(a, force_strand);
                }
            }
        });
    }
}

///
/// Coverage of one record by the partners counted into it.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageSummary {
    pub count: u32,
    pub covered_bases: u32,
    pub length: u32,
    pub fraction: f64,
}

impl From<&BedRecord> for CoverageSummary {
    fn from(record: &BedRecord) -> Self {
        let covered_bases = record.covered_bases();
        let length = record.len();
        CoverageSummary {
            count: record.count(),
            covered_bases,
            length,
            fraction: f64::from(covered_bases) / f64::from(length),
        }
    }
}
