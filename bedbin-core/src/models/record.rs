use std::collections::BTreeMap;
use std::fmt::{self, Display};

use super::strand::Strand;

///
/// Number of partner intervals starting and ending at one position of a record.
///
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct DepthCounts {
    pub starts: u32,
    pub ends: u32,
}

///
/// BedRecord struct, representation of one interval parsed from a BED or GFF line.
///
/// Coordinates are always zero-based and half-open, whatever the input format was.
/// The hit counters (`count`, `depth_map`, `min_overlap_start`) start empty and are
/// only ever touched by [BedRecord::record_hit].
///
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct BedRecord {
    pub chrom: String,
    pub start: u32,
    pub end: u32,

    pub name: Option<String>,
    pub score: Option<String>,
    pub strand: Option<Strand>,

    pub other_fields: Vec<String>,

    count: u32,
    depth_map: BTreeMap<u32, DepthCounts>,
    min_overlap_start: Option<u32>,
}

impl BedRecord {
    pub fn new(chrom: impl Into<String>, start: u32, end: u32) -> Self {
        BedRecord {
            chrom: chrom.into(),
            start,
            end,
            name: None,
            score: None,
            strand: None,
            other_fields: Vec::new(),
            count: 0,
            depth_map: BTreeMap::new(),
            min_overlap_start: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_score(mut self, score: impl Into<String>) -> Self {
        self.score = Some(score.into());
        self
    }

    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.strand = Some(strand);
        self
    }

    pub fn with_other_fields(mut self, other_fields: Vec<String>) -> Self {
        self.other_fields = other_fields;
        self
    }

    ///
    /// Get length of the record
    ///
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// A parsed record always has `start < end`, so this is only true for
    /// hand-built records.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Number of partner intervals from another dataset found to overlap this one.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn depth_map(&self) -> &BTreeMap<u32, DepthCounts> {
        &self.depth_map
    }

    /// Smallest start among overlapping partners, `None` until the first hit.
    pub fn min_overlap_start(&self) -> Option<u32> {
        self.min_overlap_start
    }

    ///
    /// Account for one overlapping partner `[start, end)`.
    ///
    /// Bumps the hit count, records a start event at the first overlapping base
    /// and an end event at the end of the shared range, and lowers
    /// `min_overlap_start` to the partner's start.
    ///
    /// A partner sharing no base with the record is ignored.
    ///
    pub fn record_hit(&mut self, start: u32, end: u32) {
        let shared_start = self.start.max(start);
        let shared_end = self.end.min(end);
        if shared_start >= shared_end {
            return;
        }

        self.count += 1;

        self.depth_map.entry(shared_start).or_default().starts += 1;
        self.depth_map.entry(shared_end).or_default().ends += 1;

        self.min_overlap_start = Some(match self.min_overlap_start {
            Some(current) => current.min(start),
            None => start,
        });
    }

    ///
    /// Walk the depth map and return `(position, depth)` runs.
    ///
    /// Each item says that from `position` up to the next item's position (or the
    /// record end) exactly `depth` partners cover the record.
    ///
    pub fn depth_runs(&self) -> Vec<(u32, u32)> {
        let mut runs = Vec::with_capacity(self.depth_map.len() + 1);
        let mut depth: i64 = 0;

        if self.depth_map.keys().next() != Some(&self.start) {
            runs.push((self.start, 0));
        }

        for (pos, counts) in &self.depth_map {
            depth += i64::from(counts.starts) - i64::from(counts.ends);
            if *pos < self.end {
                runs.push((*pos, u32::try_from(depth).unwrap_or(0)));
            }
        }

        runs
    }

    ///
    /// Number of bases of the record covered by at least one partner.
    ///
    pub fn covered_bases(&self) -> u32 {
        let runs = self.depth_runs();
        let mut covered = 0;
        for (i, (pos, depth)) in runs.iter().enumerate() {
            let next = runs.get(i + 1).map(|(p, _)| *p).unwrap_or(self.end);
            if *depth > 0 {
                covered += next - pos;
            }
        }
        covered
    }
}

impl Display for BedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}
