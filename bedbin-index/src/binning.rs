//! Hierarchical genome binning.
//!
//! Six levels of bins, finest first. The finest level cuts the genome into
//! 128 kb (`1 << 17`) bins and every coarser level is eight times wider, so the
//! top level is one bin spanning the whole `u32` coordinate space. An interval
//! lives in the finest bin that contains it entirely; a query only has to look
//! at the bins its own range touches on each level.
//!
//! cf. <http://genomewiki.ucsc.edu/index.php/Bin_indexing_system>

/// First bin id of each level, finest first. Ids never collide across levels.
pub const BIN_OFFSETS: [u32; BIN_LEVELS] = [
    4096 + 512 + 64 + 8 + 1,
    512 + 64 + 8 + 1,
    64 + 8 + 1,
    8 + 1,
    1,
    0,
];

/// How much to shift to get to the finest bin.
pub const BIN_FIRST_SHIFT: u32 = 17;

/// How much to shift to get to the next larger bin.
pub const BIN_NEXT_SHIFT: u32 = 3;

pub const BIN_LEVELS: usize = 6;

///
/// Bin of the range `start..=last`.
///
/// `last` is the inclusive end: pass `end - 1` for a half-open interval, or use
/// [bin_for_range].
///
pub fn compute_bin(start: u32, last: u32) -> u32 {
    let mut start_bin = start >> BIN_FIRST_SHIFT;
    let mut end_bin = last >> BIN_FIRST_SHIFT;

    for offset in BIN_OFFSETS {
        if start_bin == end_bin {
            return offset + start_bin;
        }
        start_bin >>= BIN_NEXT_SHIFT;
        end_bin >>= BIN_NEXT_SHIFT;
    }

    // both sides are shifted down to 0 on the top level, so this is never reached
    BIN_OFFSETS[BIN_LEVELS - 1]
}

/// Bin of the half-open range `[start, end)`.
pub fn bin_for_range(start: u32, end: u32) -> u32 {
    compute_bin(start, end.saturating_sub(1).max(start))
}

///
/// Iterator over every bin, on every level, that intersects a query range.
///
/// Created by [candidate_bins]. Yields the finest level first, bins in
/// ascending order within a level.
///
#[derive(Debug, Clone)]
pub struct CandidateBins {
    level: usize,
    start_bin: u32,
    end_bin: u32,
    next_bin: u32,
}

impl Iterator for CandidateBins {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        while self.level < BIN_LEVELS {
            if self.next_bin <= self.end_bin {
                let bin = BIN_OFFSETS[self.level] + self.next_bin;
                self.next_bin += 1;
                return Some(bin);
            }

            self.level += 1;
            self.start_bin >>= BIN_NEXT_SHIFT;
            self.end_bin >>= BIN_NEXT_SHIFT;
            self.next_bin = self.start_bin;
        }
        None
    }
}

///
/// All bins that may hold an interval overlapping `[start, end)`.
///
/// Nothing is pruned: every level is walked, and callers still have to test
/// the coordinates of what they find in these bins.
///
pub fn candidate_bins(start: u32, end: u32) -> CandidateBins {
    let last = end.saturating_sub(1).max(start);
    let start_bin = start >> BIN_FIRST_SHIFT;

    CandidateBins {
        level: 0,
        start_bin,
        end_bin: last >> BIN_FIRST_SHIFT,
        next_bin: start_bin,
    }
}
