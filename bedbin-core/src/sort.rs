//! Comparators for ordering records.
//!
//! All of them are plain functions usable with `sort_by`:
//!
//! ```
//! use bedbin_core::models::BedRecord;
//! use bedbin_core::sort::by_chrom_then_start;
//!
//! let mut records = vec![
//!     BedRecord::new("chr2", 5, 10),
//!     BedRecord::new("chr1", 50, 60),
//!     BedRecord::new("chr1", 5, 10),
//! ];
//! records.sort_by(by_chrom_then_start);
//! assert_eq!(records[0], BedRecord::new("chr1", 5, 10));
//! ```
use std::cmp::Ordering;

use crate::models::BedRecord;

pub fn by_chrom(a: &BedRecord, b: &BedRecord) -> Ordering {
    a.chrom.cmp(&b.chrom)
}

pub fn by_start(a: &BedRecord, b: &BedRecord) -> Ordering {
    a.start.cmp(&b.start)
}

pub fn by_size_asc(a: &BedRecord, b: &BedRecord) -> Ordering {
    a.len().cmp(&b.len())
}

pub fn by_size_desc(a: &BedRecord, b: &BedRecord) -> Ordering {
    by_size_asc(a, b).reverse()
}

///
/// Scores compare as numbers when both parse as one, as text otherwise.
/// A record without a score sorts before any record with one.
///
pub fn by_score_asc(a: &BedRecord, b: &BedRecord) -> Ordering {
    match (a.score.as_deref(), b.score.as_deref()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => match (x.parse::<f64>(), y.parse::<f64>()) {
            (Ok(x), Ok(y)) => x.total_cmp(&y),
            _ => x.cmp(y),
        },
    }
}

pub fn by_score_desc(a: &BedRecord, b: &BedRecord) -> Ordering {
    by_score_asc(a, b).reverse()
}

pub fn by_chrom_then_start(a: &BedRecord, b: &BedRecord) -> Ordering {
    by_chrom(a, b).then_with(|| by_start(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn records() -> Vec<BedRecord> {
        vec![
            BedRecord::new("chr2", 10, 100).with_score("5"),
            BedRecord::new("chr1", 30, 35).with_score("10"),
            BedRecord::new("chr1", 20, 40),
            BedRecord::new("chr10", 0, 1000).with_score("0.5"),
        ]
    }

    fn spans(records: &[BedRecord]) -> Vec<(String, u32, u32)> {
        records
            .iter()
            .map(|r| (r.chrom.clone(), r.start, r.end))
            .collect()
    }

    #[rstest]
    fn test_by_chrom_then_start(mut records: Vec<BedRecord>) {
        records.sort_by(by_chrom_then_start);
        assert_eq!(
            spans(&records),
            vec![
                ("chr1".to_string(), 20, 40),
                ("chr1".to_string(), 30, 35),
                ("chr10".to_string(), 0, 1000),
                ("chr2".to_string(), 10, 100),
            ]
        );
    }

    #[rstest]
    fn test_by_size(mut records: Vec<BedRecord>) {
        records.sort_by(by_size_asc);
        let sizes: Vec<u32> = records.iter().map(|r| r.len()).collect();
        assert_eq!(sizes, vec![5, 20, 90, 1000]);

        records.sort_by(by_size_desc);
        let sizes: Vec<u32> = records.iter().map(|r| r.len()).collect();
        assert_eq!(sizes, vec![1000, 90, 20, 5]);
    }

    #[rstest]
    fn test_by_score_is_numeric(mut records: Vec<BedRecord>) {
        records.sort_by(by_score_asc);
        let scores: Vec<Option<&str>> = records.iter().map(|r| r.score.as_deref()).collect();
        assert_eq!(scores, vec![None, Some("0.5"), Some("5"), Some("10")]);

        records.sort_by(by_score_desc);
        let scores: Vec<Option<&str>> = records.iter().map(|r| r.score.as_deref()).collect();
        assert_eq!(scores, vec![Some("10"), Some("5"), Some("0.5"), None]);
    }

    #[rstest]
    fn test_by_score_falls_back_to_text() {
        let a = BedRecord::new("chr1", 0, 1).with_score("abc");
        let b = BedRecord::new("chr1", 0, 1).with_score("abd");
        assert_eq!(by_score_asc(&a, &b), Ordering::Less);
    }

    #[rstest]
    fn test_by_start_ignores_chrom() {
        let a = BedRecord::new("chr9", 1, 2);
        let b = BedRecord::new("chr1", 5, 6);
        assert_eq!(by_start(&a, &b), Ordering::Less);
        assert_eq!(by_chrom(&a, &b), Ordering::Greater);
    }
}
