//! Chromosome -> bin -> record indexes built from parsed records.
//!
//! # Examples
//!
//! ```
//! use bedbin_core::models::BedRecord;
//! use bedbin_index::dataset::BinnedIndex;
//! use bedbin_index::query::Query;
//!
//! let index = BinnedIndex::from_records(vec![
//!     BedRecord::new("chr1", 1000, 2000).with_name("BRCA1"),
//!     BedRecord::new("chr1", 5000, 6000).with_name("TP53"),
//!     BedRecord::new("chr2", 1000, 3000).with_name("EGFR"),
//! ]);
//!
//! let hits = index.find_overlaps(&Query::new("chr1", 1500, 2500));
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].name.as_deref(), Some("BRCA1"));
//! ```
use std::collections::BTreeMap;
use std::path::Path;

use bedbin_core::errors::Result;
use bedbin_core::models::{BedFormat, BedRecord};
use bedbin_core::reader::BedFile;
use log::{debug, info};

use crate::binning::bin_for_range;

///
/// Position of a record inside its chromosome's arena.
///
/// Only meaningful together with the chromosome the record sits on.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(pub(crate) usize);

impl RecordId {
    pub fn index(&self) -> usize {
        self.0
    }
}

///
/// All records of one chromosome, plus the bin -> record id map over them.
///
/// Records are owned by the arena; bins only hold ids, in insertion order.
///
#[derive(Debug, Clone, Default)]
pub struct ChromBins {
    pub(crate) records: Vec<BedRecord>,
    pub(crate) bins: BTreeMap<u32, Vec<RecordId>>,
}

impl ChromBins {
    pub fn insert(&mut self, record: BedRecord) -> RecordId {
        let id = RecordId(self.records.len());
        let bin = bin_for_range(record.start, record.end);

        self.bins.entry(bin).or_default().push(id);
        self.records.push(record);

        id
    }

    pub fn get(&self, id: RecordId) -> Option<&BedRecord> {
        self.records.get(id.0)
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[BedRecord] {
        &self.records
    }

    /// Ids stored in one bin, `None` if the bin is empty.
    pub fn bin(&self, bin: u32) -> Option<&[RecordId]> {
        self.bins.get(&bin).map(|ids| ids.as_slice())
    }

    /// Occupied bins in ascending bin id order.
    pub fn bins(&self) -> impl Iterator<Item = (u32, &[RecordId])> {
        self.bins.iter().map(|(bin, ids)| (*bin, ids.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

///
/// Binned index over one file: chromosome -> bin -> records.
///
/// Every record sits in exactly one (chromosome, bin) slot, the bin being the one
/// of its own `[start, end)`. Records never move once inserted; the only state
/// that changes afterwards is their hit bookkeeping, through
/// [count_hits](BinnedIndex::count_hits).
///
#[derive(Debug, Clone)]
pub struct BinnedIndex {
    pub(crate) chroms: BTreeMap<String, ChromBins>,
    format: BedFormat,
    column_class: Option<usize>,
    len: usize,
}

impl Default for BinnedIndex {
    fn default() -> Self {
        BinnedIndex::new()
    }
}

impl BinnedIndex {
    pub fn new() -> Self {
        BinnedIndex {
            chroms: BTreeMap::new(),
            format: BedFormat::Bed,
            column_class: None,
            len: 0,
        }
    }

    pub fn insert(&mut self, record: BedRecord) -> RecordId {
        self.len += 1;
        match self.chroms.get_mut(&record.chrom) {
            Some(bins) => bins.insert(record),
            None => {
                let chrom = record.chrom.clone();
                self.chroms.entry(chrom).or_default().insert(record)
            }
        }
    }

    pub fn from_records<I: IntoIterator<Item = BedRecord>>(records: I) -> Self {
        let mut index = BinnedIndex::new();
        for record in records {
            index.insert(record);
        }
        index
    }

    ///
    /// Index an already read file, keeping its format for reporting.
    ///
    pub fn from_bed_file(bed_file: BedFile) -> Self {
        let mut index = BinnedIndex::from_records(bed_file.records);
        index.format = bed_file.format;
        index.column_class = bed_file.column_class;

        info!(
            "Indexed {} records on {} chromosomes",
            index.len(),
            index.chroms.len()
        );
        for (chrom, bins) in &index.chroms {
            debug!(
                "{}: {} records in {} bins",
                chrom,
                bins.len(),
                bins.bins.len()
            );
        }

        index
    }

    ///
    /// Read a BED or GFF file straight into a binned index.
    ///
    /// # Arguments
    /// - path: plain or gzipped file
    /// - format: the file's format, or `None` to detect it
    /// - skip_invalid: drop unparseable lines instead of failing
    pub fn from_path(path: &Path, format: Option<BedFormat>, skip_invalid: bool) -> Result<Self> {
        Ok(BinnedIndex::from_bed_file(BedFile::from_path(
            path,
            format,
            skip_invalid,
        )?))
    }

    pub fn format(&self) -> BedFormat {
        self.format
    }

    pub fn column_class(&self) -> Option<usize> {
        self.column_class
    }

    pub fn chrom(&self, chrom: &str) -> Option<&ChromBins> {
        self.chroms.get(chrom)
    }

    pub fn chroms(&self) -> impl Iterator<Item = &String> {
        self.chroms.keys()
    }

    pub fn get(&self, chrom: &str, id: RecordId) -> Option<&BedRecord> {
        self.chroms.get(chrom).and_then(|bins| bins.get(id))
    }

    /// All records, chromosome by chromosome, each in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &BedRecord> {
        self.chroms.values().flat_map(|bins| bins.records.iter())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

///
/// The unbinned variant: chromosome -> records in insertion order, for callers
/// that walk records linearly instead of querying by interval.
///
#[derive(Debug, Clone)]
pub struct FlatIndex {
    chroms: BTreeMap<String, Vec<BedRecord>>,
    format: BedFormat,
    column_class: Option<usize>,
    len: usize,
}

impl Default for FlatIndex {
    fn default() -> Self {
        FlatIndex::new()
    }
}

impl FlatIndex {
    pub fn new() -> Self {
        FlatIndex {
            chroms: BTreeMap::new(),
            format: BedFormat::Bed,
            column_class: None,
            len: 0,
        }
    }

    pub fn insert(&mut self, record: BedRecord) {
        self.len += 1;
        match self.chroms.get_mut(&record.chrom) {
            Some(records) => records.push(record),
            None => {
                self.chroms.insert(record.chrom.clone(), vec![record]);
            }
        }
    }

    pub fn from_records<I: IntoIterator<Item = BedRecord>>(records: I) -> Self {
        let mut index = FlatIndex::new();
        for record in records {
            index.insert(record);
        }
        index
    }

    pub fn from_bed_file(bed_file: BedFile) -> Self {
        let mut index = FlatIndex::from_records(bed_file.records);
        index.format = bed_file.format;
        index.column_class = bed_file.column_class;

        info!(
            "Loaded {} records on {} chromosomes",
            index.len(),
            index.chroms.len()
        );

        index
    }

    pub fn from_path(path: &Path, format: Option<BedFormat>, skip_invalid: bool) -> Result<Self> {
        Ok(FlatIndex::from_bed_file(BedFile::from_path(
            path,
            format,
            skip_invalid,
        )?))
    }

    pub fn format(&self) -> BedFormat {
        self.format
    }

    pub fn column_class(&self) -> Option<usize> {
        self.column_class
    }

    /// Records of one chromosome, empty if the chromosome is absent.
    pub fn chrom_records(&self, chrom: &str) -> &[BedRecord] {
        self.chroms
            .get(chrom)
            .map(|records| records.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &[BedRecord])> {
        self.chroms
            .iter()
            .map(|(chrom, records)| (chrom, records.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::binning::bin_for_range;

    #[fixture]
    fn records() -> Vec<BedRecord> {
        vec![
            BedRecord::new("chr1", 10, 20),
            BedRecord::new("chr1", 15, 25),
            BedRecord::new("chr2", 10, 20),
            BedRecord::new("chr1", 100_000, 300_000),
            BedRecord::new("chr1", 12, 18),
        ]
    }

    fn get_test_path(file_name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../tests/data")
            .join(file_name)
    }

    #[rstest]
    fn test_every_record_in_its_own_bin(records: Vec<BedRecord>) {
        let index = BinnedIndex::from_records(records.clone());
        assert_eq!(index.len(), 5);

        let mut slots = 0;
        for chrom in index.chroms() {
            let bins = index.chrom(chrom).unwrap();
            for (bin, ids) in bins.bins() {
                for id in ids {
                    let record = bins.get(*id).unwrap();
                    assert_eq!(&record.chrom, chrom);
                    assert_eq!(bin_for_range(record.start, record.end), bin);
                    slots += 1;
                }
            }
        }
        assert_eq!(slots, records.len());
    }

    #[rstest]
    fn test_bin_keeps_insertion_order(records: Vec<BedRecord>) {
        let index = BinnedIndex::from_records(records);
        let chr1 = index.chrom("chr1").unwrap();

        let starts: Vec<u32> = chr1
            .bin(4681)
            .unwrap()
            .iter()
            .map(|id| chr1.get(*id).unwrap().start)
            .collect();
        assert_eq!(starts, vec![10, 15, 12]);
        assert_eq!(chr1.bin(585).map(|ids| ids.len()), Some(1));
    }

    #[rstest]
    fn test_records_iterates_by_chrom(records: Vec<BedRecord>) {
        let index = BinnedIndex::from_records(records);
        let chroms: Vec<&str> = index.records().map(|r| r.chrom.as_str()).collect();
        assert_eq!(chroms, vec!["chr1", "chr1", "chr1", "chr1", "chr2"]);
    }

    #[rstest]
    fn test_get_by_id(records: Vec<BedRecord>) {
        let mut index = BinnedIndex::new();
        let ids: Vec<RecordId> = records.into_iter().map(|r| index.insert(r)).collect();

        assert_eq!(ids[2].index(), 0);
        assert_eq!(index.get("chr2", ids[2]).unwrap().start, 10);
        assert_eq!(index.get("chr1", ids[4]).unwrap().start, 12);
        assert!(index.get("chrX", ids[0]).is_none());
    }

    #[rstest]
    fn test_flat_index(records: Vec<BedRecord>) {
        let index = FlatIndex::from_records(records);

        assert_eq!(index.len(), 5);
        assert_eq!(index.chrom_records("chr1").len(), 4);
        assert_eq!(index.chrom_records("chr1")[3].start, 12);
        assert!(index.chrom_records("chrX").is_empty());
        assert_eq!(index.iter().count(), 2);
    }

    #[rstest]
    fn test_from_path_keeps_format() {
        let index = BinnedIndex::from_path(&get_test_path("genes.gff"), None, false).unwrap();
        assert_eq!(index.format(), BedFormat::Gff);
        assert_eq!(index.column_class(), Some(9));

        let flat =
            FlatIndex::from_path(&get_test_path("a.bed"), Some(BedFormat::Bed), false).unwrap();
        assert_eq!(flat.format(), BedFormat::Bed);
        assert_eq!(flat.column_class(), Some(6));
        assert_eq!(flat.len(), 5);
    }

    #[rstest]
    fn test_empty_index() {
        let index = BinnedIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.records().count(), 0);
        assert!(FlatIndex::default().is_empty());
    }
}
