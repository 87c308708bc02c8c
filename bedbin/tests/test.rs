use std::path::PathBuf;

use rstest::*;

use bedbin::core::models::{BedFormat, Strand};
use bedbin::core::reader::BedFile;
use bedbin::core::sort;
use bedbin::index::{BinnedIndex, CoverageSummary, FlatIndex, Query};

#[fixture]
fn path_to_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../tests/data")
}

mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[rstest]
    fn test_binned_and_flat_agree(path_to_data: PathBuf) {
        let a = BedFile::from_path(&path_to_data.join("a.bed"), None, false).unwrap();
        let binned = BinnedIndex::from_path(&path_to_data.join("b.bed.gz"), None, false).unwrap();
        let flat = FlatIndex::from_path(&path_to_data.join("b.bed"), None, false).unwrap();

        assert_eq!(binned.len(), flat.len());

        for record in &a.records {
            let query = Query::from_record(record, false);
            let mut from_bins: Vec<(u32, u32)> = binned
                .find_overlaps(&query)
                .iter()
                .map(|b| (b.start, b.end))
                .collect();
            from_bins.sort();

            let mut from_scan: Vec<(u32, u32)> = flat
                .chrom_records(&record.chrom)
                .iter()
                .filter(|b| query.overlap_with(b).is_some())
                .map(|b| (b.start, b.end))
                .collect();
            from_scan.sort();

            assert_eq!(from_bins, from_scan);
        }
    }

    #[rstest]
    fn test_coverage_of_gff_genes(path_to_data: PathBuf) {
        let a = BedFile::from_path(&path_to_data.join("a.bed"), None, false).unwrap();
        let mut genes =
            BinnedIndex::from_path(&path_to_data.join("genes.gff"), None, false).unwrap();
        assert_eq!(genes.format(), BedFormat::Gff);

        genes.count_hits_par(&a.records, false);

        let first = genes.records().next().unwrap();
        // gene [999, 2000) picks up a3 at [1000, 1100)
        assert_eq!(
            CoverageSummary::from(first),
            CoverageSummary {
                count: 1,
                covered_bases: 100,
                length: 1001,
                fraction: 100.0 / 1001.0,
            }
        );
    }

    #[rstest]
    fn test_sort_by_score(path_to_data: PathBuf) {
        let mut a = BedFile::from_path(&path_to_data.join("a.bed"), None, false).unwrap();
        a.records.sort_by(sort::by_score_desc);

        let names: Vec<&str> = a.records.iter().filter_map(|r| r.name.as_deref()).collect();
        assert_eq!(names, vec!["a5", "a4", "a3", "a2", "a1"]);
        assert_eq!(a.records[0].strand, Some(Strand::Reverse));
    }
}
