use std::io::{self, Write};

use crate::models::{BedFormat, BedRecord, ReportedFeature};

const MISSING: &str = ".";

///
/// Renders records back to tab-delimited text in the layout they were read in.
///
/// GFF records get their one-based start back; BED records are written with as
/// many columns as the file's column class.
///
#[derive(Debug, Clone, Copy)]
pub struct BedReporter {
    format: BedFormat,
    column_class: usize,
}

impl BedReporter {
    pub fn new(format: BedFormat, column_class: usize) -> Self {
        BedReporter {
            format,
            column_class,
        }
    }

    ///
    /// Build the reporter for a file, falling back to the narrowest layout of the
    /// format when no record was ever read.
    ///
    pub fn for_file(format: BedFormat, column_class: Option<usize>) -> Self {
        let default_class = match format {
            BedFormat::Bed => 3,
            BedFormat::Gff => crate::models::format::GFF_COLUMNS,
        };
        BedReporter::new(format, column_class.unwrap_or(default_class))
    }

    pub fn render(&self, feature: ReportedFeature<'_>) -> String {
        match feature {
            ReportedFeature::Full(record) => self.render_record(record, record.start, record.end),
            ReportedFeature::Range { record, start, end } => {
                self.render_record(record, start, end)
            }
            ReportedFeature::Null => self.render_null(),
        }
    }

    /// Write the feature followed by a tab, for the left half of a paired line.
    pub fn write_tab<W: Write>(&self, out: &mut W, feature: ReportedFeature<'_>) -> io::Result<()> {
        write!(out, "{}\t", self.render(feature))
    }

    pub fn write_newline<W: Write>(
        &self,
        out: &mut W,
        feature: ReportedFeature<'_>,
    ) -> io::Result<()> {
        writeln!(out, "{}", self.render(feature))
    }

    fn render_record(&self, record: &BedRecord, start: u32, end: u32) -> String {
        let mut columns: Vec<String> = Vec::with_capacity(self.column_class);

        match self.format {
            BedFormat::Bed => {
                columns.push(record.chrom.clone());
                columns.push(start.to_string());
                columns.push(end.to_string());
                if self.column_class >= 4 {
                    columns.push(record.name.clone().unwrap_or_else(|| MISSING.to_string()));
                }
                if self.column_class >= 5 {
                    columns.push(record.score.clone().unwrap_or_else(|| MISSING.to_string()));
                }
                if self.column_class >= 6 {
                    columns.push(
                        record
                            .strand
                            .as_ref()
                            .map_or_else(|| MISSING.to_string(), |s| s.to_string()),
                    );
                }
                columns.extend(record.other_fields.iter().cloned());
            }
            BedFormat::Gff => {
                let other = |i: usize| {
                    record
                        .other_fields
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| MISSING.to_string())
                };
                columns.push(record.chrom.clone());
                columns.push(other(0));
                columns.push(record.name.clone().unwrap_or_else(|| MISSING.to_string()));
                columns.push((start + 1).to_string());
                columns.push(end.to_string());
                columns.push(record.score.clone().unwrap_or_else(|| MISSING.to_string()));
                columns.push(
                    record
                        .strand
                        .as_ref()
                        .map_or_else(|| MISSING.to_string(), |s| s.to_string()),
                );
                columns.push(other(1));
                columns.push(other(2));
            }
        }

        columns.join("\t")
    }

    fn render_null(&self) -> String {
        let columns: Vec<&str> = match self.format {
            BedFormat::Bed => (0..self.column_class)
                .map(|i| match i {
                    1 | 2 | 4 => "-1",
                    _ => MISSING,
                })
                .collect(),
            BedFormat::Gff => vec![
                MISSING, MISSING, MISSING, "-1", "-1", "-1", MISSING, MISSING, MISSING,
            ],
        };
        columns.join("\t")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::models::BedFormat;
    use crate::parser::BedParser;

    fn parse(format: BedFormat, line: &str) -> BedRecord {
        BedParser::new(format).parse_line(line, 1).unwrap().unwrap()
    }

    #[rstest]
    #[case("chr1\t10\t20")]
    #[case("chr1\t10\t20\tfeat")]
    #[case("chr1\t10\t20\tfeat\t3")]
    #[case("chr1\t10\t20\tfeat\t3\t-")]
    #[case("chr1\t100\t500\ttx\t0\t+\t120\t480\t0\t2\t100,100,\t0,300,")]
    fn test_bed_renders_back_to_input(#[case] line: &str) {
        let record = parse(BedFormat::Bed, line);
        let columns = line.split('\t').count();
        let reporter = BedReporter::new(BedFormat::Bed, columns);

        assert_eq!(reporter.render(ReportedFeature::Full(&record)), line);

        // and parses back to the same record
        assert_eq!(parse(BedFormat::Bed, &reporter.render((&record).into())), record);
    }

    #[rstest]
    fn test_gff_renders_one_based_start() {
        let line = "chr1\tsrc\texon\t100\t200\t.\t+\t0\tgene_id \"g\"";
        let record = parse(BedFormat::Gff, line);
        let reporter = BedReporter::for_file(BedFormat::Gff, None);

        assert_eq!(reporter.render(ReportedFeature::Full(&record)), line);
    }

    #[rstest]
    fn test_range_overrides_coordinates() {
        let record = parse(BedFormat::Bed, "chr1\t10\t20\tfeat");
        let reporter = BedReporter::new(BedFormat::Bed, 4);
        let feature = ReportedFeature::Range {
            record: &record,
            start: 15,
            end: 18,
        };

        assert_eq!(reporter.render(feature), "chr1\t15\t18\tfeat");
    }

    #[rstest]
    #[case(BedFormat::Bed, 3, ".\t-1\t-1")]
    #[case(BedFormat::Bed, 6, ".\t-1\t-1\t.\t-1\t.")]
    #[case(BedFormat::Bed, 12, ".\t-1\t-1\t.\t-1\t.\t.\t.\t.\t.\t.\t.")]
    #[case(BedFormat::Gff, 9, ".\t.\t.\t-1\t-1\t-1\t.\t.\t.")]
    fn test_null_record(#[case] format: BedFormat, #[case] class: usize, #[case] expected: &str) {
        let reporter = BedReporter::new(format, class);
        assert_eq!(reporter.render(ReportedFeature::Null), expected);
        assert_eq!(reporter.render(ReportedFeature::from(None::<&BedRecord>)), expected);
    }

    #[rstest]
    fn test_write_tab_and_newline() {
        let a = BedRecord::new("chr1", 1, 5);
        let reporter = BedReporter::new(BedFormat::Bed, 3);

        let mut out: Vec<u8> = Vec::new();
        reporter.write_tab(&mut out, (&a).into()).unwrap();
        reporter.write_newline(&mut out, ReportedFeature::Null).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "chr1\t1\t5\t.\t-1\t-1\n");
    }
}
