//! Turn tokenized BED and GFF lines into [BedRecord]s.
//!
//! A [BedParser] is created once per file. It remembers the file's format and the
//! column count of the first record it accepted, and rejects any later line whose
//! column count differs.
//!
//! ```
//! use bedbin_core::models::{BedFormat, Strand};
//! use bedbin_core::parser::BedParser;
//!
//! let mut parser = BedParser::new(BedFormat::Gff);
//! let record = parser
//!     .parse_line("chr1\thavana\texon\t100\t200\t.\t+\t.\tgene_id \"A\"", 1)
//!     .unwrap()
//!     .unwrap();
//!
//! // GFF starts are one-based and inclusive.
//! assert_eq!(record.start, 99);
//! assert_eq!(record.end, 200);
//! assert_eq!(record.strand, Some(Strand::Forward));
//! ```
use crate::errors::ParseError;
use crate::models::format::GFF_COLUMNS;
use crate::models::{BedFormat, BedRecord, Strand};

#[derive(Debug, Clone, Default)]
pub struct BedParser {
    format: Option<BedFormat>,
    column_class: Option<usize>,
}

impl BedParser {
    pub fn new(format: BedFormat) -> Self {
        BedParser {
            format: Some(format),
            column_class: None,
        }
    }

    ///
    /// A parser that picks its format from the first record it sees: a line of
    /// exactly nine columns with integer 4th and 5th columns is GFF, anything
    /// else is BED.
    ///
    pub fn auto() -> Self {
        BedParser::default()
    }

    /// The file's format, `None` while an auto-detecting parser has not accepted a record yet.
    pub fn format(&self) -> Option<BedFormat> {
        self.format
    }

    /// Column count of the first accepted record.
    pub fn column_class(&self) -> Option<usize> {
        self.column_class
    }

    /// Track, browser and comment lines carry no record.
    pub fn is_header(line: &str) -> bool {
        line.starts_with("track") || line.starts_with("browser") || line.starts_with('#')
    }

    ///
    /// Parse one raw line.
    ///
    /// Returns `Ok(None)` for blank and header lines, which are not records.
    ///
    /// # Arguments
    /// - line: the line, without its newline
    /// - line_number: 1-based line number, used in errors
    pub fn parse_line(
        &mut self,
        line: &str,
        line_number: usize,
    ) -> Result<Option<BedRecord>, ParseError> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() || BedParser::is_header(line) {
            return Ok(None);
        }

        let fields: Vec<&str> = line.split('\t').collect();
        self.parse_fields(&fields, line_number).map(Some)
    }

    ///
    /// Parse an already tokenized line.
    ///
    /// # Arguments
    /// - fields: the line's columns, in order
    /// - line_number: 1-based line number, used in errors
    pub fn parse_fields<S: AsRef<str>>(
        &mut self,
        fields: &[S],
        line_number: usize,
    ) -> Result<BedRecord, ParseError> {
        let found = fields.len();
        let format = self.format.unwrap_or_else(|| detect_format(fields));

        if !format.accepts_columns(found) {
            return Err(ParseError::UnsupportedColumnCount {
                line: line_number,
                found,
            });
        }

        match self.column_class {
            Some(expected) if expected != found => {
                return Err(ParseError::FormatInconsistency {
                    line: line_number,
                    expected,
                    found,
                });
            }
            _ => {}
        }

        let record = match format {
            BedFormat::Bed => parse_bed_fields(fields, line_number)?,
            BedFormat::Gff => parse_gff_fields(fields, line_number)?,
        };

        self.format = Some(format);
        self.column_class.get_or_insert(found);

        Ok(record)
    }
}

fn detect_format<S: AsRef<str>>(fields: &[S]) -> BedFormat {
    let is_gff = fields.len() == GFF_COLUMNS
        && fields[3].as_ref().parse::<u32>().is_ok()
        && fields[4].as_ref().parse::<u32>().is_ok();

    if is_gff { BedFormat::Gff } else { BedFormat::Bed }
}

fn parse_coordinate(text: &str, what: &str, line: usize) -> Result<u32, ParseError> {
    text.parse::<u32>()
        .map_err(|_| ParseError::InvalidCoordinate {
            line,
            reason: format!("cannot parse {} position '{}'", what, text),
        })
}

fn parse_chrom(text: &str, line: usize) -> Result<String, ParseError> {
    if text.is_empty() {
        return Err(ParseError::EmptyChromosome { line });
    }
    Ok(text.to_string())
}

fn check_range(start: u32, end: u32, line: usize) -> Result<(), ParseError> {
    if start >= end {
        return Err(ParseError::InvalidCoordinate {
            line,
            reason: format!("start ({}) is not less than end ({})", start, end),
        });
    }
    Ok(())
}

fn optional_field<S: AsRef<str>>(fields: &[S], idx: usize) -> Option<String> {
    fields.get(idx).map(|f| f.as_ref().to_string())
}

fn parse_bed_fields<S: AsRef<str>>(fields: &[S], line: usize) -> Result<BedRecord, ParseError> {
    let chrom = parse_chrom(fields[0].as_ref(), line)?;
    let start = parse_coordinate(fields[1].as_ref(), "start", line)?;
    let end = parse_coordinate(fields[2].as_ref(), "end", line)?;
    check_range(start, end, line)?;

    let mut record = BedRecord::new(chrom, start, end);
    record.name = optional_field(fields, 3);
    record.score = optional_field(fields, 4);
    record.strand = fields.get(5).map(|s| Strand::from(s.as_ref()));
    record.other_fields = fields
        .iter()
        .skip(6)
        .map(|f| f.as_ref().to_string())
        .collect();

    Ok(record)
}

// seqname source feature start end score strand frame attributes
fn parse_gff_fields<S: AsRef<str>>(fields: &[S], line: usize) -> Result<BedRecord, ParseError> {
    let chrom = parse_chrom(fields[0].as_ref(), line)?;
    let start = parse_coordinate(fields[3].as_ref(), "start", line)?
        .checked_sub(1)
        .ok_or_else(|| ParseError::InvalidCoordinate {
            line,
            reason: "GFF start must be at least 1".to_string(),
        })?;
    let end = parse_coordinate(fields[4].as_ref(), "end", line)?;
    check_range(start, end, line)?;

    let mut record = BedRecord::new(chrom, start, end);
    record.name = optional_field(fields, 2);
    record.score = optional_field(fields, 5);
    record.strand = Some(Strand::from(fields[6].as_ref()));
    record.other_fields = [1, 7, 8]
        .iter()
        .map(|&i| fields[i].as_ref().to_string())
        .collect();

    Ok(record)
}
