use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::errors::{BedFileError, ParseError, Result};
use crate::models::{BedFormat, BedRecord};
use crate::parser::BedParser;
use crate::utils::get_dynamic_reader;

///
/// Line source over a BED or GFF file.
///
/// Yields one item per record line; blank and header lines are skipped. Line
/// numbers count every physical line, starting at 1. A line that is not valid
/// UTF-8 is a [ParseError::InvalidEncoding] for that line only, so callers can
/// skip it like any other bad line.
///
pub struct BedReader<R> {
    reader: R,
    buf: Vec<u8>,
    parser: BedParser,
    line_number: usize,
}

impl<R: BufRead> BedReader<R> {
    pub fn new(reader: R, parser: BedParser) -> Self {
        BedReader {
            reader,
            buf: Vec::new(),
            parser,
            line_number: 0,
        }
    }

    /// The parser, with whatever format and column class it has settled on so far.
    pub fn parser(&self) -> &BedParser {
        &self.parser
    }
}

impl BedReader<BufReader<Box<dyn Read>>> {
    pub fn from_path(path: &Path, format: BedFormat) -> Result<Self> {
        Ok(BedReader::new(
            get_dynamic_reader(path)?,
            BedParser::new(format),
        ))
    }

    pub fn from_path_auto(path: &Path) -> Result<Self> {
        Ok(BedReader::new(get_dynamic_reader(path)?, BedParser::auto()))
    }
}

impl<R: BufRead> Iterator for BedReader<R> {
    type Item = Result<BedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_number += 1;

            let bytes = self.buf.strip_suffix(b"\n").unwrap_or(&self.buf[..]);
            let line = match std::str::from_utf8(bytes) {
                Ok(line) => line,
                Err(_) => {
                    let e = ParseError::InvalidEncoding {
                        line: self.line_number,
                    };
                    return Some(Err(e.into()));
                }
            };

            match self.parser.parse_line(line, self.line_number) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

///
/// BedFile struct, all records of one BED or GFF file in file order.
///
#[derive(Clone, Debug)]
pub struct BedFile {
    pub records: Vec<BedRecord>,
    pub format: BedFormat,
    pub column_class: Option<usize>,
    pub path: Option<PathBuf>,
}

impl BedFile {
    ///
    /// Read every record of a file.
    ///
    /// # Arguments
    /// - path: plain or gzipped file
    /// - format: the file's format, or `None` to detect it from the first record
    /// - skip_invalid: log and drop lines that fail to parse instead of failing
    ///   the whole read
    pub fn from_path(path: &Path, format: Option<BedFormat>, skip_invalid: bool) -> Result<Self> {
        let mut reader = match format {
            Some(format) => BedReader::from_path(path, format)?,
            None => BedReader::from_path_auto(path)?,
        };

        let mut records = Vec::new();
        let mut skipped: usize = 0;

        for item in reader.by_ref() {
            match item {
                Ok(record) => records.push(record),
                Err(BedFileError::Parse(e)) if skip_invalid => {
                    warn!("Skipping line in {}: {}", path.display(), e);
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        let parser = reader.parser();
        let format = parser.format().unwrap_or(BedFormat::Bed);

        info!(
            "Read {} records ({} skipped) from {} as {}",
            records.len(),
            skipped,
            path.display(),
            format
        );

        Ok(BedFile {
            records,
            format,
            column_class: parser.column_class(),
            path: Some(path.to_owned()),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
