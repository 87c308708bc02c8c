use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use log::{info, warn};

use bedbin_core::errors::BedFileError;
use bedbin_core::models::{BedFormat, BedRecord, ReportedFeature};
use bedbin_core::parser::BedParser;
use bedbin_core::reader::BedReader;
use bedbin_core::report::BedReporter;
use bedbin_core::utils::get_dynamic_reader_w_stdin;
use bedbin_index::{BinnedIndex, Query, passes_fraction};

use crate::config::QueryConfig;

/// What to write for each A record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// One line per overlap.
    Overlaps { write_a: bool, write_b: bool },
    /// A once, if it has an overlap.
    Unique,
    /// A once, if it has none.
    NoOverlap,
    /// A with each overlapping B, or with a null B record.
    LeftOuterJoin,
}

#[derive(Debug, Clone)]
pub struct IntersectOptions {
    pub a: String,
    pub b: PathBuf,
    pub mode: ReportMode,
    pub config: QueryConfig,
}

impl TryFrom<&ArgMatches> for IntersectOptions {
    type Error = anyhow::Error;

    fn try_from(matches: &ArgMatches) -> Result<Self> {
        let a = matches
            .get_one::<String>("a")
            .cloned()
            .ok_or_else(|| anyhow!("A path to the A file is required."))?;

        let b = matches
            .get_one::<String>("b")
            .map(PathBuf::from)
            .ok_or_else(|| anyhow!("A path to the B file is required."))?;

        let mode = if matches.get_flag("unique") {
            ReportMode::Unique
        } else if matches.get_flag("invert") {
            ReportMode::NoOverlap
        } else if matches.get_flag("loj") {
            ReportMode::LeftOuterJoin
        } else {
            ReportMode::Overlaps {
                write_a: matches.get_flag("write-a"),
                write_b: matches.get_flag("write-b"),
            }
        };

        Ok(IntersectOptions {
            a,
            b,
            mode,
            config: QueryConfig::try_from(matches)?,
        })
    }
}

pub fn run_intersect(matches: &ArgMatches) -> Result<()> {
    let options = IntersectOptions::try_from(matches)?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    intersect(&options, &mut writer)?;
    writer.flush()?;

    Ok(())
}

///
/// Index B, then stream A through it and write the report to `out`.
///
pub fn intersect<W: Write>(options: &IntersectOptions, out: &mut W) -> Result<()> {
    let config = &options.config;

    let index = BinnedIndex::from_path(&options.b, config.b_format, config.skip_invalid)
        .with_context(|| format!("Failed to index {}", options.b.display()))?;
    let b_reporter = BedReporter::for_file(index.format(), index.column_class());

    let parser = match config.a_format {
        Some(format) => BedParser::new(format),
        None => BedParser::auto(),
    };
    let mut reader = BedReader::new(get_dynamic_reader_w_stdin(&options.a)?, parser);

    let mut processed: usize = 0;
    let mut written: usize = 0;

    while let Some(item) = reader.next() {
        let a = match item {
            Ok(a) => a,
            Err(BedFileError::Parse(e)) if config.skip_invalid => {
                warn!("Skipping line in {}: {}", options.a, e);
                continue;
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to read {}", options.a)),
        };

        let parser = reader.parser();
        let a_reporter =
            BedReporter::for_file(parser.format().unwrap_or(BedFormat::Bed), parser.column_class());

        processed += 1;
        written += report_record(&index, &a, options.mode, config, a_reporter, b_reporter, out)?;
    }

    info!(
        "Compared {} records of {} against {} records of {}, wrote {} lines",
        processed,
        options.a,
        index.len(),
        options.b.display(),
        written
    );

    Ok(())
}

fn report_record<W: Write>(
    index: &BinnedIndex,
    a: &BedRecord,
    mode: ReportMode,
    config: &QueryConfig,
    a_reporter: BedReporter,
    b_reporter: BedReporter,
    out: &mut W,
) -> io::Result<usize> {
    let query = Query::from_record(a, config.force_strand);
    let fraction = config.overlap_fraction;

    match mode {
        ReportMode::Unique | ReportMode::NoOverlap => {
            let found = if config.reciprocal {
                index.any_reciprocal_overlap(&query, fraction)
            } else {
                index.any_overlap(&query, fraction)
            };

            if found == (mode == ReportMode::Unique) {
                a_reporter.write_newline(out, a.into())?;
                Ok(1)
            } else {
                Ok(0)
            }
        }
        ReportMode::Overlaps { write_a, write_b } => {
            let mut written = 0;
            for b in passing_hits(index, &query, config) {
                let left = if write_a {
                    ReportedFeature::Full(a)
                } else {
                    ReportedFeature::Range {
                        record: a,
                        start: a.start.max(b.start),
                        end: a.end.min(b.end),
                    }
                };

                if write_b {
                    a_reporter.write_tab(out, left)?;
                    b_reporter.write_newline(out, b.into())?;
                } else {
                    a_reporter.write_newline(out, left)?;
                }
                written += 1;
            }
            Ok(written)
        }
        ReportMode::LeftOuterJoin => {
            let mut written = 0;
            for b in passing_hits(index, &query, config) {
                a_reporter.write_tab(out, a.into())?;
                b_reporter.write_newline(out, b.into())?;
                written += 1;
            }
            if written == 0 {
                a_reporter.write_tab(out, a.into())?;
                b_reporter.write_newline(out, ReportedFeature::Null)?;
                written = 1;
            }
            Ok(written)
        }
    }
}

/// Overlapping records of B that also meet the fraction settings.
fn passing_hits<'a>(
    index: &'a BinnedIndex,
    query: &Query<'_>,
    config: &QueryConfig,
) -> Vec<&'a BedRecord> {
    index
        .find_overlaps(query)
        .into_iter()
        .filter(|b| {
            let bases = query.overlap_with(b).unwrap_or(0);
            passes_fraction(
                bases,
                query.len(),
                b.len(),
                config.overlap_fraction,
                config.reciprocal,
            )
        })
        .collect()
}
