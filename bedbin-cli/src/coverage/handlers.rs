use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use log::{info, warn};

use bedbin_core::errors::BedFileError;
use bedbin_core::models::BedRecord;
use bedbin_core::parser::BedParser;
use bedbin_core::reader::BedReader;
use bedbin_core::report::BedReporter;
use bedbin_core::utils::get_dynamic_reader_w_stdin;
use bedbin_index::{BinnedIndex, CoverageSummary};

use crate::config::QueryConfig;

#[derive(Debug, Clone)]
pub struct CoverageOptions {
    pub a: String,
    pub b: PathBuf,
    pub depth: bool,
    pub config: QueryConfig,
}

impl TryFrom<&ArgMatches> for CoverageOptions {
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

        Ok(CoverageOptions {
            a,
            b,
            depth: matches.get_flag("depth"),
            config: QueryConfig::try_from(matches)?,
        })
    }
}

pub fn run_coverage(matches: &ArgMatches) -> Result<()> {
    let options = CoverageOptions::try_from(matches)?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    coverage(&options, &mut writer)?;
    writer.flush()?;

    Ok(())
}

///
/// Count every A record into the B records it overlaps, then write one line per
/// B record: the record, the number of A hits, bases covered, its length and the
/// covered fraction.
///
pub fn coverage<W: Write>(options: &CoverageOptions, out: &mut W) -> Result<()> {
    let config = &options.config;

    let mut index = BinnedIndex::from_path(&options.b, config.b_format, config.skip_invalid)
        .with_context(|| format!("Failed to index {}", options.b.display()))?;

    let queries = read_queries(&options.a, config)?;
    index.count_hits_par(&queries, config.force_strand);

    info!(
        "Counted {} records of {} into {} records of {}",
        queries.len(),
        options.a,
        index.len(),
        options.b.display()
    );

    let reporter = BedReporter::for_file(index.format(), index.column_class());
    for b in index.records() {
        if options.depth {
            write_depth_runs(&reporter, b, out)?;
        } else {
            let summary = CoverageSummary::from(b);
            reporter.write_tab(out, b.into())?;
            writeln!(
                out,
                "{}\t{}\t{}\t{:.7}",
                summary.count, summary.covered_bases, summary.length, summary.fraction
            )?;
        }
    }

    Ok(())
}

fn read_queries(path: &str, config: &QueryConfig) -> Result<Vec<BedRecord>> {
    let parser = match config.a_format {
        Some(format) => BedParser::new(format),
        None => BedParser::auto(),
    };
    let reader = BedReader::new(get_dynamic_reader_w_stdin(path)?, parser);

    let mut queries = Vec::new();
    for item in reader {
        match item {
            Ok(a) => queries.push(a),
            Err(BedFileError::Parse(e)) if config.skip_invalid => {
                warn!("Skipping line in {}: {}", path, e);
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path)),
        }
    }

    Ok(queries)
}

// record, then run start, run end and depth
fn write_depth_runs<W: Write>(
    reporter: &BedReporter,
    b: &BedRecord,
    out: &mut W,
) -> io::Result<()> {
    let runs = b.depth_runs();
    for (i, (start, depth)) in runs.iter().enumerate() {
        let end = runs.get(i + 1).map(|(pos, _)| *pos).unwrap_or(b.end);
        reporter.write_tab(out, b.into())?;
        writeln!(out, "{}\t{}\t{}", start, end, depth)?;
    }
    Ok(())
}
