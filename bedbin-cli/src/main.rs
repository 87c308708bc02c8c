mod config;
mod coverage;
mod intersect;

use anyhow::Result;
use clap::{ArgMatches, Command, arg};
use log::LevelFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "bedbin";
    pub const BIN_NAME: &str = "bedbin";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("bedbin")
        .about("Binned overlap queries between BED and GFF interval files.")
        .subcommand_required(true)
        .arg(arg!(--verbose ... "Log more, repeat for debug and trace output").global(true))
        .subcommand(intersect::cli::create_intersect_cli())
        .subcommand(coverage::cli::create_coverage_cli())
}

fn init_logging(matches: &ArgMatches) {
    let level = match matches.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(&matches);

    match matches.subcommand() {
        //
        // INTERSECT
        //
        Some((intersect::cli::INTERSECT_CMD, matches)) => {
            intersect::handlers::run_intersect(matches)?;
        }

        //
        // COVERAGE
        //
        Some((coverage::cli::COVERAGE_CMD, matches)) => {
            coverage::handlers::run_coverage(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
