use clap::{Command, arg};

pub const COVERAGE_CMD: &str = "coverage";

pub fn create_coverage_cli() -> Command {
    Command::new(COVERAGE_CMD)
        .author("bedbin")
        .about("Count how many A records overlap each B record and how much of it they cover")
        .arg_required_else_help(true)
        .arg(arg!(-a <a> "File whose records are counted, BED or GFF, gzipped or '-' for stdin"))
        .arg(arg!(-b <b> "File to report coverage for, BED or GFF, optionally gzipped"))
        .arg(arg!(-s --"same-strand" "Only count overlaps on the same strand"))
        .arg(arg!(-d --depth "Write depth runs across each B record instead of a summary"))
        .arg(arg!(--"skip-invalid" "Skip lines that fail to parse instead of stopping"))
        .arg(arg!(--config <config> "TOML file with query settings").required(false))
}
