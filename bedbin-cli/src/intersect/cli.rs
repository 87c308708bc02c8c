use clap::{ArgGroup, Command, arg, value_parser};

pub const INTERSECT_CMD: &str = "intersect";

pub fn create_intersect_cli() -> Command {
    Command::new(INTERSECT_CMD)
        .author("bedbin")
        .about("Report overlaps between the records of two interval files")
        .arg_required_else_help(true)
        .arg(arg!(-a <a> "Query file, BED or GFF, optionally gzipped. Use '-' for stdin"))
        .arg(arg!(-b <b> "File to index, BED or GFF, optionally gzipped"))
        .arg(arg!(-s --"same-strand" "Only report overlaps on the same strand"))
        .arg(
            arg!(-f --fraction <fraction> "Minimum overlap as a fraction of the A record")
                .required(false)
                .value_parser(value_parser!(f64)),
        )
        .arg(arg!(-r --reciprocal "Require the fraction of the B record as well"))
        .arg(arg!(-u --unique "Write each A record once if it has any overlap"))
        .arg(arg!(-v --invert "Write only A records without overlaps"))
        .arg(arg!(--loj "Write every A record with each overlap, or a null B record"))
        .group(ArgGroup::new("mode").args(["unique", "invert", "loj"]))
        .arg(arg!(--"write-a" "Write the whole A record instead of the shared range"))
        .arg(arg!(--"write-b" "Write the overlapping B record after the A record"))
        .arg(arg!(--"skip-invalid" "Skip lines that fail to parse instead of stopping"))
        .arg(arg!(--config <config> "TOML file with query settings").required(false))
}
