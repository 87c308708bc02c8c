use std::fs::read_to_string;
use std::path::Path;

use bedbin_core::models::BedFormat;
use clap::ArgMatches;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest positive fraction, so any shared base counts as an overlap.
pub const DEFAULT_OVERLAP_FRACTION: f64 = 1e-9;

///
/// Query settings shared by the subcommands. Loaded from a TOML file, then
/// overridden by whatever flags were given on the command line.
///
/// ```toml
/// force_strand = true
/// overlap_fraction = 0.5
/// reciprocal = false
/// skip_invalid = true
/// a_format = "gff"
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    pub force_strand: bool,
    pub overlap_fraction: f64,
    pub reciprocal: bool,
    pub skip_invalid: bool,
    pub a_format: Option<BedFormat>,
    pub b_format: Option<BedFormat>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            force_strand: false,
            overlap_fraction: DEFAULT_OVERLAP_FRACTION,
            reciprocal: false,
            skip_invalid: false,
            a_format: None,
            b_format: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum QueryConfigError {
    #[error("Overlap fraction must be in [0, 1], got {0}")]
    InvalidFraction(f64),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type QueryConfigResult<T> = std::result::Result<T, QueryConfigError>;

impl QueryConfig {
    pub fn validate(self) -> QueryConfigResult<Self> {
        let fraction = self.overlap_fraction;
        if (0.0..=1.0).contains(&fraction) {
            Ok(self)
        } else {
            Err(QueryConfigError::InvalidFraction(fraction))
        }
    }
}

fn flag(matches: &ArgMatches, id: &str) -> bool {
    matches
        .try_get_one::<bool>(id)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
}

impl TryFrom<&ArgMatches> for QueryConfig {
    type Error = QueryConfigError;

    ///
    /// Settings for one run: the `--config` file if given, or the defaults, with
    /// command line flags applied on top. Flags a subcommand does not define are
    /// left alone.
    ///
    fn try_from(matches: &ArgMatches) -> Result<Self, Self::Error> {
        let mut config = match matches.try_get_one::<String>("config").ok().flatten() {
            Some(path) => QueryConfig::try_from(Path::new(path))?,
            None => QueryConfig::default(),
        };

        if flag(matches, "same-strand") {
            config.force_strand = true;
        }
        if flag(matches, "reciprocal") {
            config.reciprocal = true;
        }
        if flag(matches, "skip-invalid") {
            config.skip_invalid = true;
        }
        if let Some(fraction) = matches.try_get_one::<f64>("fraction").ok().flatten() {
            config.overlap_fraction = *fraction;
        }

        config.validate()
    }
}

impl TryFrom<&Path> for QueryConfig {
    type Error = QueryConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config: QueryConfig = toml::from_str(&toml_str)?;
        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::NamedTempFile;

    use crate::coverage::cli::create_coverage_cli;
    use crate::intersect::cli::create_intersect_cli;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[rstest]
    fn test_try_from_toml() {
        let file = write_config(
            "force_strand = true\n\
             overlap_fraction = 0.5\n\
             skip_invalid = true\n\
             a_format = \"gff\"\n",
        );
        let config = QueryConfig::try_from(file.path()).unwrap();

        assert_eq!(
            config,
            QueryConfig {
                force_strand: true,
                overlap_fraction: 0.5,
                reciprocal: false,
                skip_invalid: true,
                a_format: Some(BedFormat::Gff),
                b_format: None,
            }
        );
    }

    #[rstest]
    fn test_empty_toml_is_default() {
        let file = write_config("");
        assert_eq!(QueryConfig::try_from(file.path()).unwrap(), QueryConfig::default());
    }

    #[rstest]
    #[case("overlap_fraction = 1.5")]
    #[case("overlap_fraction = -0.2")]
    fn test_invalid_fraction(#[case] contents: &str) {
        let file = write_config(contents);
        let err = QueryConfig::try_from(file.path()).unwrap_err();
        assert!(matches!(err, QueryConfigError::InvalidFraction(_)));
    }

    #[rstest]
    #[case("overlap_fraction = 0.0")]
    #[case("overlap_fraction = 1.0")]
    fn test_fraction_bounds_are_accepted(#[case] contents: &str) {
        let file = write_config(contents);
        assert!(QueryConfig::try_from(file.path()).is_ok());
    }

    #[rstest]
    fn test_zero_fraction_flag() {
        let matches = create_intersect_cli()
            .try_get_matches_from(["intersect", "-a", "x", "-b", "y", "-f", "0"])
            .unwrap();

        let config = QueryConfig::try_from(&matches).unwrap();
        assert_eq!(config.overlap_fraction, 0.0);
    }

    #[rstest]
    fn test_unknown_key_is_rejected() {
        let file = write_config("strandedness = true");
        let err = QueryConfig::try_from(file.path()).unwrap_err();
        assert!(matches!(err, QueryConfigError::Toml(_)));
    }

    #[rstest]
    fn test_flags_override_file() {
        let file = write_config("overlap_fraction = 0.5\nb_format = \"bed\"\n");
        let path = file.path().to_str().unwrap();
        let matches = create_intersect_cli()
            .try_get_matches_from([
                "intersect", "-a", "x", "-b", "y", "-s", "-f", "0.25", "--config", path,
            ])
            .unwrap();

        let config = QueryConfig::try_from(&matches).unwrap();
        assert_eq!(config.force_strand, true);
        assert_eq!(config.overlap_fraction, 0.25);
        assert_eq!(config.reciprocal, false);
        assert_eq!(config.b_format, Some(BedFormat::Bed));
    }

    #[rstest]
    fn test_flags_without_file() {
        let matches = create_coverage_cli()
            .try_get_matches_from(["coverage", "-a", "x", "-b", "y", "--skip-invalid"])
            .unwrap();

        let config = QueryConfig::try_from(&matches).unwrap();
        assert_eq!(
            config,
            QueryConfig {
                skip_invalid: true,
                ..QueryConfig::default()
            }
        );
    }

    #[rstest]
    fn test_invalid_fraction_flag() {
        let matches = create_intersect_cli()
            .try_get_matches_from(["intersect", "-a", "x", "-b", "y", "-f", "2"])
            .unwrap();

        assert!(matches!(
            QueryConfig::try_from(&matches),
            Err(QueryConfigError::InvalidFraction(_))
        ));
    }

    #[rstest]
    fn test_missing_file() {
        let err = QueryConfig::try_from(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, QueryConfigError::Io(_)));
    }
}
