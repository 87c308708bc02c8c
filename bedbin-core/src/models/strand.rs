use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

///
/// Strand of a record. `.` means the strand is unknown or unused.
///
/// Text that is none of `+`, `-` or `.` is kept as-is so that the record can be
/// written back out verbatim; it only ever matches itself.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strand {
    Forward,
    Reverse,
    Unspecified,
    Other(String),
}

impl From<&str> for Strand {
    fn from(value: &str) -> Self {
        match value {
            "+" => Strand::Forward,
            "-" => Strand::Reverse,
            "." => Strand::Unspecified,
            other => Strand::Other(other.to_string()),
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
            Strand::Unspecified => write!(f, "."),
            Strand::Other(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("+", Strand::Forward)]
    #[case("-", Strand::Reverse)]
    #[case(".", Strand::Unspecified)]
    #[case("?", Strand::Other("?".to_string()))]
    fn test_strand_from_str(#[case] text: &str, #[case] expected: Strand) {
        let strand = Strand::from(text);
        assert_eq!(strand, expected);
        assert_eq!(strand.to_string(), text);
    }
}
