use thiserror::Error;

/// Why a single tokenized line could not become a [BedRecord](crate::models::BedRecord).
///
/// Every variant carries the 1-based line number it came from. Whether the
/// line is skipped or the whole load is aborted is up to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Differing number of fields at line {line}: expected {expected}, found {found}")]
    FormatInconsistency {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid coordinate at line {line}: {reason}")]
    InvalidCoordinate { line: usize, reason: String },

    #[error("Empty chromosome name at line {line}")]
    EmptyChromosome { line: usize },

    #[error("Unsupported number of fields at line {line}: {found}")]
    UnsupportedColumnCount { line: usize, found: usize },

    #[error("Line {line} is not valid UTF-8")]
    InvalidEncoding { line: usize },
}

impl ParseError {
    /// Line number the error was raised on.
    pub fn line(&self) -> usize {
        match self {
            ParseError::FormatInconsistency { line, .. }
            | ParseError::InvalidCoordinate { line, .. }
            | ParseError::EmptyChromosome { line }
            | ParseError::UnsupportedColumnCount { line, .. }
            | ParseError::InvalidEncoding { line } => *line,
        }
    }
}

#[derive(Error, Debug)]
pub enum BedFileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BedFileError>;
