use std::fmt::{self, Display};
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of columns of every GFF line.
pub const GFF_COLUMNS: usize = 9;

/// BED column counts this crate knows how to read.
pub const BED_COLUMN_CLASSES: [usize; 5] = [3, 4, 5, 6, 12];

///
/// Input format of a file. Fixed for the whole file.
///
/// - `Bed`: zero-based, half-open coordinates.
/// - `Gff`: one-based, inclusive coordinates, normalized on parse.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BedFormat {
    Bed,
    Gff,
}

impl BedFormat {
    ///
    /// Guess the format from a file name, looking through a trailing `.gz`.
    ///
    /// `.gff`, `.gff3` and `.gtf` are GFF; everything else is treated as BED.
    ///
    pub fn from_path(path: &Path) -> BedFormat {
        let Some(filename) = path.file_name().and_then(|f| f.to_str()) else {
            return BedFormat::Bed;
        };
        let filename = filename.strip_suffix(".gz").unwrap_or(filename);

        match Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("gff") | Some("gff3") | Some("gtf") => BedFormat::Gff,
            _ => BedFormat::Bed,
        }
    }

    /// Whether `columns` is an acceptable column count for this format.
    pub fn accepts_columns(&self, columns: usize) -> bool {
        match self {
            BedFormat::Bed => BED_COLUMN_CLASSES.contains(&columns),
            BedFormat::Gff => columns == GFF_COLUMNS,
        }
    }
}

impl Display for BedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BedFormat::Bed => write!(f, "bed"),
            BedFormat::Gff => write!(f, "gff"),
        }
    }
}
