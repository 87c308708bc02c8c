pub mod format;
pub mod record;
pub mod reported;
pub mod strand;

// re-export for cleaner imports
pub use self::format::BedFormat;
pub use self::record::{BedRecord, DepthCounts};
pub use self::reported::ReportedFeature;
pub use self::strand::Strand;
