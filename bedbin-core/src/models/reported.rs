use super::record::BedRecord;

///
/// What a reporter is asked to write for one side of a result line.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportedFeature<'a> {
    /// The record as parsed.
    Full(&'a BedRecord),
    /// The record, with `[start, end)` replacing its own coordinates
    /// (e.g. the intersection actually reported).
    Range {
        record: &'a BedRecord,
        start: u32,
        end: u32,
    },
    /// No corresponding feature.
    Null,
}

impl<'a> From<&'a BedRecord> for ReportedFeature<'a> {
    fn from(record: &'a BedRecord) -> Self {
        ReportedFeature::Full(record)
    }
}

impl<'a> From<Option<&'a BedRecord>> for ReportedFeature<'a> {
    fn from(record: Option<&'a BedRecord>) -> Self {
        match record {
            Some(record) => ReportedFeature::Full(record),
            None => ReportedFeature::Null,
        }
    }
}
