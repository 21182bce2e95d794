//! One row of a schedule export, addressed by column position.

/// Column layout of the export.
const START_DATE: usize = 0;
const START_TIME: usize = 1;
const END_DATE: usize = 2;
const END_TIME: usize = 3;
const CATEGORY: usize = 4;
const TITLE: usize = 5;
const DESCRIPTION: usize = 6;
// Column 7 is carried by the export but unused.
const LOCATION: usize = 8;

/// Raw string fields of one exported row. Nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub location: String,
}

impl RawRecord {
    /// Build a record from positional fields. Missing trailing fields are empty.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let field = |i: usize| fields.get(i).cloned().unwrap_or_default();

        RawRecord {
            start_date: field(START_DATE),
            start_time: field(START_TIME),
            end_date: field(END_DATE),
            end_time: field(END_TIME),
            category: field(CATEGORY),
            title: field(TITLE),
            description: field(DESCRIPTION),
            location: field(LOCATION),
        }
    }
}
