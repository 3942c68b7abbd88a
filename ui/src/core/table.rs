//! Record set → table rows.

use crate::core::format::{format_hours, format_number};
use crate::core::model::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub student_id: String,
    pub student_name: String,
    pub marks: String,
    pub study_time: String,
    /// Only admins get the edit button.
    pub editable: bool,
    pub record: Record,
}

/// Rebuilds every row from scratch; the previous rows play no part.
pub fn table_rows(records: &[Record], admin: bool) -> Vec<TableRow> {
    records
        .iter()
        .map(|record| TableRow {
            student_id: record.student_id.clone(),
            student_name: record.student_name.clone(),
            marks: format_number(record.marks),
            study_time: format_hours(record.time_study),
            editable: admin,
            record: record.clone(),
        })
        .collect()
}
