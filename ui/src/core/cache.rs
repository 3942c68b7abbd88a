//! Last fetched records and statistics, shared by the table and chart renderers.

use crate::core::model::{Record, SummaryStats};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataCache {
    records: Option<Vec<Record>>,
    stats: Option<SummaryStats>,
}

impl DataCache {
    pub fn records(&self) -> Option<&[Record]> {
        self.records.as_deref()
    }

    pub fn stats(&self) -> Option<&SummaryStats> {
        self.stats.as_ref()
    }

    /// Replaces the whole record set; nothing from the previous fetch survives.
    pub fn replace_records(&mut self, records: Vec<Record>) {
        self.records = Some(records);
    }

    pub fn replace_stats(&mut self, stats: SummaryStats) {
        self.stats = Some(stats);
    }
}
