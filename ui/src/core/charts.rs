//! Record set → chart series. Pure; the chart components only draw what these return.

use crate::core::model::Record;

/// The bar chart shows this many records, in the order the server returned them.
pub const BAR_LIMIT: usize = 10;

pub const HISTOGRAM_EDGES: [f64; 6] = [0.0, 20.0, 40.0, 60.0, 80.0, 100.0];
pub const HISTOGRAM_LABELS: [&str; 5] = ["0-20", "20-40", "40-60", "60-80", "80-100"];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Histogram {
    pub counts: [u32; 5],
}

impl Histogram {
    pub fn labelled(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        HISTOGRAM_LABELS.into_iter().zip(self.counts.iter().copied())
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn peak(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Both client-side charts, recreated together. `revision` increases on every render.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSnapshot {
    pub revision: u64,
    pub bar: BarSeries,
    pub histogram: Histogram,
}

impl ChartSnapshot {
    pub fn build(revision: u64, records: &[Record]) -> Self {
        Self {
            revision,
            bar: bar_series(records),
            histogram: histogram(records),
        }
    }
}

/// Handles for the two server-rendered chart images.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartImages {
    pub histogram: Option<String>,
    pub bar_chart: Option<String>,
}

pub fn bar_series(records: &[Record]) -> BarSeries {
    let shown = &records[..records.len().min(BAR_LIMIT)];
    BarSeries {
        labels: shown.iter().map(|r| r.student_name.clone()).collect(),
        values: shown.iter().map(|r| r.marks).collect(),
    }
}

/// Bin `i` holds `[20i, 20(i+1))`; the last bin also takes 100. Out-of-range scores get no bin.
pub fn histogram_bin(score: f64) -> Option<usize> {
    if !(HISTOGRAM_EDGES[0]..=HISTOGRAM_EDGES[5]).contains(&score) {
        return None;
    }
    (0..HISTOGRAM_LABELS.len())
        .find(|&i| score >= HISTOGRAM_EDGES[i] && score < HISTOGRAM_EDGES[i + 1])
        .or(Some(HISTOGRAM_LABELS.len() - 1))
}

pub fn histogram(records: &[Record]) -> Histogram {
    let mut counts = [0u32; 5];
    for bin in records.iter().filter_map(|r| histogram_bin(r.marks)) {
        counts[bin] = counts[bin].saturating_add(1);
    }
    Histogram { counts }
}

/// Bar heights as fractions of `ceiling`, clamped to `[0, 1]`.
pub fn bar_fractions(values: &[f64], ceiling: f64) -> Vec<f64> {
    if ceiling <= 0.0 || !ceiling.is_finite() {
        return vec![0.0; values.len()];
    }
    values
        .iter()
        .map(|v| {
            if v.is_finite() {
                (v / ceiling).clamp(0.0, 1.0)
            } else {
                0.0
            }
        })
        .collect()
}
