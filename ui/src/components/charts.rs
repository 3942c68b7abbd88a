use dioxus::prelude::*;

use crate::core::charts::{bar_fractions, BarSeries, Histogram};
use crate::core::format::format_number;
use crate::t;

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 260.0;
const PLOT_TOP: f64 = 16.0;
const PLOT_BOTTOM: f64 = 220.0;

/// Marks of the first records as vertical bars on a fixed 0–100 scale.
///
/// Keyed by `revision` at the call site so each render replaces the previous chart.
#[component]
pub fn BarChart(series: BarSeries) -> Element {
    if series.values.is_empty() {
        return rsx! {
            p { class: "chart-card__placeholder", {t!("chart-empty")} }
        };
    }

    let bars = layout_bars(&bar_fractions(&series.values, 100.0));

    rsx! {
        figure { class: "chart-card",
            figcaption { class: "chart-card__title", {t!("chart-bar-title")} }
            svg {
                id: "barChart",
                class: "chart chart--bar",
                view_box: "0 0 {WIDTH} {HEIGHT}",
                line { class: "chart__axis", x1: "0", y1: "{PLOT_BOTTOM}", x2: "{WIDTH}", y2: "{PLOT_BOTTOM}" }
                for (idx, bar) in bars.iter().enumerate() {
                    g { key: "{idx}",
                        rect {
                            class: "chart__bar chart__bar--marks",
                            x: "{bar.x}",
                            y: "{bar.y}",
                            width: "{bar.width}",
                            height: "{bar.height}",
                        }
                        text {
                            class: "chart__value",
                            x: "{bar.x + bar.width / 2.0}",
                            y: "{bar.y - 4.0}",
                            text_anchor: "middle",
                            "{format_number(series.values[idx])}"
                        }
                        text {
                            class: "chart__label",
                            x: "{bar.x + bar.width / 2.0}",
                            y: "{PLOT_BOTTOM + 16.0}",
                            text_anchor: "middle",
                            "{short_label(&series.labels[idx])}"
                        }
                    }
                }
            }
            p { class: "chart-card__legend",
                span { class: "chart-card__swatch chart-card__swatch--marks" }
                {t!("chart-bar-legend")}
            }
        }
    }
}

/// Frequency of marks per 20-point band.
#[component]
pub fn HistogramChart(histogram: Histogram) -> Element {
    let counts: Vec<f64> = histogram.counts.iter().map(|c| *c as f64).collect();
    let ceiling = histogram.peak().max(1) as f64;
    let bars = layout_bars(&bar_fractions(&counts, ceiling));
    let labelled: Vec<(&'static str, u32)> = histogram.labelled().collect();

    rsx! {
        figure { class: "chart-card",
            figcaption { class: "chart-card__title", {t!("chart-histogram-title")} }
            svg {
                id: "histogramChart",
                class: "chart chart--histogram",
                view_box: "0 0 {WIDTH} {HEIGHT}",
                line { class: "chart__axis", x1: "0", y1: "{PLOT_BOTTOM}", x2: "{WIDTH}", y2: "{PLOT_BOTTOM}" }
                for (idx, bar) in bars.iter().enumerate() {
                    g { key: "{idx}",
                        rect {
                            class: "chart__bar chart__bar--frequency",
                            x: "{bar.x}",
                            y: "{bar.y}",
                            width: "{bar.width}",
                            height: "{bar.height}",
                        }
                        text {
                            class: "chart__value",
                            x: "{bar.x + bar.width / 2.0}",
                            y: "{bar.y - 4.0}",
                            text_anchor: "middle",
                            "{labelled[idx].1}"
                        }
                        text {
                            class: "chart__label",
                            x: "{bar.x + bar.width / 2.0}",
                            y: "{PLOT_BOTTOM + 16.0}",
                            text_anchor: "middle",
                            "{labelled[idx].0}"
                        }
                    }
                }
            }
            p { class: "chart-card__legend",
                span { class: "chart-card__swatch chart-card__swatch--frequency" }
                {t!("chart-histogram-legend")}
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct BarRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

fn layout_bars(fractions: &[f64]) -> Vec<BarRect> {
    if fractions.is_empty() {
        return Vec::new();
    }
    let slot = WIDTH / fractions.len() as f64;
    let width = slot * 0.7;
    let plot_height = PLOT_BOTTOM - PLOT_TOP;
    fractions
        .iter()
        .enumerate()
        .map(|(idx, fraction)| {
            let height = plot_height * fraction;
            BarRect {
                x: idx as f64 * slot + (slot - width) / 2.0,
                y: PLOT_BOTTOM - height,
                width,
                height,
            }
        })
        .collect()
}

fn short_label(name: &str) -> String {
    const MAX: usize = 10;
    if name.chars().count() <= MAX {
        name.to_string()
    } else {
        let head: String = name.chars().take(MAX - 1).collect();
        format!("{head}…")
    }
}
