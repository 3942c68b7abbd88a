use dioxus::prelude::*;

use crate::core::charts::{ChartImages, ChartSnapshot};
use crate::t;

use super::overview::ChartGrid;

/// Server-rendered chart images next to the client charts.
#[component]
pub fn ReportsView(images: ChartImages, charts: Option<ChartSnapshot>) -> Element {
    rsx! {
        section { id: "reports-view", class: "view view--reports",
            div { class: "report-grid",
                ReportImage {
                    id: "histogram-img",
                    title: t!("report-histogram-title"),
                    handle: images.histogram.clone(),
                }
                ReportImage {
                    id: "bar-chart-img",
                    title: t!("report-bar-title"),
                    handle: images.bar_chart.clone(),
                }
            }
            ChartGrid { charts }
        }
    }
}

#[component]
fn ReportImage(id: &'static str, title: String, handle: Option<String>) -> Element {
    rsx! {
        figure { class: "report-card",
            figcaption { class: "report-card__title", "{title}" }
            {match handle {
                Some(src) => rsx! {
                    img { id: "{id}", class: "report-card__image", src: "{src}", alt: "{title}" }
                },
                None => rsx! {
                    p { class: "report-card__placeholder", {t!("report-image-pending")} }
                },
            }}
        }
    }
}
