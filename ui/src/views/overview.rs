use dioxus::prelude::*;

use crate::components::{BarChart, HistogramChart, StatCards, StudentInfo};
use crate::core::charts::ChartSnapshot;
use crate::core::model::{Record, SummaryStats};
use crate::t;

#[component]
pub fn OverviewView(
    stats: Option<SummaryStats>,
    show_student_info: bool,
    own_record: Option<Record>,
    charts: Option<ChartSnapshot>,
) -> Element {
    rsx! {
        section { id: "overview-view", class: "view view--overview",
            StatCards { stats }
            if show_student_info {
                StudentInfo { record: own_record }
            }
            ChartGrid { charts }
        }
    }
}

/// Client-rendered charts. A new revision remounts both, so nothing of the
/// previous render is kept.
#[component]
pub fn ChartGrid(charts: Option<ChartSnapshot>) -> Element {
    let Some(snapshot) = charts else {
        return rsx! {
            div { class: "chart-grid chart-grid--empty",
                p { class: "chart-card__placeholder", {t!("chart-loading")} }
            }
        };
    };

    rsx! {
        div { key: "{snapshot.revision}", class: "chart-grid",
            BarChart { series: snapshot.bar.clone() }
            HistogramChart { histogram: snapshot.histogram.clone() }
        }
    }
}
