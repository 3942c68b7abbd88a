use dioxus::prelude::*;

use crate::core::format::{format_hours, format_number};
use crate::core::model::SummaryStats;
use crate::t;

/// The four aggregate cards. Values read "—" until the first stats fetch lands.
#[component]
pub fn StatCards(stats: Option<SummaryStats>) -> Element {
    let (avg_marks, avg_time, highest, lowest) = match stats {
        Some(s) => (
            format_number(s.average_marks),
            format_hours(s.average_study_time),
            format_number(s.highest_marks),
            format_number(s.lowest_marks),
        ),
        None => (
            "—".to_string(),
            "—".to_string(),
            "—".to_string(),
            "—".to_string(),
        ),
    };

    rsx! {
        div { class: "stat-grid",
            StatCard { id: "avg-marks", label: t!("stat-average-marks"), value: avg_marks }
            StatCard { id: "avg-time", label: t!("stat-average-time"), value: avg_time }
            StatCard { id: "max-marks", label: t!("stat-highest"), value: highest }
            StatCard { id: "min-marks", label: t!("stat-lowest"), value: lowest }
        }
    }
}

#[component]
fn StatCard(id: &'static str, label: String, value: String) -> Element {
    rsx! {
        div { class: "stat-card",
            span { class: "stat-card__label", "{label}" }
            span { id: "{id}", class: "stat-card__value", "{value}" }
        }
    }
}
