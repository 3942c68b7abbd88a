use dioxus::prelude::*;

use crate::core::format::{format_hours, format_number};
use crate::core::model::Record;
use crate::t;

/// A student's own row, from the identity payload.
#[component]
pub fn StudentInfo(record: Option<Record>) -> Element {
    let Some(record) = record else {
        return rsx! {
            section { id: "student-info", class: "panel student-info",
                h2 { class: "panel__title", {t!("student-info-title")} }
                p { class: "panel__muted", {t!("student-info-missing")} }
            }
        };
    };

    rsx! {
        section { id: "student-info", class: "panel student-info",
            h2 { class: "panel__title", {t!("student-info-title")} }
            dl { class: "student-info__grid",
                dt { {t!("student-info-name")} }
                dd { id: "s-name", "{record.student_name}" }
                dt { {t!("student-info-id")} }
                dd { id: "s-id", "{record.student_id}" }
                dt { {t!("student-info-marks")} }
                dd { id: "s-marks", "{format_number(record.marks)}" }
                dt { {t!("student-info-time")} }
                dd { id: "s-time", "{format_hours(record.time_study)}" }
            }
        }
    }
}
