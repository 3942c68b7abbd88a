use dioxus::prelude::*;

use crate::core::controller::Action;
use crate::core::table::TableRow;
use crate::t;

/// Full record table. The edit column only exists for admins.
#[component]
pub fn DataTableView(rows: Vec<TableRow>, show_edit_column: bool) -> Element {
    let actions = use_coroutine_handle::<Action>();

    rsx! {
        section { id: "data-table-view", class: "view view--table",
            div { class: "table-wrap",
                table { id: "marks-table", class: "data-table",
                    thead {
                        tr {
                            th { {t!("table-id")} }
                            th { {t!("table-name")} }
                            th { class: "data-table__num", {t!("table-marks")} }
                            th { class: "data-table__num", {t!("table-time")} }
                            if show_edit_column {
                                th { class: "data-table__actions", {t!("table-actions")} }
                            }
                        }
                    }
                    tbody {
                        if rows.is_empty() {
                            tr { class: "data-table__empty",
                                td { colspan: if show_edit_column { "5" } else { "4" }, {t!("table-empty")} }
                            }
                        }
                        {rows.into_iter().map(|row| {
                            let record = row.record.clone();
                            rsx! {
                                tr { key: "{row.student_id}",
                                    td { "{row.student_id}" }
                                    td { "{row.student_name}" }
                                    td { class: "data-table__num", "{row.marks}" }
                                    td { class: "data-table__num", "{row.study_time}" }
                                    if show_edit_column && row.editable {
                                        td { class: "data-table__actions",
                                            button {
                                                r#type: "button",
                                                class: "button button--small",
                                                onclick: move |_| actions.send(Action::OpenEdit(record.clone())),
                                                {t!("table-edit")}
                                            }
                                        }
                                    }
                                }
                            }
                        })}
                    }
                }
            }
        }
    }
}
