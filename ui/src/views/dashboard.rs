use dioxus::prelude::*;

use crate::components::{AdminActions, AlertDialog, EditModal, Sidebar};
use crate::core::controller::AppState;
use crate::core::view::View;

use super::{DataTableView, OverviewView, ReportsView};

/// Authenticated shell: sidebar, header and the active view. The edit modal and
/// the alert dialog overlay everything when present.
#[component]
pub fn DashboardView(state: AppState) -> Element {
    let user = state.session.user();
    let username = user.map(|u| u.username.clone()).unwrap_or_default();
    let role = user.map(|u| u.role.as_str().to_string()).unwrap_or_default();
    let own_record = user.and_then(|u| u.own_record.clone());
    let layout = state.layout;

    let body = match state.view {
        View::Overview => rsx! {
            OverviewView {
                stats: state.cache.stats().copied(),
                show_student_info: layout.show_student_info,
                own_record,
                charts: state.charts.clone(),
            }
        },
        View::DataTable => rsx! {
            DataTableView {
                rows: state.table_rows.clone(),
                show_edit_column: layout.show_edit_column,
            }
        },
        View::Reports => rsx! {
            ReportsView {
                images: state.images.clone(),
                charts: state.charts.clone(),
            }
        },
    };

    rsx! {
        div { id: "dashboard-section", class: "dashboard",
            Sidebar { layout, active: state.view, username, role }

            main { class: "dashboard__main",
                header { class: "dashboard__header",
                    h1 { id: "view-title", class: "dashboard__title", "{state.title()}" }
                    if layout.show_admin_actions {
                        AdminActions { busy: state.busy, ingest: state.ingest.clone() }
                    }
                }
                div { class: "dashboard__content", {body} }
            }

            if let Some(draft) = state.edit.clone() {
                EditModal { key: "{draft.student_id}", draft }
            }
            if let Some(message) = state.alert.clone() {
                AlertDialog { message }
            }
        }
    }
}
