use dioxus::prelude::*;
use tracing::{debug, warn};

use crate::core::controller::Action;
use crate::core::model::IngestSummary;
use crate::t;

/// Reload-from-source and file upload. Rendered for admins only.
#[component]
pub fn AdminActions(busy: bool, ingest: Option<IngestSummary>) -> Element {
    let actions = use_coroutine_handle::<Action>();

    let on_file = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(file_name) = engine.files().into_iter().next() else {
            debug!("upload skipped: no file selected");
            return;
        };
        match engine.read_file(&file_name).await {
            Some(bytes) => actions.send(Action::UploadCsv { file_name, bytes }),
            None => warn!(file_name = %file_name, "selected file could not be read"),
        }
    };

    rsx! {
        div { class: "admin-actions", id: "admin-actions",
            button {
                r#type: "button",
                id: "reload-btn",
                class: "button button--ghost",
                disabled: busy,
                onclick: move |_| actions.send(Action::ManualReload),
                {t!("admin-reload")}
            }
            label {
                r#for: "upload-csv-input",
                class: if busy { "button button--primary button--disabled" } else { "button button--primary" },
                {t!("admin-upload")}
            }
            input {
                r#type: "file",
                id: "upload-csv-input",
                class: "visually-hidden",
                accept: ".csv,.xlsx,.xls",
                disabled: busy,
                onchange: on_file,
            }
            if busy {
                span { class: "admin-actions__status", role: "status", {t!("admin-busy")} }
            }
            if let Some(summary) = ingest {
                IngestNotice { notice: summary }
            }
        }
    }
}

#[component]
fn IngestNotice(notice: IngestSummary) -> Element {
    let count = notice.student_credentials.len();
    rsx! {
        div { class: "ingest-notice", role: "status",
            if !notice.message.is_empty() {
                p { class: "ingest-notice__message", "{notice.message}" }
            }
            if count > 0 {
                details { class: "ingest-notice__credentials",
                    summary { {t!("ingest-credentials", count = count)} }
                    ul {
                        for cred in notice.student_credentials.iter() {
                            li { key: "{cred.username}",
                                code { "{cred.username}" }
                                if let Some(password) = cred.password.as_ref() {
                                    " / "
                                    code { "{password}" }
                                }
                            }
                        }
                    }
                }
            }
            if let Some(note) = notice.note.as_ref() {
                p { class: "ingest-notice__note", "{note}" }
            }
        }
    }
}
