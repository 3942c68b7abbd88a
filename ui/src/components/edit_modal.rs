use dioxus::prelude::*;
use tracing::debug;

use crate::core::controller::{Action, EditDraft};
use crate::core::model::RecordPatch;
use crate::t;

/// Modal form for one record. The id is shown but not editable; it is the key
/// the patch is sent against.
#[component]
pub fn EditModal(draft: EditDraft) -> Element {
    let actions = use_coroutine_handle::<Action>();

    let mut name = use_signal(|| draft.student_name.clone());
    let mut marks = use_signal(|| prefill(draft.marks));
    let mut time_study = use_signal(|| prefill(draft.time_study));

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        match parse_patch(&name(), &marks(), &time_study()) {
            Some(patch) => actions.send(Action::SubmitEdit(patch)),
            None => debug!("edit form holds a non-numeric value"),
        }
    };

    rsx! {
        div { class: "modal-backdrop",
            div {
                id: "edit-modal",
                class: "modal",
                role: "dialog",
                "aria-modal": "true",
                form { class: "modal__body", onsubmit: on_submit,
                    h2 { class: "modal__title", {t!("edit-title")} }

                    label { class: "field",
                        span { class: "field__label", {t!("edit-id")} }
                        input {
                            id: "edit-id",
                            r#type: "text",
                            readonly: true,
                            value: "{draft.student_id}",
                        }
                    }
                    label { class: "field",
                        span { class: "field__label", {t!("edit-name")} }
                        input {
                            id: "edit-name",
                            r#type: "text",
                            required: true,
                            value: "{name}",
                            oninput: move |evt| name.set(evt.value()),
                        }
                    }
                    label { class: "field",
                        span { class: "field__label", {t!("edit-marks")} }
                        input {
                            id: "edit-marks",
                            r#type: "number",
                            step: "any",
                            required: true,
                            value: "{marks}",
                            oninput: move |evt| marks.set(evt.value()),
                        }
                    }
                    label { class: "field",
                        span { class: "field__label", {t!("edit-time")} }
                        input {
                            id: "edit-time",
                            r#type: "number",
                            step: "any",
                            required: true,
                            value: "{time_study}",
                            oninput: move |evt| time_study.set(evt.value()),
                        }
                    }

                    div { class: "modal__actions",
                        button {
                            r#type: "button",
                            class: "button button--ghost",
                            onclick: move |_| actions.send(Action::CloseEdit),
                            {t!("edit-cancel")}
                        }
                        button {
                            r#type: "submit",
                            class: "button button--primary",
                            {t!("edit-save")}
                        }
                    }
                }
            }
        }
    }
}

/// Full precision, so saving an untouched field sends the stored value back unchanged.
fn prefill(value: f64) -> String {
    value.to_string()
}

fn parse_patch(name: &str, marks: &str, time_study: &str) -> Option<RecordPatch> {
    Some(RecordPatch {
        student_name: name.to_string(),
        marks: marks.trim().parse().ok()?,
        time_study: time_study.trim().parse().ok()?,
    })
}
