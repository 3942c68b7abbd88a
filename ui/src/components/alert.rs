use dioxus::prelude::*;

use crate::core::controller::Action;
use crate::t;

#[component]
pub fn AlertDialog(message: String) -> Element {
    let actions = use_coroutine_handle::<Action>();
    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal modal--alert", role: "alertdialog",
                p { id: "alert-message", class: "modal__message", "{message}" }
                div { class: "modal__actions",
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        autofocus: true,
                        onclick: move |_| actions.send(Action::DismissAlert),
                        {t!("alert-ok")}
                    }
                }
            }
        }
    }
}
