use dioxus::prelude::*;

use crate::core::controller::Action;
use crate::t;

/// Username/password form. `error` is the message from the last failed attempt.
#[component]
pub fn LoginView(error: Option<String>, busy: bool) -> Element {
    let actions = use_coroutine_handle::<Action>();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        actions.send(Action::Login {
            username: username(),
            password: password(),
        });
    };

    rsx! {
        section { id: "login-section", class: "login",
            form { class: "login__card", onsubmit: on_submit,
                div { class: "login__brand",
                    span { class: "login__brand-mark", "Marksboard" }
                    p { class: "login__tagline", {t!("tagline")} }
                }
                h1 { class: "login__title", {t!("login-title")} }

                label { class: "field",
                    span { class: "field__label", {t!("login-username")} }
                    input {
                        id: "username",
                        r#type: "text",
                        autocomplete: "username",
                        required: true,
                        value: "{username}",
                        oninput: move |evt| username.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { class: "field__label", {t!("login-password")} }
                    input {
                        id: "password",
                        r#type: "password",
                        autocomplete: "current-password",
                        required: true,
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }

                button {
                    r#type: "submit",
                    class: "button button--primary button--block",
                    disabled: busy,
                    if busy { {t!("login-busy")} } else { {t!("login-submit")} }
                }

                if let Some(message) = error {
                    p { id: "login-error", class: "login__error", role: "alert", "{message}" }
                }
            }
        }
    }
}

/// Shown while the stored token is being checked.
#[component]
pub fn SplashView() -> Element {
    rsx! {
        section { class: "splash",
            span { class: "splash__spinner" }
            p { class: "splash__text", {t!("boot-checking")} }
        }
    }
}
