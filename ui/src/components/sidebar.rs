use dioxus::prelude::*;

use crate::core::controller::Action;
use crate::core::view::{RoleLayout, View};
use crate::i18n;
use crate::t;

/// Dashboard navigation. Only the views the role layout allows are listed; the
/// active one carries the `--active` modifier.
///
/// The language selector re-selects the global loader and bumps the shared
/// language signal so the dashboard subtree remounts with fresh strings.
#[component]
pub fn Sidebar(layout: RoleLayout, active: View, username: String, role: String) -> Element {
    let actions = use_coroutine_handle::<Action>();

    let mut current_lang = use_signal(i18n::current_language);
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();

    let on_change = move |evt: dioxus::events::FormEvent| {
        let val = evt.value();
        if i18n::set_language(&val).is_ok() {
            current_lang.set(val.clone());
            if let Some(mut code) = lang_code_ctx {
                code.set(val);
            }
        }
    };

    let entries = layout.nav_entries();

    rsx! {
        aside { class: "sidebar",
            div { class: "sidebar__brand",
                span { class: "sidebar__brand-mark", "Marksboard" }
                span { class: "sidebar__brand-subtitle", {t!("tagline")} }
            }

            ul { class: "sidebar__nav",
                for view in entries.into_iter() {
                    li {
                        key: "{view.slug()}",
                        class: if view == active { "sidebar__link sidebar__link--active" } else { "sidebar__link" },
                        "data-view": view.slug(),
                        onclick: move |_| actions.send(Action::SwitchView(view)),
                        {nav_label(view)}
                    }
                }
            }

            if show_switcher {
                div { class: "sidebar__locale",
                    label {
                        class: "visually-hidden",
                        r#for: "locale-select",
                        {t!("nav-language-label")}
                    }
                    select {
                        id: "locale-select",
                        value: "{current_lang()}",
                        oninput: on_change,
                        { langs().iter().map(|code| {
                            let c = code.clone();
                            rsx!{
                                option { key: "{c}", value: "{c}", "{c}" }
                            }
                        })}
                    }
                }
            }

            div { class: "sidebar__footer",
                div { class: "sidebar__user",
                    span { id: "display-name", class: "sidebar__user-name", "{username}" }
                    span { id: "display-role", class: "sidebar__user-role", "{role}" }
                }
                button {
                    r#type: "button",
                    id: "logout-btn",
                    class: "button button--ghost",
                    onclick: move |_| actions.send(Action::Logout),
                    {t!("nav-logout")}
                }
            }
        }
    }
}

fn nav_label(view: View) -> String {
    match view {
        View::Overview => t!("nav-overview"),
        View::DataTable => t!("nav-data-table"),
        View::Reports => t!("nav-reports"),
    }
}
