use dioxus::prelude::*;
use futures_util::StreamExt;
use tracing::{debug, info};

use crate::core::api::ApiClient;
use crate::core::controller::{Action, AppState, Controller, Outcome, Screen};
use crate::core::platform;
use crate::core::storage::LocalTokenStore;
use crate::i18n;
use crate::views::{DashboardView, LoginView, SplashView};

/// Root component shared by the web and desktop shells.
///
/// One coroutine owns the [`Controller`]; every [`Action`] sent through the
/// coroutine handle runs to completion before the next one starts. The
/// controller's snapshots land in `state`, which everything below renders from.
#[component]
pub fn MarksApp() -> Element {
    i18n::init();

    let mut state = use_signal(AppState::default);
    let lang_code = use_context_provider(|| Signal::new(i18n::current_language()));

    let actions = use_coroutine(move |mut rx: UnboundedReceiver<Action>| async move {
        let mut controller = Controller::new(ApiClient::default(), LocalTokenStore)
            .with_observer(move |snapshot: &AppState| state.set(snapshot.clone()));
        info!(api_base = %controller.backend().config().api_base, "controller ready");

        while let Some(action) = rx.next().await {
            if controller.dispatch(action).await == Outcome::ReloadPage
                && !platform::reload_page()
            {
                debug!("no page to reload; state already reset to login");
            }
        }
    });

    use_hook(move || actions.send(Action::Boot));

    let snapshot = state();
    // Keyed on the language so a locale switch remounts the translated subtree.
    rsx! {
        div { class: "app-root", key: "{lang_code}",
            {match snapshot.screen {
                Screen::Booting => rsx! { SplashView {} },
                Screen::Login => rsx! {
                    LoginView { error: snapshot.login_error.clone(), busy: snapshot.busy }
                },
                Screen::Dashboard => rsx! { DashboardView { state: snapshot.clone() } },
            }}
        }
    }
}
