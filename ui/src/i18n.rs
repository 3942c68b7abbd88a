//! Localized strings for the dashboard.
//!
//! Fluent bundles live under `i18n/<lang>/marksboard-ui.ftl` and are embedded at
//! compile time. `en-US` is the fallback; `es-ES` ships alongside it. Desktop
//! picks the initial language from the OS locale list, web from
//! `navigator.languages`. Components look strings up with [`t!`], which checks
//! keys against the fallback bundle at compile time.

use std::collections::BTreeSet;
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// `t!("nav-overview")`, or with Fluent arguments `t!("ingest-credentials", count = 5)`.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fallback bundle: `i18n/en-US/marksboard-ui.ftl`.
const DOMAIN: &str = "marksboard-ui";
const FALLBACK: &str = "en-US";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

#[derive(Debug, thiserror::Error)]
pub enum LanguageError {
    #[error("`{0}` is not a language tag")]
    InvalidTag(String),
    #[error("no bundle for `{0}`")]
    NotBundled(String),
    #[error(transparent)]
    Load(#[from] i18n_embed::I18nEmbedError),
}

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = FALLBACK.parse().expect("fallback tag is well formed");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Selects the best bundle for the platform's preferred languages. Runs once.
pub fn init() {
    INIT.call_once(|| match apply(&requested_languages()) {
        Ok(tag) => tracing::debug!(language = %tag, "localization ready"),
        Err(err) => tracing::warn!(error = %err, "language selection failed; using {FALLBACK}"),
    });
}

/// Switches to a bundled language. The loader is left untouched on error.
pub fn set_language(tag: &str) -> Result<(), LanguageError> {
    let lang: LanguageIdentifier = tag
        .parse()
        .map_err(|_| LanguageError::InvalidTag(tag.to_string()))?;
    if !available_languages().iter().any(|code| *code == lang.to_string()) {
        return Err(LanguageError::NotBundled(tag.to_string()));
    }
    apply(&[lang])?;
    Ok(())
}

pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// Bundled language tags, sorted.
pub fn available_languages() -> Vec<String> {
    Localizations::iter()
        .filter_map(|path| path.split('/').next().map(str::to_string))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn apply(requested: &[LanguageIdentifier]) -> Result<String, LanguageError> {
    let selected = i18n_embed::select(&*LOADER, &Localizations, requested)?;
    Ok(selected
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| FALLBACK.to_string()))
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}
