//! Localization for `deepdetect-ui`.
//!
//! Wiring:
//! - `i18n-embed` picks the language and loads assets
//! - `fluent` formats messages
//! - `rust-embed` bakes the `.ftl` files into the binary
//! - `i18n-embed-fl` provides the compile-time checked `fl!` macro
//!
//! Layout (relative to the crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   en-US/deepdetect-ui.ftl   (fallback/reference)
//!   es-ES/deepdetect-ui.ftl
//! ```
//!
//! Call `init()` once at app start (it is idempotent), then look strings up
//! with `t!`. Messages are argument-free on purpose: numbers and file
//! names are formatted in Rust and concatenated next to the label, which
//! keeps Fluent's bidi isolation marks out of the rendered fragments.
//!
//! Platform notes:
//! - Desktop uses `DesktopLanguageRequester` (OS locale list).
//! - Web/WASM uses `WebLanguageRequester` (`navigator.languages`) and always
//!   embeds the assets (`debug-embed`).
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// Short form of `fl!(&*LOADER, key)`.
///
/// ```ignore
/// let label = t!("clear-button");
/// ```
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
}

/// Fluent domain; the fallback file is `i18n/en-US/{DOMAIN}.ftl`.
const DOMAIN: &str = "deepdetect-ui";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Global language loader used by `t!`.
pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = "en-US".parse().expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Load the bundles for the user's preferred languages (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = i18n_embed::select(&*LOADER, &Localizations, &requested) {
            tracing::warn!("failed selecting languages ({err}); continuing with fallback");
        }
    });
}

/// Switch language at runtime. Unparseable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        return Ok(());
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// Tag of the bundle currently used for lookups, e.g. `en-US`.
pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// Embedded language tags, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}
