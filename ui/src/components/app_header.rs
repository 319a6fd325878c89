use dioxus::prelude::*;
use tracing::{debug, warn};

use crate::core::platform;
use crate::core::theme::ThemeMode;
use crate::i18n;
use crate::t;

/// Page header: brand, tagline, locale switcher and the dark mode toggle.
///
/// The platform crate may provide a `Signal<String>` holding the active
/// language code. When present it is updated on every switch so the app root
/// can remount its subtree with fresh strings.
#[component]
pub fn AppHeader() -> Element {
    i18n::init();

    let mut current_lang = use_signal(i18n::current_language);
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();

    // Prefer the root's signal so the choice survives the language remount.
    let local_mode = use_signal(ThemeMode::default);
    let mut mode = try_use_context::<Signal<ThemeMode>>().unwrap_or(local_mode);

    use_effect(move || platform::apply_dark_class(mode().is_dark()));

    let on_change = move |evt: FormEvent| {
        let val = evt.value();
        match i18n::set_language(&val) {
            Ok(()) => {
                debug!(lang = %val, "language switched");
                current_lang.set(val.clone());
                if let Some(mut code) = lang_code_ctx {
                    code.set(val);
                }
            }
            Err(err) => warn!(lang = %val, "language switch failed: {err}"),
        }
    };

    let on_toggle = move |_: MouseEvent| {
        let next = mode().toggled();
        mode.set(next);
    };

    rsx! {
        header {
            id: "navbar",
            class: "navbar",
            div { style: "display:none", "{lang_marker}" }
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", {t!("app-title")} }
                    }
                    span { class: "navbar__brand-subtitle", {t!("tagline")} }
                }

                div { class: "navbar__actions",
                    if show_switcher {
                        div { class: "navbar__locale",
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
                                    rsx! {
                                        option { key: "{c}", value: "{c}", "{c}" }
                                    }
                                })}
                            }
                        }
                    }
                    button {
                        id: "toggleMode",
                        r#type: "button",
                        class: "button button--ghost navbar__mode",
                        aria_pressed: "{mode().is_dark()}",
                        onclick: on_toggle,
                        {t!("toggle-mode")}
                    }
                }
            }
        }
    }
}
