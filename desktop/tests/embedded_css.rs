#![cfg(test)]
//! The desktop binary inlines `ui/assets/theme/main.css`; a broken path or an
//! emptied file would only show up as an unstyled window at runtime.

const EMBEDDED_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

#[test]
fn embedded_css_is_not_empty() {
    assert!(!EMBEDDED_CSS.trim().is_empty(), "embedded theme is empty");
}

#[test]
fn embedded_css_has_light_and_dark_palettes() {
    for token in ["--color-bg", "body {", "body.dark", ".button--primary"] {
        assert!(
            EMBEDDED_CSS.contains(token),
            "expected `{token}` in embedded CSS"
        );
    }
}
