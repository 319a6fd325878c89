#![cfg(test)]
/*!
Selector lint for the shared theme.

The result fragments are raw HTML strings built in `ui::results`, so the
compiler cannot tell us when a class they emit loses its style. This list
mirrors the classes used by the header, the intake area and the fragments.
Rename a class in Rust, rename it here and in `ui/assets/theme/main.css`.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    "body.dark",
    ".page {",
    ".visually-hidden",
    // Header
    ".navbar__inner",
    ".navbar__brand-mark",
    ".navbar__locale",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--accent",
    ".button--ghost",
    // Intake, preview, loader
    ".drop-area",
    ".dragover",
    ".preview",
    ".loader",
    // Results region
    ".results-card",
    ".results-card__header",
    ".results {",
    ".history-item",
    ".history-header",
    ".history-body",
    ".history-collapse",
    ".history-thumb",
    ".result-label--fake",
    ".result-label--real",
    ".confidence-text",
    ".conf-bar-wrap",
    ".conf-bar-inner",
    ".conf-bar-fake",
    ".conf-bar-real",
    ".heatmap-image",
    ".download-btn",
    ".error",
    // Responsive block
    "@media (max-width: 720px)",
];

#[test]
fn theme_contains_required_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !THEME_CSS.contains(sel))
        .collect();

    assert!(
        missing.is_empty(),
        "missing {} selector(s) in the shared theme:\n{}",
        missing.len(),
        missing.join("\n")
    );
}

#[test]
fn theme_not_trivially_small() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "theme is unexpectedly small ({non_ws_len} non-whitespace chars); truncated or moved?"
    );
}

#[test]
fn collapse_rule_hides_the_body() {
    let start = THEME_CSS
        .find(".history-collapse .history-body")
        .expect("collapse rule present");
    let block = &THEME_CSS[start..];
    let end = block.find('}').unwrap_or(block.len());
    assert!(block[..end].contains("display: none"));
}
