//! Locale bundles must mirror the fallback (en-US) key set, with no key
//! defined twice in one file.

use std::collections::BTreeSet;

const EN_US: &str = include_str!("../i18n/en-US/deepdetect-ui.ftl");
const ES_ES: &str = include_str!("../i18n/es-ES/deepdetect-ui.ftl");

/// Message ids in definition order, duplicates included.
fn defined_ids(ftl: &str) -> Vec<&str> {
    ftl.lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !line.starts_with('#') && !line.starts_with(char::is_whitespace))
        .filter_map(|line| line.split_once('=').map(|(id, _)| id.trim()))
        .filter(|id| !id.is_empty() && !id.contains(char::is_whitespace))
        .collect()
}

fn assert_unique(locale: &str, ftl: &str) -> BTreeSet<String> {
    let mut seen = BTreeSet::new();
    let mut dups = Vec::new();
    for id in defined_ids(ftl) {
        if !seen.insert(id.to_string()) {
            dups.push(id);
        }
    }
    assert!(dups.is_empty(), "{locale} defines twice: {}", dups.join(", "));
    seen
}

#[test]
fn spanish_covers_every_fallback_key() {
    let fallback = assert_unique("en-US", EN_US);
    let spanish = assert_unique("es-ES", ES_ES);

    let missing: Vec<_> = fallback.difference(&spanish).cloned().collect();
    assert!(
        missing.is_empty(),
        "es-ES is missing {} key(s): {}",
        missing.len(),
        missing.join(", ")
    );

    let extra: Vec<_> = spanish.difference(&fallback).cloned().collect();
    assert!(extra.is_empty(), "es-ES defines keys en-US lacks: {}", extra.join(", "));
}

#[test]
fn alert_messages_are_present() {
    let fallback = assert_unique("en-US", EN_US);
    for key in ["alert-no-file", "alert-not-image", "alert-too-large", "error-backend-unreachable"] {
        assert!(fallback.contains(key), "missing {key}");
    }
}
