use dioxus::prelude::*;
use tracing::{info, warn};

use crate::core::platform;
use crate::results::{export_report, ResultsState};
use crate::t;

/// Forwards clicks on `[data-history-id]` buttons inside `#results` to Rust.
/// The fragments are raw markup, so their buttons cannot carry Dioxus
/// handlers themselves.
const DOWNLOAD_DELEGATE_JS: &str = r#"
let region = document.getElementById('results');
while (!region) {
    await new Promise((resolve) => requestAnimationFrame(resolve));
    region = document.getElementById('results');
}
region.addEventListener('click', (event) => {
    const button = event.target.closest('[data-history-id]');
    if (button && region.contains(button)) {
        dioxus.send(button.dataset.historyId);
    }
});
"#;

#[component]
pub fn ResultsPanel(results: Signal<ResultsState>) -> Element {
    use_future(move || async move {
        let mut delegate = document::eval(DOWNLOAD_DELEGATE_JS);
        while let Ok(history_id) = delegate.recv::<String>().await {
            let report = results
                .read()
                .history()
                .get(&history_id)
                .map(|entry| entry.report.clone());
            let Some(report) = report else {
                warn!(%history_id, "download requested for an evicted entry");
                continue;
            };
            match export_report(&report).await {
                Ok(Some(path)) => info!(%path, "result card saved"),
                Ok(None) => {}
                Err(err) => {
                    warn!("export failed: {err}");
                    platform::alert(&t!("export-failed"));
                }
            }
        }
    });

    let html = results.read().results_html();
    let loader_style = if results.read().is_loading() {
        "display:block"
    } else {
        "display:none"
    };

    rsx! {
        section { class: "results-card",
            h2 { class: "results-card__header", {t!("results-heading")} }
            div {
                id: "loader",
                class: "loader",
                style: "{loader_style}",
                span { class: "loader__spinner", aria_hidden: "true" }
                span { class: "loader__text", {t!("loader-text")} }
            }
            div { id: "results", class: "results", dangerous_inner_html: "{html}" }
        }
    }
}
