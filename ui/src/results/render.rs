//! Markup fragments for the results region.

use crate::core::analysis::AnalysisReport;
use crate::core::format::{confidence_bar_width, format_confidence};
use crate::results::utils::escape_html;
use crate::t;

/// Everything a result fragment shows besides the report itself.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentContext<'a> {
    pub id: &'a str,
    pub file_name: &'a str,
    pub timestamp: &'a str,
    /// Data URL of the image that was submitted (may be empty).
    pub preview_src: &'a str,
}

fn verdict_modifier(report: &AnalysisReport) -> &'static str {
    if report.is_ai_generated() {
        "fake"
    } else {
        "real"
    }
}

/// Collapsible block for one successful analysis.
pub fn result_fragment(ctx: &FragmentContext<'_>, report: &AnalysisReport) -> String {
    let modifier = verdict_modifier(report);
    let id = escape_html(ctx.id);
    let preview = escape_html(ctx.preview_src);
    let label = escape_html(&report.result);
    let file_name = escape_html(ctx.file_name);
    let timestamp = escape_html(ctx.timestamp);
    let explanation = escape_html(&report.explanation);
    let heatmap = escape_html(&report.heatmap);
    let confidence = format_confidence(report.confidence);
    let width = confidence_bar_width(report.confidence);

    let toggle = t!("result-toggle");
    let submitted_alt = t!("result-submitted-alt");
    let file_label = t!("result-file");
    let time_label = t!("result-time");
    let confidence_label = t!("result-confidence");
    let explanation_label = t!("result-explanation");
    let heatmap_label = t!("result-heatmap");
    let heatmap_hint = escape_html(&t!("result-heatmap-hint"));
    let heatmap_alt = t!("result-heatmap-alt");
    let download = t!("download-result");

    format!(
        r#"<div id="{id}" class="history-item">
<div class="history-header history-toggle" onclick="this.parentNode.classList.toggle('history-collapse')">{toggle}</div>
<div class="history-body">
<img class="history-thumb" src="{preview}" alt="{submitted_alt}">
<h2 class="result-label result-label--{modifier}">{label}</h2>
<p><strong>{file_label}</strong> {file_name}</p>
<p><strong>{time_label}</strong> {timestamp}</p>
<p><strong>{confidence_label}</strong> <span class="confidence-text">{confidence}</span></p>
<div class="conf-bar-wrap"><div class="conf-bar-inner conf-bar-{modifier}" style="width:{width}%;"></div></div>
<p><strong>{explanation_label}</strong> {explanation}</p>
<div class="heatmap">
<h4>{heatmap_label} <span class="heatmap-hint" title="{heatmap_hint}">ℹ️</span></h4>
<img class="heatmap-image" src="{heatmap}" alt="{heatmap_alt}">
</div>
<button type="button" class="download-btn" data-history-id="{id}">{download}</button>
</div>
</div>"#
    )
}

/// Inline error block replacing the results region.
pub fn error_fragment(message: &str) -> String {
    format!(r#"<div class="error">{}</div>"#, escape_html(message))
}

/// Fixed message for transport and parse failures.
pub fn connection_error_fragment() -> String {
    error_fragment(&t!("error-backend-unreachable"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::AI_GENERATED_LABEL;
    use crate::i18n;

    fn report(result: &str, confidence: f64) -> AnalysisReport {
        AnalysisReport {
            result: result.into(),
            confidence,
            explanation: "looks natural".into(),
            heatmap: "data:image/png;base64,AAA".into(),
        }
    }

    fn ctx() -> FragmentContext<'static> {
        FragmentContext {
            id: "hist_1",
            file_name: "cat.png",
            timestamp: "2025-01-01 10:00:00",
            preview_src: "data:image/png;base64,BBB",
        }
    }

    #[test]
    fn confidence_text_and_bar_width() {
        i18n::init();
        let html = result_fragment(&ctx(), &report("Real", 0.8732));
        assert!(html.contains(r#"<span class="confidence-text">87.32%</span>"#));
        assert!(html.contains("width:87%;"));
    }

    #[test]
    fn verdict_selects_styling() {
        i18n::init();
        let real = result_fragment(&ctx(), &report("Real", 0.6));
        assert!(real.contains("result-label--real"));
        assert!(real.contains("conf-bar-real"));

        let fake = result_fragment(&ctx(), &report(AI_GENERATED_LABEL, 0.6));
        assert!(fake.contains("result-label--fake"));
        assert!(fake.contains("conf-bar-fake"));
    }

    #[test]
    fn fragment_embeds_sources_and_download_hook() {
        i18n::init();
        let html = result_fragment(&ctx(), &report("Real", 0.5));
        assert!(html.starts_with(r#"<div id="hist_1" class="history-item">"#));
        assert!(html.contains(r#"src="data:image/png;base64,BBB""#));
        assert!(html.contains(r#"src="data:image/png;base64,AAA""#));
        assert!(html.contains("cat.png"));
        assert!(html.contains("2025-01-01 10:00:00"));
        assert!(html.contains("looks natural"));
        assert!(html.contains(r#"data-history-id="hist_1""#));
    }

    #[test]
    fn backend_text_is_escaped() {
        i18n::init();
        let mut hostile = report("<b>Real</b>", 0.5);
        hostile.explanation = "<script>alert(1)</script>".into();
        let html = result_fragment(&ctx(), &hostile);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;b&gt;Real&lt;/b&gt;"));
    }

    #[test]
    fn error_fragment_wraps_message() {
        assert_eq!(error_fragment("bad image"), r#"<div class="error">bad image</div>"#);
    }

    #[test]
    fn connection_error_uses_fixed_text() {
        i18n::init();
        let html = connection_error_fragment();
        assert!(html.contains(&escape_html(&t!("error-backend-unreachable"))));
        assert!(html.starts_with(r#"<div class="error">"#));
    }
}
