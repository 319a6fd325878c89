//! "Download result" export: a fixed 400×250 PNG card for one report.
//!
//! The card is laid out once as SVG. On the web it is rasterised through an
//! offscreen canvas and handed to the browser as a download; on desktop it
//! is rendered with resvg and written to the per-user exports directory.

use std::collections::VecDeque;

use thiserror::Error;

use crate::core::analysis::AnalysisReport;
use crate::core::format::format_confidence;
use crate::results::utils::escape_html;

pub const EXPORT_FILE_NAME: &str = "DeepDetect_Result.png";
pub const EXPORT_WIDTH: u32 = 400;
pub const EXPORT_HEIGHT: u32 = 250;

const FIRST_LINE_CHARS: usize = 38;
const SECOND_LINE_CHARS: usize = 37;
const ELLIPSIS: char = '…';

const BACKGROUND: &str = "#f9f9fc";
const FAKE_COLOR: &str = "#E13D30";
const REAL_COLOR: &str = "#1E9324";
const BODY_COLOR: &str = "#333333";
const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unable to render result card: {0}")]
    Render(String),
    #[error("unable to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to determine export directory")]
    NoExportDir,
    #[error("{0}")]
    Browser(&'static str),
}

/// Render `report` and deliver it. Returns the saved path on desktop, `None`
/// when the browser took over the download.
pub async fn export_report(report: &AnalysisReport) -> Result<Option<String>, ExportError> {
    let svg = svg_card(report);
    let png = render_png(&svg).await?;
    let delivered = download_bytes(EXPORT_FILE_NAME, "image/png", png).await?;
    tracing::info!(path = ?delivered, "result exported");
    Ok(delivered)
}

/// Split the explanation into at most two lines of 38 and 37 characters.
///
/// Lines break between words; a word wider than a line is cut. If text is
/// left over after the second line, that line ends with `…`.
pub fn explanation_lines(text: &str) -> Vec<String> {
    let mut words: VecDeque<String> = text.split_whitespace().map(str::to_string).collect();
    let mut lines = Vec::new();

    for width in [FIRST_LINE_CHARS, SECOND_LINE_CHARS] {
        let mut line = String::new();
        let mut line_len = 0;

        while let Some(word) = words.pop_front() {
            let word_len = word.chars().count();
            if line_len == 0 && word_len > width {
                let (head, tail) = split_at_char(&word, width);
                line.push_str(head);
                line_len = width;
                words.push_front(tail.to_string());
                break;
            }
            let needed = if line_len == 0 { word_len } else { line_len + 1 + word_len };
            if needed > width {
                words.push_front(word);
                break;
            }
            if line_len > 0 {
                line.push(' ');
            }
            line.push_str(&word);
            line_len = needed;
        }

        if line_len == 0 {
            break;
        }
        lines.push(line);
    }

    if !words.is_empty() {
        if let Some(last) = lines.last_mut() {
            let limit = SECOND_LINE_CHARS.min(FIRST_LINE_CHARS);
            if last.chars().count() >= limit {
                let keep: String = last.chars().take(limit - 1).collect();
                *last = keep.trim_end().to_string();
            }
            last.push(ELLIPSIS);
        }
    }

    lines
}

fn split_at_char(word: &str, chars: usize) -> (&str, &str) {
    let idx = word
        .char_indices()
        .nth(chars)
        .map(|(idx, _)| idx)
        .unwrap_or(word.len());
    word.split_at(idx)
}

/// SVG layout of the export card.
pub fn svg_card(report: &AnalysisReport) -> String {
    let title_color = if report.is_ai_generated() {
        FAKE_COLOR
    } else {
        REAL_COLOR
    };
    let label = escape_html(&report.result);
    let confidence = format_confidence(report.confidence);

    let mut svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{EXPORT_WIDTH}' height='{EXPORT_HEIGHT}' viewBox='0 0 {EXPORT_WIDTH} {EXPORT_HEIGHT}'>\n\
         \x20 <rect width='{EXPORT_WIDTH}' height='{EXPORT_HEIGHT}' fill='{BACKGROUND}'/>\n\
         \x20 <text x='20' y='40' fill='{title_color}' font-family='{FONT_FAMILY}' font-size='24' font-weight='bold'>Result: {label}</text>\n\
         \x20 <text x='20' y='80' fill='{BODY_COLOR}' font-family='{FONT_FAMILY}' font-size='18'>Confidence: {confidence}</text>\n\
         \x20 <text x='20' y='120' fill='{BODY_COLOR}' font-family='{FONT_FAMILY}' font-size='18'>Explanation:</text>\n"
    );

    for (idx, line) in explanation_lines(&report.explanation).iter().enumerate() {
        let y = 150 + idx * 30;
        let line = escape_html(line);
        svg.push_str(&format!(
            "  <text x='20' y='{y}' fill='{BODY_COLOR}' font-family='{FONT_FAMILY}' font-size='18'>{line}</text>\n"
        ));
    }

    svg.push_str("</svg>");
    svg
}

async fn render_png(svg: &str) -> Result<Vec<u8>, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        render_png_web(svg).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        render_png_native(svg)
    }
}

#[cfg(not(target_arch = "wasm32"))]
static FONT_DB: once_cell::sync::Lazy<std::sync::Arc<usvg::fontdb::Database>> =
    once_cell::sync::Lazy::new(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts for export");
        std::sync::Arc::new(db)
    });

#[cfg(not(target_arch = "wasm32"))]
fn render_png_native(svg: &str) -> Result<Vec<u8>, ExportError> {
    let options = usvg::Options {
        fontdb: FONT_DB.clone(),
        ..usvg::Options::default()
    };
    let tree =
        usvg::Tree::from_str(svg, &options).map_err(|err| ExportError::Render(err.to_string()))?;

    let mut pixmap = tiny_skia::Pixmap::new(EXPORT_WIDTH, EXPORT_HEIGHT)
        .ok_or_else(|| ExportError::Render("empty canvas".to_string()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|err| ExportError::Render(err.to_string()))
}

#[cfg(target_arch = "wasm32")]
async fn render_png_web(svg: &str) -> Result<Vec<u8>, ExportError> {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url,
    };

    let opts = BlobPropertyBag::new();
    opts.set_type("image/svg+xml");
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(svg));
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| ExportError::Browser("Unable to build SVG blob"))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| ExportError::Browser("Unable to create SVG URL"))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(ExportError::Browser("Document unavailable"))?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| ExportError::Browser("Unable to create canvas"))?
        .dyn_into()
        .map_err(|_| ExportError::Browser("Canvas cast failed"))?;
    canvas.set_width(EXPORT_WIDTH);
    canvas.set_height(EXPORT_HEIGHT);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| ExportError::Browser("Canvas context unavailable"))?
        .ok_or(ExportError::Browser("Canvas context missing"))?
        .dyn_into()
        .map_err(|_| ExportError::Browser("Context cast failed"))?;

    let image = HtmlImageElement::new().map_err(|_| ExportError::Browser("Unable to create image"))?;
    image.set_src(&url);
    let decoded = JsFuture::from(image.decode()).await;
    if decoded.is_err() {
        Url::revoke_object_url(&url).ok();
        return Err(ExportError::Browser("Image decode failed"));
    }

    context
        .draw_image_with_html_image_element(&image, 0.0, 0.0)
        .map_err(|_| ExportError::Browser("Unable to draw image"))?;

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| ExportError::Browser("Unable to serialise canvas"))?;
    Url::revoke_object_url(&url).ok();

    let payload = data_url
        .split(',')
        .nth(1)
        .ok_or(ExportError::Browser("Malformed data URL"))?;
    STANDARD
        .decode(payload)
        .map_err(|_| ExportError::Browser("PNG decode failed"))
}

async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| ExportError::Browser("Failed to create blob"))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| ExportError::Browser("Unable to create download"))?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(ExportError::Browser("Document unavailable"))?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| ExportError::Browser("Unable to create anchor"))?
            .dyn_into()
            .map_err(|_| ExportError::Browser("Anchor cast failed"))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or(ExportError::Browser("Missing body"))?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = mime;
        let dir = export_dir()?;
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(filename);
        std::fs::write(&path, &bytes)?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn export_dir() -> Result<std::path::PathBuf, ExportError> {
    let dirs = directories::ProjectDirs::from("com", "DeepDetect", "DeepDetect")
        .ok_or(ExportError::NoExportDir)?;
    Ok(dirs.data_dir().join("exports"))
}
