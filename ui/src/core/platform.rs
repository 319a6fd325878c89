//! Platform glue: alerts, document classes and wall-clock labels.
//!
//! Both the web and the desktop renderers expose `document::eval`, so the
//! few imperative DOM touches go through small scripts instead of `web-sys`.

use dioxus::prelude::*;
use time::{macros::format_description, OffsetDateTime, UtcOffset};

/// Blocking browser alert with `message`.
pub fn alert(message: &str) {
    let payload = serde_json::to_string(message).unwrap_or_else(|_| "\"\"".to_string());
    let _ = document::eval(&format!("alert({payload});"));
}

/// Add or remove the `dark` class on `<body>`.
pub fn apply_dark_class(dark: bool) {
    let _ = document::eval(&format!("document.body.classList.toggle('dark', {dark});"));
}

/// Local time label for history entries, e.g. `2025-03-14 09:26:53`.
///
/// The local offset cannot always be read (the `time` crate refuses on
/// multithreaded Linux processes); the label then carries a `UTC` suffix.
pub fn timestamp_label() -> String {
    label_at(OffsetDateTime::now_utc(), UtcOffset::current_local_offset())
}

fn label_at<E: std::fmt::Display>(now: OffsetDateTime, local: Result<UtcOffset, E>) -> String {
    match local {
        Ok(offset) => format_timestamp(now.to_offset(offset)),
        Err(err) => {
            tracing::debug!("local offset unavailable ({err}), labelling history in UTC");
            format!("{} UTC", format_timestamp(now))
        }
    }
}

pub(crate) fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(&format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
    .unwrap_or_else(|_| "—".to_string())
}
