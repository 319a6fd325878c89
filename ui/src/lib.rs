//! Shared UI crate for DeepDetect: upload intake, analysis client, result
//! history and export. The platform crates only wire up the window/page.

pub mod core;
pub mod i18n;
pub mod results;
pub mod views;

pub mod components {
    // Brand, locale switcher and dark mode toggle (components/app_header.rs)
    pub mod app_header;
    pub use app_header::AppHeader;
}

#[cfg(test)]
mod tests {
    mod i18n_completeness;
}
