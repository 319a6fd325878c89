#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::path::PathBuf;

use dioxus::desktop::tao::{dpi::LogicalSize, window::WindowBuilder};
use dioxus::desktop::Config;
use dioxus::prelude::*;

use ui::components::AppHeader;
use ui::core::config::AppConfig;
use ui::core::theme::ThemeMode;
use ui::i18n;
use ui::views::{use_detector_state_provider, Detector};

// Shared theme, always inlined so packaged builds need no asset folder.
const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn main() {
    let resource_dir = resolve_resource_dir();

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title(format!("DeepDetect – v{}", env!("CARGO_PKG_VERSION")))
                        .with_inner_size(LogicalSize::new(960.0, 900.0)),
                )
                .with_resource_directory(resource_dir),
        )
        .launch(App);
}

#[component]
fn App() -> Element {
    i18n::init();

    // Read once; DEEPDETECT_ENDPOINT in the process env wins over the baked value.
    use_context_provider(AppConfig::from_env);
    use_context_provider(|| Signal::new(ThemeMode::default()));
    // History, preview and in-flight requests survive the language remount below.
    use_detector_state_provider();

    let lang_code = use_signal(i18n::current_language);
    use_context_provider(|| lang_code);

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        div {
            key: "{lang_code()}",
            class: "app",
            AppHeader {}
            main { class: "app__main", Detector {} }
        }
    }
}

fn resolve_resource_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
    }

    #[cfg(not(debug_assertions))]
    {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("assets")))
            .unwrap_or_else(|| PathBuf::from("assets"))
    }
}
