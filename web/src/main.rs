use dioxus::prelude::*;

use ui::components::AppHeader;
use ui::core::config::AppConfig;
use ui::core::theme::ThemeMode;
use ui::i18n;
use ui::views::{use_detector_state_provider, Detector};

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    i18n::init();

    use_context_provider(AppConfig::from_env);
    use_context_provider(|| Signal::new(ThemeMode::default()));
    // History, preview and in-flight requests survive the language remount below.
    use_detector_state_provider();

    // AppHeader writes the selected language here.
    let lang_code = use_signal(i18n::current_language);
    use_context_provider(|| lang_code);

    rsx! {
        document::Title { "DeepDetect" }
        document::Style { "{MAIN_CSS_INLINE}" }

        // Keyed by language so every string is looked up again on switch.
        div {
            key: "{lang_code()}",
            class: "app",
            AppHeader {}
            main { class: "app__main", Detector {} }
        }
    }
}
