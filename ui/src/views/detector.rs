use std::sync::Arc;

use dioxus::html::{FileEngine, HasFileData};
use dioxus::prelude::*;

use crate::core::analysis::AnalysisClient;
use crate::core::config::AppConfig;
use crate::core::intake::FileHeader;
use crate::core::platform;
use crate::core::preview::PreviewState;
use crate::results::{ResultsPanel, ResultsState};
use crate::t;
use crate::views::pipeline::{self, DetectorStore, FlowOutcome};

/// Page state that has to outlive a remount of [`Detector`] (the shells key
/// their subtree by language). Provide it above the keyed element with
/// [`use_detector_state_provider`].
#[derive(Clone)]
pub struct DetectorState {
    pub results: Signal<ResultsState>,
    pub preview: Signal<PreviewState>,
    client: AnalysisClient,
}

/// Create the page state in the calling scope and share it through context.
/// Needs an [`AppConfig`] in context.
pub fn use_detector_state_provider() -> DetectorState {
    let config = use_context::<AppConfig>();
    let capacity = config.history_capacity;
    let results = use_signal(move || ResultsState::new(capacity));
    let preview = use_signal(PreviewState::default);
    use_context_provider(move || DetectorState {
        results,
        preview,
        client: AnalysisClient::new(config.endpoint),
    })
}

impl DetectorStore for DetectorState {
    fn with_results<R>(&self, f: impl FnOnce(&mut ResultsState) -> R) -> R {
        let mut results = self.results;
        let mut guard = results.write();
        f(&mut guard)
    }

    fn set_preview(&self, preview: PreviewState) {
        let mut signal = self.preview;
        signal.set(preview);
    }
}

/// The upload page: drop zone, preview, loader and result history.
#[component]
pub fn Detector() -> Element {
    let config = use_context::<AppConfig>();
    let state = use_context::<DetectorState>();
    let DetectorState { results, preview, .. } = state.clone();
    let mut drag_over = use_signal(|| false);

    let pipeline = Pipeline { config, state };

    let on_input = {
        let pipeline = pipeline.clone();
        move |evt: FormEvent| pipeline.intake(evt.files())
    };

    let on_drop = {
        let pipeline = pipeline.clone();
        move |evt: DragEvent| {
            evt.prevent_default();
            drag_over.set(false);
            pipeline.intake(evt.files());
        }
    };

    let on_demo = {
        let pipeline = pipeline.clone();
        move |_: MouseEvent| pipeline.demo()
    };

    let on_clear = move |_: MouseEvent| {
        let mut results = results;
        results.write().clear();
    };

    let drop_class = if drag_over() {
        "drop-area dragover"
    } else {
        "drop-area"
    };

    rsx! {
        section { class: "page page-detector",
            div {
                id: "dropArea",
                class: "{drop_class}",
                ondragover: move |evt: DragEvent| {
                    evt.prevent_default();
                    drag_over.set(true);
                },
                ondragleave: move |_| drag_over.set(false),
                ondrop: on_drop,

                p { class: "drop-area__hint", {t!("drop-hint")} }
                label { class: "button button--primary", r#for: "imageInput",
                    {t!("choose-file")}
                }
                input {
                    id: "imageInput",
                    class: "visually-hidden",
                    r#type: "file",
                    accept: "image/*",
                    onchange: on_input,
                }
                p { class: "drop-area__limits", {t!("intake-limits")} }
            }

            div { class: "page-detector__actions",
                button {
                    id: "demoBtn",
                    r#type: "button",
                    class: "button button--accent",
                    onclick: on_demo,
                    {t!("demo-button")}
                }
                button {
                    id: "clearBtn",
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: on_clear,
                    {t!("clear-button")}
                }
            }

            PreviewPanel { preview }
            ResultsPanel { results }
        }
    }
}

#[component]
fn PreviewPanel(preview: Signal<PreviewState>) -> Element {
    rsx! {
        div { id: "preview", class: "preview",
            match &*preview.read() {
                PreviewState::Empty => rsx! {},
                PreviewState::Image { src } => rsx! {
                    h3 { {t!("preview-heading")} }
                    img { class: "preview__image", src: "{src}", alt: t!("result-submitted-alt") }
                },
                PreviewState::ReadFailed => rsx! {
                    div { class: "error", {t!("preview-read-failed")} }
                },
            }
        }
    }
}

/// Shared handles for the intake → preview → analysis flow.
#[derive(Clone)]
struct Pipeline {
    config: AppConfig,
    state: DetectorState,
}

impl Pipeline {
    /// Runs on the root scope so a language remount does not cancel it.
    fn intake(&self, engine: Option<Arc<dyn FileEngine>>) {
        let Pipeline { config, state } = self.clone();
        spawn_forever(async move {
            let header = first_file_header(engine.as_deref()).await;
            let read = move |name: String| async move {
                match engine {
                    Some(engine) => engine.read_file(&name).await,
                    None => None,
                }
            };
            let outcome =
                pipeline::upload(&state, &state.client, config.max_upload_bytes, header, read).await;
            report(outcome);
        });
    }

    fn demo(&self) {
        let Pipeline { config, state } = self.clone();
        spawn_forever(async move {
            let outcome = pipeline::demo(&state, &state.client, &config.demo_image_url).await;
            report(outcome);
        });
    }
}

fn report(outcome: FlowOutcome) {
    match outcome {
        FlowOutcome::Rejected(err) => platform::alert(&err.alert_message()),
        FlowOutcome::ReadFailed => tracing::warn!("could not read selected file"),
        FlowOutcome::Superseded | FlowOutcome::Completed => {}
    }
}

/// Name and size of the first selected file, without reading its contents.
/// A size the engine cannot report counts as zero; `admit` re-checks the
/// real length after reading.
async fn first_file_header(engine: Option<&dyn FileEngine>) -> Option<FileHeader> {
    let engine = engine?;
    let name = engine.files().into_iter().next()?;
    let size = engine.file_size(&name).await.unwrap_or(0);
    Some(FileHeader { name, size })
}
