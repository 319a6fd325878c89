//! The intake → preview → analysis sequence, free of DOM and signal types
//! so it can be driven directly in tests.
//!
//! Every step that writes a display region first checks that its ticket is
//! still the latest one; a superseded run stops without touching anything.

use std::future::Future;

use tracing::{debug, info};

use crate::core::analysis::{AnalysisClient, AnalysisError, AnalysisResponse, DEMO_FILE_NAME};
use crate::core::intake::{self, FileHeader, IntakeError, UploadedFile};
use crate::core::platform;
use crate::core::preview::PreviewState;
use crate::results::{RequestTicket, ResultsState, Submission};

/// Where the flow reads and writes page state.
pub(crate) trait DetectorStore {
    fn with_results<R>(&self, f: impl FnOnce(&mut ResultsState) -> R) -> R;
    fn set_preview(&self, preview: PreviewState);
}

/// The remote side of the flow.
pub(crate) trait Analyzer {
    async fn analyze(&self, file: &UploadedFile) -> Result<AnalysisResponse, AnalysisError>;
    async fn fetch_demo(&self, url: &str) -> Result<UploadedFile, AnalysisError>;
}

impl Analyzer for AnalysisClient {
    async fn analyze(&self, file: &UploadedFile) -> Result<AnalysisResponse, AnalysisError> {
        AnalysisClient::analyze(self, file).await
    }

    async fn fetch_demo(&self, url: &str) -> Result<UploadedFile, AnalysisError> {
        AnalysisClient::fetch_demo(self, url).await
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum FlowOutcome {
    /// Turned away by intake; nothing was shown or sent.
    Rejected(IntakeError),
    /// Bytes could not be read; the preview shows the failure.
    ReadFailed,
    /// A newer submission took over before this one wrote anything more.
    Superseded,
    /// The results region shows this submission's outcome.
    Completed,
}

/// Screen, read, validate and submit one picked or dropped file.
///
/// `read` is only called once the name and size have passed screening.
pub(crate) async fn upload<S, A, F, Fut>(
    store: &S,
    analyzer: &A,
    max_bytes: u64,
    header: Option<FileHeader>,
    read: F,
) -> FlowOutcome
where
    S: DetectorStore,
    A: Analyzer,
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Option<Vec<u8>>>,
{
    let name = match intake::screen(header.as_ref(), max_bytes) {
        Ok(header) => header.name.clone(),
        Err(err) => {
            info!("upload rejected before reading: {err}");
            return FlowOutcome::Rejected(err);
        }
    };

    let Some(bytes) = read(name.clone()).await else {
        store.set_preview(PreviewState::ReadFailed);
        return FlowOutcome::ReadFailed;
    };

    let file = match intake::admit(Some(UploadedFile::from_bytes(name, bytes)), max_bytes) {
        Ok(file) => file,
        Err(err) => {
            info!("upload rejected: {err}");
            return FlowOutcome::Rejected(err);
        }
    };

    let ticket = store.with_results(ResultsState::begin_request);
    dispatch(store, analyzer, file, ticket).await
}

/// Fetch the demo image and submit it. The demo skips intake validation.
pub(crate) async fn demo<S: DetectorStore, A: Analyzer>(
    store: &S,
    analyzer: &A,
    url: &str,
) -> FlowOutcome {
    let ticket = store.with_results(ResultsState::begin_request);
    match analyzer.fetch_demo(url).await {
        Ok(file) => dispatch(store, analyzer, file, ticket).await,
        Err(err) => {
            let submission = Submission {
                file_name: DEMO_FILE_NAME.to_string(),
                ..Submission::default()
            };
            finish(store, ticket, &submission, Err(err))
        }
    }
}

/// Preview first, then the analysis request.
async fn dispatch<S: DetectorStore, A: Analyzer>(
    store: &S,
    analyzer: &A,
    file: UploadedFile,
    ticket: RequestTicket,
) -> FlowOutcome {
    if !store.with_results(|results| results.is_current(ticket)) {
        debug!(file = %file.name, "submission superseded before preview");
        return FlowOutcome::Superseded;
    }

    let preview = PreviewState::for_file(&file);
    let submission = Submission {
        file_name: file.name.clone(),
        preview_src: preview.src().unwrap_or_default().to_string(),
    };
    store.set_preview(preview);

    let outcome = analyzer.analyze(&file).await;
    finish(store, ticket, &submission, outcome)
}

fn finish<S: DetectorStore>(
    store: &S,
    ticket: RequestTicket,
    submission: &Submission,
    outcome: Result<AnalysisResponse, AnalysisError>,
) -> FlowOutcome {
    let completed_at = platform::timestamp_label();
    let applied =
        store.with_results(|results| results.complete(ticket, submission, outcome, &completed_at));
    if applied {
        FlowOutcome::Completed
    } else {
        info!(file = %submission.file_name, "result superseded by a newer upload");
        FlowOutcome::Superseded
    }
}
