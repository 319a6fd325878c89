//! Results-side UI state: loader flag, visible region and history.
//!
//! Each analysis request takes a [`RequestTicket`]. Completions carrying an
//! older ticket than the latest one are dropped, so a slow early request can
//! never overwrite the outcome of a later one.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::analysis::{AnalysisError, AnalysisResponse};
use crate::results::history::{HistoryEntry, ResultHistory};
use crate::results::render::{
    connection_error_fragment, error_fragment, result_fragment, FragmentContext,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// What the submitted file looked like when its request started.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    pub file_name: String,
    pub preview_src: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResultsRegion {
    #[default]
    Blank,
    History,
    /// Markup of an inline error fragment.
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsState {
    history: ResultHistory,
    region: ResultsRegion,
    loading: bool,
    generation: u64,
}

impl ResultsState {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: ResultHistory::new(capacity),
            region: ResultsRegion::Blank,
            loading: false,
            generation: 0,
        }
    }

    pub fn history(&self) -> &ResultHistory {
        &self.history
    }

    pub fn region(&self) -> &ResultsRegion {
        &self.region
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Show the loader, blank the region and supersede any in-flight request.
    pub fn begin_request(&mut self) -> RequestTicket {
        self.generation += 1;
        self.loading = true;
        self.region = ResultsRegion::Blank;
        RequestTicket(self.generation)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Apply a finished request. Returns `false` if the ticket was stale and
    /// nothing changed.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        submission: &Submission,
        outcome: Result<AnalysisResponse, AnalysisError>,
        completed_at: &str,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, latest = self.generation, "dropping superseded completion");
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(AnalysisResponse::Success(report)) => {
                let id = format!("hist_{}", Uuid::new_v4().simple());
                let ctx = FragmentContext {
                    id: &id,
                    file_name: &submission.file_name,
                    timestamp: completed_at,
                    preview_src: &submission.preview_src,
                };
                let markup = result_fragment(&ctx, &report);
                if let Some(evicted) = self.history.push(HistoryEntry { id, report, markup }) {
                    debug!(id = %evicted.id, "history full, dropped oldest entry");
                }
                self.region = ResultsRegion::History;
            }
            Ok(AnalysisResponse::Rejected { message }) => {
                self.region = ResultsRegion::Error(error_fragment(&message));
            }
            Err(err) => {
                warn!("analysis failed: {err}");
                self.region = ResultsRegion::Error(connection_error_fragment());
            }
        }
        true
    }

    /// Empty history and region. The loader and in-flight requests are left
    /// alone.
    pub fn clear(&mut self) {
        self.history.clear();
        self.region = ResultsRegion::Blank;
    }

    /// Full markup of the results region.
    pub fn results_html(&self) -> String {
        match &self.region {
            ResultsRegion::Blank => String::new(),
            ResultsRegion::History => self.history.joined_markup(),
            ResultsRegion::Error(markup) => markup.clone(),
        }
    }
}

impl Default for ResultsState {
    fn default() -> Self {
        Self::new(crate::core::config::DEFAULT_HISTORY_CAPACITY)
    }
}
