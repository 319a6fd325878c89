mod export;
pub use export::{explanation_lines, export_report, svg_card, ExportError, EXPORT_FILE_NAME};

mod history;
pub use history::{HistoryEntry, ResultHistory, FRAGMENT_SEPARATOR};

mod panel;
pub use panel::ResultsPanel;

mod render;
pub use render::{connection_error_fragment, error_fragment, result_fragment, FragmentContext};

mod state;
pub use state::{RequestTicket, ResultsRegion, ResultsState, Submission};

mod utils;
