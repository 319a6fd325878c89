mod detector;
mod pipeline;

pub use detector::{use_detector_state_provider, Detector, DetectorState};
