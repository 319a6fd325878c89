//! Preview rendering: inline data URLs for uploaded images.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::intake::UploadedFile;

/// `data:<mime>;base64,<payload>` for the file's bytes.
pub fn data_url(file: &UploadedFile) -> String {
    format!("data:{};base64,{}", file.mime, STANDARD.encode(&file.bytes))
}

/// What the preview region currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PreviewState {
    #[default]
    Empty,
    Image { src: String },
    ReadFailed,
}

impl PreviewState {
    pub fn for_file(file: &UploadedFile) -> Self {
        PreviewState::Image {
            src: data_url(file),
        }
    }

    pub fn src(&self) -> Option<&str> {
        match self {
            PreviewState::Image { src } => Some(src.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_carries_mime_and_base64_payload() {
        let file = UploadedFile::with_mime("a.png", "image/png", vec![0, 1, 2]);
        assert_eq!(data_url(&file), "data:image/png;base64,AAEC");
    }

    #[test]
    fn only_images_expose_a_source() {
        let file = UploadedFile::with_mime("a.gif", "image/gif", b"GIF89a".to_vec());
        let state = PreviewState::for_file(&file);
        assert!(state.src().is_some_and(|src| src.starts_with("data:image/gif;base64,")));
        assert_eq!(PreviewState::ReadFailed.src(), None);
        assert_eq!(PreviewState::default().src(), None);
    }
}
