//! File intake: turning a picked or dropped file into a validated upload.

use thiserror::Error;

/// Fallback when neither the extension nor the leading bytes identify a type.
pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// Reasons an incoming file is turned away before preview/analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("no file selected")]
    Missing,
    #[error("{mime} is not an image type")]
    NotAnImage { mime: String },
    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },
}

impl IntakeError {
    /// Localized alert text shown to the user.
    pub fn alert_message(&self) -> String {
        match self {
            IntakeError::Missing => crate::t!("alert-no-file"),
            IntakeError::NotAnImage { .. } => crate::t!("alert-not-image"),
            IntakeError::TooLarge { .. } => crate::t!("alert-too-large"),
        }
    }
}

/// A user-supplied (or demo-fetched) image, held only until preview and
/// analysis have been started.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Build from raw bytes, deriving the MIME type from the name or content.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = detect_mime(&name, &bytes).to_string();
        Self { name, mime, bytes }
    }

    /// Build with an explicit MIME type (used for the demo image).
    pub fn with_mime(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Guess the MIME type: extension first, then magic bytes.
pub fn detect_mime(name: &str, bytes: &[u8]) -> &'static str {
    mime_from_name(name)
        .or_else(|| sniff_mime(bytes))
        .unwrap_or(UNKNOWN_MIME)
}

/// MIME type implied by the file extension, if the extension is known.
pub fn mime_from_name(name: &str) -> Option<&'static str> {
    mime_guess::from_path(name).first_raw()
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes)
        .ok()
        .map(|format| format.to_mime_type())
}

/// What is known about a picked file before its contents are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub name: String,
    pub size: u64,
}

/// Checks that need no file contents, in the same order as [`validate`].
///
/// A name without a known extension passes the type check here; its type is
/// sniffed from the bytes and checked again by [`admit`] once read.
pub fn screen(header: Option<&FileHeader>, max_bytes: u64) -> Result<&FileHeader, IntakeError> {
    let header = header.ok_or(IntakeError::Missing)?;

    if let Some(mime) = mime_from_name(&header.name) {
        if !mime.starts_with("image/") {
            return Err(IntakeError::NotAnImage {
                mime: mime.to_string(),
            });
        }
    }

    if header.size > max_bytes {
        return Err(IntakeError::TooLarge {
            size: header.size,
            limit: max_bytes,
        });
    }

    Ok(header)
}

/// Check a candidate upload. Order: presence, type, size.
pub fn validate(file: Option<&UploadedFile>, max_bytes: u64) -> Result<&UploadedFile, IntakeError> {
    let file = file.ok_or(IntakeError::Missing)?;

    if !file.mime.starts_with("image/") {
        return Err(IntakeError::NotAnImage {
            mime: file.mime.clone(),
        });
    }

    let size = file.size();
    if size > max_bytes {
        return Err(IntakeError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    Ok(file)
}

/// Validate and take ownership of the file for preview and analysis.
///
/// A rejected file is dropped here, so callers have nothing to dispatch.
pub fn admit(file: Option<UploadedFile>, max_bytes: u64) -> Result<UploadedFile, IntakeError> {
    validate(file.as_ref(), max_bytes)?;
    let file = file.ok_or(IntakeError::Missing)?;
    tracing::info!(name = %file.name, mime = %file.mime, size = file.size(), "file accepted");
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_MAX_UPLOAD_BYTES;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

    fn file(mime: &str, size: usize) -> UploadedFile {
        UploadedFile::with_mime("photo", mime, vec![0; size])
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(detect_mime("cat.JPG", &[]), "image/jpeg");
        assert_eq!(detect_mime("cat.png", &[]), "image/png");
        assert_eq!(detect_mime("notes", b"hello"), UNKNOWN_MIME);
    }

    #[test]
    fn mime_sniffed_when_extension_is_missing() {
        assert_eq!(detect_mime("upload", PNG_MAGIC), "image/png");
    }

    #[test]
    fn image_types_outside_the_decoder_set_are_recognised() {
        assert_eq!(detect_mime("logo.svg", b"<svg/>"), "image/svg+xml");
        assert!(detect_mime("IMG_0001.HEIC", &[]).starts_with("image/"));
        let svg = UploadedFile::from_bytes("logo.svg", b"<svg/>".to_vec());
        assert!(admit(Some(svg), DEFAULT_MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn extension_wins_over_image_bytes() {
        assert_eq!(detect_mime("notes.txt", PNG_MAGIC), "text/plain");
        let disguised = UploadedFile::from_bytes("notes.txt", PNG_MAGIC.to_vec());
        assert!(matches!(
            admit(Some(disguised), DEFAULT_MAX_UPLOAD_BYTES),
            Err(IntakeError::NotAnImage { .. })
        ));
    }

    fn header(name: &str, size: u64) -> FileHeader {
        FileHeader {
            name: name.to_string(),
            size,
        }
    }

    #[test]
    fn screening_rejects_before_reading() {
        let limit = DEFAULT_MAX_UPLOAD_BYTES;
        assert_eq!(screen(None, limit), Err(IntakeError::Missing));
        assert_eq!(
            screen(Some(&header("report.pdf", 10)), limit),
            Err(IntakeError::NotAnImage {
                mime: "application/pdf".into()
            })
        );
        assert_eq!(
            screen(Some(&header("huge.png", limit + 1)), limit),
            Err(IntakeError::TooLarge {
                size: limit + 1,
                limit
            })
        );
        assert!(matches!(
            screen(Some(&header("huge.txt", limit + 1)), limit),
            Err(IntakeError::NotAnImage { .. })
        ));
    }

    #[test]
    fn screening_defers_unknown_extensions_to_the_bytes() {
        let limit = DEFAULT_MAX_UPLOAD_BYTES;
        assert!(screen(Some(&header("upload", 100)), limit).is_ok());
        assert!(screen(Some(&header("cat.png", limit)), limit).is_ok());
    }

    #[test]
    fn missing_file_is_rejected() {
        assert_eq!(
            validate(None, DEFAULT_MAX_UPLOAD_BYTES),
            Err(IntakeError::Missing)
        );
    }

    #[test]
    fn non_image_is_rejected() {
        let outcome = admit(Some(file("application/pdf", 10)), DEFAULT_MAX_UPLOAD_BYTES);
        assert!(matches!(outcome, Err(IntakeError::NotAnImage { .. })));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let limit = DEFAULT_MAX_UPLOAD_BYTES;
        let outcome = admit(Some(file("image/png", limit as usize + 1)), limit);
        assert_eq!(
            outcome,
            Err(IntakeError::TooLarge {
                size: limit + 1,
                limit,
            })
        );
    }

    #[test]
    fn type_check_runs_before_size_check() {
        let big_text = file("text/plain", DEFAULT_MAX_UPLOAD_BYTES as usize + 1);
        assert!(matches!(
            validate(Some(&big_text), DEFAULT_MAX_UPLOAD_BYTES),
            Err(IntakeError::NotAnImage { .. })
        ));
    }

    #[test]
    fn file_at_the_limit_is_admitted() {
        let admitted = admit(Some(file("image/webp", 1024)), 1024).unwrap();
        assert_eq!(admitted.name, "photo");
        assert_eq!(admitted.size(), 1024);
    }
}
