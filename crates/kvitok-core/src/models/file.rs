//! Receipt file handle and format classification.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Kind of document a submitted file was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Photograph or scan; goes through QR detection and OCR.
    Image,
    /// PDF document; text is pulled page by page.
    Pdf,
    /// RFC822 email container; exploded into attachments first.
    Email,
    /// Plain text, e.g. a receipt typed into an email body.
    Text,
}

/// An ownership-transferred handle to raw file bytes plus its classified kind.
///
/// Created when a caller submits a file and consumed exactly once by the
/// processing pipeline.
#[derive(Debug, Clone)]
pub struct ReceiptFile {
    /// Raw file bytes.
    pub data: Vec<u8>,
    /// Classified document kind.
    pub kind: FileKind,
    /// Original file name, if known.
    pub file_name: Option<String>,
    /// Rendered preview reference for UI consumers, if one was produced.
    pub preview: Option<PathBuf>,
}

impl ReceiptFile {
    /// Wrap raw bytes, classifying them from the declared media type and
    /// file name.
    pub fn new(data: Vec<u8>, media_type: Option<&str>, file_name: Option<&str>) -> Self {
        Self {
            data,
            kind: classify(media_type, file_name),
            file_name: file_name.map(|s| s.to_string()),
            preview: None,
        }
    }

    /// Wrap bytes whose kind is already known (e.g. a synthetic text body).
    pub fn with_kind(data: Vec<u8>, kind: FileKind) -> Self {
        Self {
            data,
            kind,
            file_name: None,
            preview: None,
        }
    }
}

/// Classify a file from its declared media type, falling back to the file
/// name extension when the media type is absent or generic.
///
/// Never fails: unrecognized inputs default to [`FileKind::Image`], the most
/// permissive path, since OCR on non-image bytes fails explicitly later
/// rather than silently.
pub fn classify(media_type: Option<&str>, file_name: Option<&str>) -> FileKind {
    if let Some(mt) = media_type {
        let mt = mt.split(';').next().unwrap_or(mt).trim().to_lowercase();
        match mt.as_str() {
            "application/pdf" => return FileKind::Pdf,
            "message/rfc822" => return FileKind::Email,
            "text/plain" => return FileKind::Text,
            "" | "application/octet-stream" => {} // generic, fall through to extension
            _ if mt.starts_with("image/") => return FileKind::Image,
            _ => {}
        }
    }

    let ext = file_name
        .and_then(|n| n.rsplit_once('.').map(|(_, e)| e.to_lowercase()))
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => FileKind::Pdf,
        "eml" | "msg" => FileKind::Email,
        "txt" => FileKind::Text,
        _ => FileKind::Image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_media_type() {
        assert_eq!(classify(Some("application/pdf"), None), FileKind::Pdf);
        assert_eq!(classify(Some("image/jpeg"), None), FileKind::Image);
        assert_eq!(classify(Some("image/heic"), None), FileKind::Image);
        assert_eq!(classify(Some("message/rfc822"), None), FileKind::Email);
        assert_eq!(classify(Some("text/plain"), None), FileKind::Text);
    }

    #[test]
    fn test_classify_generic_media_type_uses_extension() {
        assert_eq!(
            classify(Some("application/octet-stream"), Some("scan.pdf")),
            FileKind::Pdf
        );
        assert_eq!(
            classify(Some("application/octet-stream"), Some("message.eml")),
            FileKind::Email
        );
        assert_eq!(classify(None, Some("receipt.PNG")), FileKind::Image);
    }

    #[test]
    fn test_classify_media_type_with_parameters() {
        assert_eq!(
            classify(Some("text/plain; charset=utf-8"), None),
            FileKind::Text
        );
    }

    #[test]
    fn test_classify_unknown_defaults_to_image() {
        assert_eq!(classify(None, None), FileKind::Image);
        assert_eq!(classify(Some("application/zip"), Some("a.zip")), FileKind::Image);
    }
}
