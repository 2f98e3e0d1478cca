//! Email container handling: MIME attachment extraction and the remote
//! email-service response contract.

use base64::Engine as _;
use mail_parser::{MessageParser, MimeHeaders};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EmailError, Result};
use crate::models::{FileKind, ReceiptFile};

/// Content pulled out of one email message.
#[derive(Debug, Default)]
pub struct EmailContent {
    /// Candidate receipt files found as attachments, in message order.
    pub attachments: Vec<ReceiptFile>,
    /// Plain text body, if the message has one.
    pub body_text: Option<String>,
}

/// MIME types that qualify an attachment as a candidate receipt.
fn qualifies(mime_type: &str) -> bool {
    mime_type.starts_with("image/") || mime_type == "application/pdf" || mime_type == "text/plain"
}

/// Extract MIME type from a content type, defaulting to octet-stream.
fn mime_type_of(ct: Option<&mail_parser::ContentType>) -> String {
    ct.map(|ct| {
        if let Some(subtype) = ct.subtype() {
            format!("{}/{}", ct.ctype(), subtype)
        } else {
            ct.ctype().to_string()
        }
    })
    .unwrap_or_else(|| "application/octet-stream".to_string())
}

/// Parse an RFC822 message and collect its candidate receipts and body.
pub fn parse_container(raw: &[u8]) -> Result<EmailContent> {
    let message = MessageParser::default()
        .parse(raw)
        .ok_or_else(|| EmailError::Parse("not a parseable RFC822 message".to_string()))?;

    let mut attachments = Vec::new();
    for part in message.attachments() {
        let mime_type = mime_type_of(part.content_type());
        if !qualifies(&mime_type) {
            debug!("skipping attachment with content type {}", mime_type);
            continue;
        }

        let file_name = part.attachment_name();
        attachments.push(ReceiptFile::new(
            part.contents().to_vec(),
            Some(&mime_type),
            file_name,
        ));
    }

    let body_text = message
        .body_text(0)
        .map(|s| s.to_string())
        .filter(|s| !s.trim().is_empty());

    debug!(
        "email container: {} qualifying attachment(s), body text: {}",
        attachments.len(),
        body_text.is_some()
    );

    Ok(EmailContent { attachments, body_text })
}

/// Plain text body of a message, best effort.
pub fn body_text(raw: &[u8]) -> Option<String> {
    parse_container(raw).ok().and_then(|c| c.body_text)
}

/// Extract the candidate receipt files attached to an email.
///
/// An email yielding nothing returns an empty sequence; the caller must
/// treat that as "no receipts found", not as an error.
pub fn extract_attachments(raw: &[u8]) -> Result<Vec<ReceiptFile>> {
    Ok(parse_container(raw)?.attachments)
}

/// One attachment in the remote email-service response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAttachment {
    /// Original attachment file name.
    pub file_name: String,
    /// Declared content type.
    pub content_type: String,
    /// Base64-encoded attachment body.
    #[serde(rename = "base64content")]
    pub base64_content: String,
}

/// Response shape of the host's remote email-attachment service.
///
/// This subsystem only relies on the shape; the call itself is an external
/// collaborator boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailServiceResponse {
    /// Attachments found in the message.
    #[serde(default)]
    pub attachments: Vec<ServiceAttachment>,
    /// Whether the message body itself looked like a typed-in receipt.
    #[serde(default)]
    pub has_receipt_in_text: bool,
    /// Plain text of the message body.
    #[serde(default)]
    pub email_text: Option<String>,
}

impl EmailServiceResponse {
    /// Convert the response into candidate receipt files.
    ///
    /// Mirrors the raw-container flow: qualifying attachments first; when
    /// none qualify but the service flagged receipt-shaped body text, a
    /// single synthetic `Text` file wraps the body instead.
    pub fn into_receipt_files(self) -> Result<Vec<ReceiptFile>> {
        let mut files = Vec::new();

        for attachment in self.attachments {
            if !qualifies(&attachment.content_type) {
                continue;
            }
            let data = base64::engine::general_purpose::STANDARD
                .decode(attachment.base64_content.trim())
                .map_err(|e| EmailError::AttachmentDecode {
                    name: attachment.file_name.clone(),
                    reason: e.to_string(),
                })?;
            files.push(ReceiptFile::new(
                data,
                Some(&attachment.content_type),
                Some(&attachment.file_name),
            ));
        }

        if files.is_empty() && self.has_receipt_in_text {
            if let Some(text) = self.email_text.filter(|t| !t.trim().is_empty()) {
                files.push(ReceiptFile::with_kind(text.into_bytes(), FileKind::Text));
            }
        }

        Ok(files)
    }
}
