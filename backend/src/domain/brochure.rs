//! Brochure payload classification and download shaping.
//!
//! Stored brochure data is a free-form string written by the admin form. It
//! may be empty, a data URL, a bare base64-encoded PDF, or free text such as
//! the `file-uploaded` placeholder. Only a blank value means "no brochure";
//! every other value is downloadable.
//!
//! Bare base64 is only decoded when it carries the PDF signature, so short
//! free text that happens to be valid base64 is still served as written.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Base64 encoding of the `%PDF` file signature.
pub const PDF_BASE64_SIGNATURE: &str = "JVBERi";
/// Content type for raw base64 payloads.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";
/// Content type for payloads served verbatim.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Decoded view of a stored brochure string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrochurePayload {
    /// Nothing downloadable.
    Missing,
    /// Binary content with its content type.
    Encoded { bytes: Vec<u8>, mime: String },
    /// Text that is neither a data URL nor a base64-encoded PDF.
    Text(String),
}

impl BrochurePayload {
    /// Classify a stored brochure string.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::BrochurePayload;
    ///
    /// assert_eq!(BrochurePayload::classify(""), BrochurePayload::Missing);
    /// assert_eq!(
    ///     BrochurePayload::classify("JVBERi0xLjQ="),
    ///     BrochurePayload::Encoded { bytes: b"%PDF-1.4".to_vec(), mime: "application/pdf".into() },
    /// );
    /// assert_eq!(
    ///     BrochurePayload::classify("Syllabus"),
    ///     BrochurePayload::Text("Syllabus".into()),
    /// );
    /// ```
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        if let Some(rest) = trimmed.strip_prefix("data:") {
            if let Some(payload) = Self::from_data_url(rest) {
                return payload;
            }
            return Self::Text(raw.to_owned());
        }
        if trimmed.starts_with(PDF_BASE64_SIGNATURE) {
            if let Ok(bytes) = STANDARD.decode(trimmed) {
                return Self::Encoded {
                    bytes,
                    mime: PDF_CONTENT_TYPE.to_owned(),
                };
            }
        }
        Self::Text(raw.to_owned())
    }

    fn from_data_url(rest: &str) -> Option<Self> {
        let (header, body) = rest.split_once(',')?;
        let (media, is_base64) = match header.strip_suffix(";base64") {
            Some(media) => (media, true),
            None => (header, false),
        };
        let mime = media
            .split(';')
            .next()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or("application/octet-stream")
            .to_owned();
        let bytes = if is_base64 {
            STANDARD.decode(body).ok()?
        } else {
            body.as_bytes().to_vec()
        };
        if bytes.is_empty() {
            return Some(Self::Missing);
        }
        Some(Self::Encoded { bytes, mime })
    }

    /// Bytes and content type to serve, or `None` when missing.
    pub fn into_content(self) -> Option<(Vec<u8>, String)> {
        match self {
            Self::Missing => None,
            Self::Encoded { bytes, mime } => Some((bytes, mime)),
            Self::Text(text) => Some((text.into_bytes(), TEXT_CONTENT_TYPE.to_owned())),
        }
    }
}

/// Brochure content ready to be returned as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrochureDownload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("data:application/pdf;base64,")]
    fn missing_payloads(#[case] raw: &str) {
        assert_eq!(BrochurePayload::classify(raw), BrochurePayload::Missing);
    }

    #[rstest]
    fn data_url_keeps_declared_mime() {
        let payload = BrochurePayload::classify("data:application/msword;base64,aGVsbG8=");
        assert_eq!(
            payload,
            BrochurePayload::Encoded {
                bytes: b"hello".to_vec(),
                mime: "application/msword".into(),
            }
        );
    }

    #[rstest]
    fn plain_data_url_is_served_verbatim() {
        let payload = BrochurePayload::classify("data:text/plain,hi there");
        assert_eq!(
            payload,
            BrochurePayload::Encoded {
                bytes: b"hi there".to_vec(),
                mime: "text/plain".into(),
            }
        );
    }

    #[rstest]
    fn bare_base64_pdf_is_decoded() {
        let payload = BrochurePayload::classify("JVBERi0xLjQgYnJvY2h1cmU=");
        assert_eq!(
            payload,
            BrochurePayload::Encoded {
                bytes: b"%PDF-1.4 brochure".to_vec(),
                mime: PDF_CONTENT_TYPE.into(),
            }
        );
    }

    #[rstest]
    #[case("Course outline: week 1 networking.")]
    #[case("data:application/pdf;base64,@@not base64@@")]
    #[case("file-uploaded")]
    #[case("Syllabus")]
    #[case("aGVsbG8=")]
    #[case("JVBERi@@")]
    fn unparseable_payloads_are_text(#[case] raw: &str) {
        let payload = BrochurePayload::classify(raw);
        assert_eq!(payload, BrochurePayload::Text(raw.to_owned()));
        let (bytes, mime) = payload.into_content().expect("text has content");
        assert_eq!(bytes, raw.as_bytes());
        assert_eq!(mime, TEXT_CONTENT_TYPE);
    }
}
