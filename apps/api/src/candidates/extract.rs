//! Resume text extraction from uploaded files.

use bytes::Bytes;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
}

impl FileType {
    /// PDF when the name ends in `.pdf` or the client declared `application/pdf`;
    /// anything else is read as text.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Self {
        let pdf_name = file_name
            .map(|n| n.to_ascii_lowercase().ends_with(".pdf"))
            .unwrap_or(false);
        let pdf_type = content_type
            .map(|t| t.eq_ignore_ascii_case("application/pdf"))
            .unwrap_or(false);

        if pdf_name || pdf_type {
            FileType::Pdf
        } else {
            FileType::Text
        }
    }

    /// Label interpolated into the extraction prompt.
    pub fn label(self) -> &'static str {
        match self {
            FileType::Pdf => "PDF",
            FileType::Text => "text",
        }
    }
}

/// Returns the text content of an uploaded resume.
///
/// A PDF that yields no text is logged and treated as empty; the parser then
/// falls back to the placeholder record rather than failing the upload.
pub async fn extract_resume_text(data: Bytes, file_type: FileType) -> String {
    match file_type {
        FileType::Text => String::from_utf8_lossy(&data).into_owned(),
        FileType::Pdf => {
            // pdf-extract is CPU-bound and can panic on malformed input.
            let extracted =
                tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data)).await;

            match extracted {
                Ok(Ok(text)) => text,
                Ok(Err(e)) => {
                    warn!("Could not extract text from PDF: {e}");
                    String::new()
                }
                Err(e) => {
                    warn!("PDF extraction task failed: {e}");
                    String::new()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_pdf_by_extension() {
        assert_eq!(FileType::detect(Some("cv.PDF"), None), FileType::Pdf);
        assert_eq!(FileType::detect(Some("cv.pdf"), Some("text/plain")), FileType::Pdf);
    }

    #[test]
    fn test_detects_pdf_by_content_type() {
        assert_eq!(
            FileType::detect(Some("upload"), Some("application/pdf")),
            FileType::Pdf
        );
    }

    #[test]
    fn test_everything_else_is_text() {
        assert_eq!(FileType::detect(Some("cv.txt"), None), FileType::Text);
        assert_eq!(FileType::detect(None, None), FileType::Text);
        assert_eq!(FileType::Text.label(), "text");
        assert_eq!(FileType::Pdf.label(), "PDF");
    }

    #[tokio::test]
    async fn test_text_is_decoded_lossily() {
        let data = Bytes::from(vec![b'h', b'i', 0xff]);
        let text = extract_resume_text(data, FileType::Text).await;
        assert!(text.starts_with("hi"));
    }

    #[tokio::test]
    async fn test_garbage_pdf_yields_empty_text() {
        let data = Bytes::from_static(b"definitely not a pdf");
        let text = extract_resume_text(data, FileType::Pdf).await;
        assert!(text.is_empty());
    }
}
