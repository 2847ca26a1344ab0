use std::panic::{self, AssertUnwindSafe};

use crate::{DocumentUpload, ExtractError, ExtractedDocument};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Splits a document payload into the text of its pages, in page order
pub trait PageReader {
    fn read_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError>;
}

impl<T: PageReader> PageReader for &T {
    fn read_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        (**self).read_pages(bytes)
    }
}

/// Reads PDF payloads with `pdf-extract`
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfPageReader;

pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

impl PageReader for PdfPageReader {
    fn read_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        if !is_pdf(bytes) {
            return Err(ExtractError::InvalidDocument(
                "payload is not a PDF file".into(),
            ));
        }

        // pdf-extract panics on some malformed inputs
        panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }))
        .map_err(|_| ExtractError::InvalidDocument("PDF parser aborted on malformed input".into()))?
        .map_err(|e| ExtractError::InvalidDocument(e.to_string()))
    }
}

pub struct DocumentExtractor<R> {
    reader: R,
}

impl<R: PageReader> DocumentExtractor<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Concatenates the text of every page, in order and without separators
    #[tracing::instrument(skip_all, fields(name = %upload.name, bytes = upload.bytes.len()))]
    pub fn extract(&self, upload: &DocumentUpload) -> Result<ExtractedDocument, ExtractError> {
        let pages = self
            .reader
            .read_pages(&upload.bytes)
            .inspect_err(|e| tracing::error!(error = %e, "Failed to read document"))?;

        let page_count = pages.len();
        let mut text = String::new();
        for (idx, page) in pages.iter().enumerate() {
            text.push_str(page);
            tracing::debug!(page = idx + 1, page_count, "Processed document page");
        }

        if text.trim().is_empty() {
            return Err(ExtractError::EmptyContent(upload.name.clone()));
        }
        tracing::info!(page_count, chars = text.len(), "Extracted document text");

        Ok(ExtractedDocument::new(text, format!("PDF: {}", upload.name)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct FixedPages(Vec<&'static str>);

    impl PageReader for FixedPages {
        fn read_pages(&self, _bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
            Ok(self.0.iter().map(|p| p.to_string()).collect())
        }
    }

    fn upload() -> DocumentUpload {
        DocumentUpload::new("report.pdf", b"%PDF-1.7".to_vec())
    }

    #[test]
    fn test_pages_concatenate_without_separator() {
        let extractor = DocumentExtractor::new(FixedPages(vec!["A", "B", "C"]));
        let doc = extractor.extract(&upload()).unwrap();

        assert_eq!(doc.text, "ABC");
        assert_eq!(doc.source_label, "PDF: report.pdf");
    }

    #[test]
    fn test_page_order_is_preserved() {
        let pages = vec!["first page. ", "second page. ", "third page."];
        let mut reversed = pages.clone();
        reversed.reverse();

        let forward = DocumentExtractor::new(FixedPages(pages))
            .extract(&upload())
            .unwrap();
        let backward = DocumentExtractor::new(FixedPages(reversed))
            .extract(&upload())
            .unwrap();

        assert_eq!(forward.text, "first page. second page. third page.");
        assert_eq!(backward.text, "third page.second page. first page. ");
    }

    #[test]
    fn test_blank_document_is_empty() {
        let extractor = DocumentExtractor::new(FixedPages(vec!["  ", "\n", ""]));
        assert!(matches!(
            extractor.extract(&upload()),
            Err(ExtractError::EmptyContent(name)) if name == "report.pdf"
        ));
    }

    const THREE_PAGE_PDF: &[u8] = include_bytes!("../tests/fixtures/abc.pdf");

    #[test]
    fn test_pdf_reader_returns_one_entry_per_page() {
        let pages = PdfPageReader.read_pages(THREE_PAGE_PDF).unwrap();

        let trimmed: Vec<_> = pages.iter().map(|p| p.trim()).collect();
        assert_eq!(trimmed, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_pdf_upload_is_extracted_in_page_order() {
        let upload = DocumentUpload::new("abc.pdf", THREE_PAGE_PDF);
        let doc = DocumentExtractor::new(PdfPageReader).extract(&upload).unwrap();

        let letters: String = doc.text.split_whitespace().collect();
        assert_eq!(letters, "ABC");
        assert_eq!(doc.source_label, "PDF: abc.pdf");
    }

    #[test]
    fn test_non_pdf_payload_is_rejected() {
        let result = PdfPageReader.read_pages(b"<html>not a pdf</html>");
        assert!(matches!(result, Err(ExtractError::InvalidDocument(_))));
    }

    #[test]
    fn test_truncated_pdf_is_rejected() {
        let result = PdfPageReader.read_pages(b"%PDF-1.4\n%garbage");
        assert!(matches!(result, Err(ExtractError::InvalidDocument(_))));
    }
}
