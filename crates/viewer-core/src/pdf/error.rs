use thiserror::Error;

/// Why a PDF could not be opened or a page could not be read. Page numbers
/// are 1-based, as shown to the reader.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("not a readable PDF: {0}")]
    Parse(String),
    #[error("PDF is password protected")]
    Encrypted,
    #[error("PDF has no pages")]
    NoPages,
    #[error("page {0} is out of range")]
    PageOutOfRange(usize),
    #[error("page {page} could not be read: {reason}")]
    Page { page: usize, reason: String },
}

impl PdfError {
    pub(super) fn page(page: usize, reason: impl ToString) -> Self {
        PdfError::Page {
            page,
            reason: reason.to_string(),
        }
    }

    /// The page the error belongs to, when it concerns a single page.
    pub fn page_number(&self) -> Option<usize> {
        match self {
            PdfError::PageOutOfRange(page) | PdfError::Page { page, .. } => Some(*page),
            _ => None,
        }
    }
}

impl From<lopdf::Error> for PdfError {
    fn from(err: lopdf::Error) -> Self {
        PdfError::Parse(err.to_string())
    }
}
