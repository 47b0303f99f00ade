//! The rendering collaborator: an opaque engine that reports a page count and
//! produces text lines for a page at a width. The viewer only talks to it
//! through [`RenderWorker`].

mod worker;
mod wrap;

use thiserror::Error;

use crate::pdf::PdfError;
use crate::types::DocumentFormat;

pub use worker::{Generation, RenderEvent, RenderRequest, RenderWorker};
pub use wrap::{layout_blocks, wrap_text};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("{0} rendering is not supported")]
    UnsupportedFormat(&'static str),
    #[error("{0} is no longer available")]
    Released(String),
    #[error("no document is open")]
    NoDocument,
    #[error("page {0} is out of range")]
    PageOutOfRange(usize),
    #[error("{0}")]
    Pdf(String),
}

impl From<PdfError> for RenderError {
    fn from(err: PdfError) -> Self {
        match err {
            PdfError::PageOutOfRange(page) => RenderError::PageOutOfRange(page),
            other => RenderError::Pdf(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSummary {
    pub page_count: usize,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub page_number: usize,
    pub width: u16,
    pub lines: Vec<String>,
}

pub trait DocumentRenderer: Send {
    fn open(&mut self, bytes: &[u8], format: DocumentFormat) -> Result<DocumentSummary, RenderError>;

    /// Lines of the 1-based `page_number`, wrapped to `width` cells.
    fn render_page(&mut self, page_number: usize, width: u16) -> Result<Vec<String>, RenderError>;

    fn close(&mut self) {}
}
