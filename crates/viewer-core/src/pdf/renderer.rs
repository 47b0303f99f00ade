use std::collections::HashMap;

use log::info;

use super::loader::PdfLoader;
use super::types::PdfBackendKind;
use crate::render::{layout_blocks, DocumentRenderer, DocumentSummary, RenderError};
use crate::types::DocumentFormat;

const EMPTY_PAGE: &str = "[empty page]";

/// Text renderer for PDF documents. Wrapped pages are kept per
/// `(page, width)` until another document is opened.
pub struct PdfRenderer {
    backend: PdfBackendKind,
    loader: Option<PdfLoader>,
    pages: HashMap<(usize, u16), Vec<String>>,
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self::with_backend(PdfBackendKind::from_env())
    }

    pub fn with_backend(backend: PdfBackendKind) -> Self {
        Self {
            backend,
            loader: None,
            pages: HashMap::new(),
        }
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer for PdfRenderer {
    fn open(&mut self, bytes: &[u8], format: DocumentFormat) -> Result<DocumentSummary, RenderError> {
        self.close();
        if format != DocumentFormat::Pdf {
            return Err(RenderError::UnsupportedFormat(format.label()));
        }
        let loader = PdfLoader::open(bytes, self.backend)?;
        let summary = DocumentSummary {
            page_count: loader.page_count(),
            title: loader.summary().title.clone(),
        };
        info!(
            "opened PDF with {} pages ({:?})",
            summary.page_count, self.backend
        );
        self.loader = Some(loader);
        Ok(summary)
    }

    fn render_page(&mut self, page_number: usize, width: u16) -> Result<Vec<String>, RenderError> {
        let loader = self.loader.as_mut().ok_or(RenderError::NoDocument)?;
        if page_number == 0 || page_number > loader.page_count() {
            return Err(RenderError::PageOutOfRange(page_number));
        }
        if let Some(lines) = self.pages.get(&(page_number, width)) {
            return Ok(lines.clone());
        }
        let blocks = loader.load_page(page_number)?;
        let mut lines = layout_blocks(&blocks, width);
        if lines.is_empty() {
            lines.push(EMPTY_PAGE.to_string());
        }
        self.pages.insert((page_number, width), lines.clone());
        Ok(lines)
    }

    fn close(&mut self) {
        self.loader = None;
        self.pages.clear();
    }
}
