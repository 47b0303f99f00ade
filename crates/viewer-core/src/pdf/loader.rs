use std::num::NonZeroUsize;

use log::debug;
use lru::LruCache;

use super::error::PdfError;
use super::lopdf::LopdfBackend;
use super::pdf_rs::PdfRsBackend;
use super::types::{Block, PdfBackendKind, PdfSummary};

enum Backend {
    PdfRs(PdfRsBackend),
    Lopdf(LopdfBackend),
}

/// Page-at-a-time text extraction over either PDF backend, with a small
/// cache of recently extracted pages.
pub struct PdfLoader {
    backend: Backend,
    summary: PdfSummary,
    cache: LruCache<usize, Vec<Block>>,
}

const CACHE_PAGES: usize = 8;

fn cache_capacity() -> NonZeroUsize {
    NonZeroUsize::new(CACHE_PAGES).unwrap_or(NonZeroUsize::MIN)
}

impl PdfLoader {
    pub fn open(bytes: &[u8], kind: PdfBackendKind) -> Result<Self, PdfError> {
        debug!("opening PDF ({} bytes) with {:?}", bytes.len(), kind);
        let backend = match kind {
            PdfBackendKind::PdfRs => Backend::PdfRs(PdfRsBackend::open(bytes)?),
            PdfBackendKind::Lopdf => Backend::Lopdf(LopdfBackend::open(bytes)?),
        };
        let summary = match &backend {
            Backend::PdfRs(b) => b.summary.clone(),
            Backend::Lopdf(b) => b.summary.clone(),
        };
        Ok(Self {
            backend,
            summary,
            cache: LruCache::new(cache_capacity()),
        })
    }

    pub fn summary(&self) -> &PdfSummary {
        &self.summary
    }

    pub fn page_count(&self) -> usize {
        self.summary.page_count
    }

    /// Blocks of the 1-based page `page_number`.
    pub fn load_page(&mut self, page_number: usize) -> Result<Vec<Block>, PdfError> {
        if let Some(cached) = self.cache.get(&page_number).cloned() {
            return Ok(cached);
        }
        let blocks = match &self.backend {
            Backend::PdfRs(b) => b.load_page(page_number)?,
            Backend::Lopdf(b) => b.load_page(page_number)?,
        };
        self.cache.put(page_number, blocks.clone());
        Ok(blocks)
    }
}
