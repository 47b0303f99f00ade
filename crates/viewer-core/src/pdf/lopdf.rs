use lopdf::Document as LoDocument;

use super::error::PdfError;
use super::text::page_text_to_blocks;
use super::types::{Block, PdfSummary};

pub(super) struct LopdfBackend {
    doc: LoDocument,
    pages: Vec<u32>,
    pub(super) summary: PdfSummary,
}

impl LopdfBackend {
    pub(super) fn open(bytes: &[u8]) -> Result<Self, PdfError> {
        let doc = LoDocument::load_mem(bytes)?;
        if doc.is_encrypted() {
            return Err(PdfError::Encrypted);
        }
        let pages: Vec<u32> = doc.get_pages().into_keys().collect();
        if pages.is_empty() {
            return Err(PdfError::NoPages);
        }
        let summary = PdfSummary {
            title: document_title(&doc),
            page_count: pages.len(),
        };
        Ok(Self {
            doc,
            pages,
            summary,
        })
    }

    pub(super) fn load_page(&self, page_number: usize) -> Result<Vec<Block>, PdfError> {
        let object_page = page_number
            .checked_sub(1)
            .and_then(|idx| self.pages.get(idx))
            .ok_or(PdfError::PageOutOfRange(page_number))?;
        let text = self
            .doc
            .extract_text(&[*object_page])
            .map_err(|e| PdfError::page(page_number, e))?;
        Ok(page_text_to_blocks(&text))
    }
}

/// `/Title` from the trailer's info dictionary, inline or referenced.
fn document_title(doc: &LoDocument) -> Option<String> {
    let info = doc.trailer.get(b"Info").ok()?;
    let dict = match info.as_reference() {
        Ok(id) => doc.get_dictionary(id).ok()?,
        Err(_) => info.as_dict().ok()?,
    };
    dict.get(b"Title").ok().and_then(object_to_string)
}

fn object_to_string(obj: &lopdf::Object) -> Option<String> {
    match obj {
        lopdf::Object::String(s, _) => Some(String::from_utf8_lossy(&s[..]).to_string()),
        lopdf::Object::Name(n) => Some(String::from_utf8_lossy(n).to_string()),
        _ => None,
    }
}
