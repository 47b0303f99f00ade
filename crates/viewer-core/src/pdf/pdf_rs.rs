use pdf::{
    content::{Op, TextDrawAdjusted},
    file::{File as PdfFile, FileOptions, NoCache, NoLog},
};

use super::error::PdfError;
use super::text::page_text_to_blocks;
use super::types::{Block, PdfSummary};

type PdfRsFile = PdfFile<Vec<u8>, NoCache, NoCache, NoLog>;

pub(super) struct PdfRsBackend {
    file: PdfRsFile,
    pub(super) summary: PdfSummary,
}

impl PdfRsBackend {
    pub(super) fn open(bytes: &[u8]) -> Result<Self, PdfError> {
        let file: PdfRsFile = FileOptions::uncached()
            .load(bytes.to_vec())
            .map_err(|e| PdfError::Parse(e.to_string()))?;
        if file.trailer.encrypt_dict.is_some() {
            return Err(PdfError::Encrypted);
        }
        let page_count = file.num_pages() as usize;
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }
        let title = file
            .trailer
            .info_dict
            .as_ref()
            .and_then(|info| info.title.as_ref())
            .map(|title| title.to_string_lossy());
        Ok(Self {
            file,
            summary: PdfSummary { title, page_count },
        })
    }

    pub(super) fn load_page(&self, page_number: usize) -> Result<Vec<Block>, PdfError> {
        let index = page_number
            .checked_sub(1)
            .filter(|idx| *idx < self.summary.page_count)
            .and_then(|idx| u32::try_from(idx).ok())
            .ok_or(PdfError::PageOutOfRange(page_number))?;
        let page = self
            .file
            .get_page(index)
            .map_err(|e| PdfError::page(page_number, e))?;
        let Some(content) = &page.contents else {
            return Ok(Vec::new());
        };
        let resolver = self.file.resolver();
        let ops = content
            .operations(&resolver)
            .map_err(|e| PdfError::page(page_number, e))?;
        Ok(page_text_to_blocks(&ops_to_text(&ops)))
    }
}


fn ops_to_text(ops: &[Op]) -> String {
    let mut out = String::new();
    for op in ops {
        match op {
            Op::TextDraw { text } => {
                out.push_str(&text.to_string_lossy());
                out.push(' ');
            }
            Op::TextDrawAdjusted { array } => {
                for item in array {
                    match item {
                        TextDrawAdjusted::Text(t) => {
                            out.push_str(&t.to_string_lossy());
                        }
                        TextDrawAdjusted::Spacing(v) => {
                            if *v < -50.0 {
                                out.push(' ');
                            }
                        }
                    }
                }
                out.push(' ');
            }
            Op::TextNewline | Op::MoveTextPosition { .. } => {
                out.push('\n');
            }
            _ => {}
        }
    }
    out
}
