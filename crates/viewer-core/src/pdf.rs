mod error;
mod loader;
mod lopdf;
mod pdf_rs;
mod renderer;
mod text;
mod types;

pub use error::PdfError;
pub use loader::PdfLoader;
pub use renderer::PdfRenderer;
pub use text::page_text_to_blocks;
pub use types::{Block, PdfBackendKind, PdfSummary};
