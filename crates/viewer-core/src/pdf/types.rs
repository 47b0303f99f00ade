use std::env;

pub const BACKEND_ENV: &str = "BETTERREAD_PDF_BACKEND";

/// Text recovered from one page, before it is wrapped to a width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Paragraph(String),
    /// Column-aligned text whose line breaks must survive wrapping.
    Preformatted(String),
}

#[derive(Clone, Debug, Default)]
pub struct PdfSummary {
    pub title: Option<String>,
    pub page_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PdfBackendKind {
    PdfRs,
    Lopdf,
}

impl PdfBackendKind {
    pub fn from_env() -> Self {
        Self::parse(&env::var(BACKEND_ENV).unwrap_or_default())
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "lopdf" => PdfBackendKind::Lopdf,
            "pdf" | "pdf-rs" => PdfBackendKind::PdfRs,
            _ => PdfBackendKind::PdfRs,
        }
    }
}
