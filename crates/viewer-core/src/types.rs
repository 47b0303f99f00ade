use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const PDF_MIME: &str = "application/pdf";
pub const EPUB_MIME: &str = "application/epub+zip";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Epub,
}

impl DocumentFormat {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            PDF_MIME => Some(DocumentFormat::Pdf),
            EPUB_MIME => Some(DocumentFormat::Epub),
            _ => None,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => PDF_MIME,
            DocumentFormat::Epub => EPUB_MIME,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Epub => "EPUB",
        }
    }
}

/// Rectangle relative to the page container's top-left corner, in surface
/// cells. `x`/`y` go negative when the container is scrolled past the
/// visible surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

/// Absolute screen rectangle. The UI converts its layout rects into this so
/// the core stays independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl ScreenRect {
    pub fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + i32::from(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y + i32::from(self.height)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn relative_to(&self, origin: ScreenRect) -> Position {
        Position {
            x: self.x - origin.x,
            y: self.y - origin.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn offset(origin: ScreenRect, position: Position) -> Self {
        Self {
            x: origin.x + position.x,
            y: origin.y + position.y,
            width: position.width,
            height: position.height,
        }
    }

    /// Intersection of two rectangles, `None` when they do not overlap.
    pub fn intersect(&self, other: ScreenRect) -> Option<ScreenRect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Some(ScreenRect {
            x,
            y,
            width: u16::try_from(right - x).unwrap_or(u16::MAX),
            height: u16::try_from(bottom - y).unwrap_or(u16::MAX),
        })
    }
}

/// Screen coordinates the tooltip is positioned against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipAnchor {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectionId(Uuid);

impl SelectionId {
    pub fn generate() -> Self {
        SelectionId(Uuid::new_v4())
    }
}

impl fmt::Display for SelectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A captured run of text on one page. Built only through [`TextSelection::new`],
/// which rejects blank text and page zero; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSelection {
    id: SelectionId,
    text: String,
    page_number: usize,
    position: Position,
    timestamp: DateTime<Local>,
}

impl TextSelection {
    pub fn new(text: &str, page_number: usize, position: Position) -> Option<Self> {
        Self::new_at(text, page_number, position, Local::now())
    }

    pub fn new_at(
        text: &str,
        page_number: usize,
        position: Position,
        timestamp: DateTime<Local>,
    ) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() || page_number == 0 {
            return None;
        }
        Some(Self {
            id: SelectionId::generate(),
            text: trimmed.to_string(),
            page_number,
            position,
            timestamp,
        })
    }

    pub fn id(&self) -> SelectionId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}

/// A file that passed the intake filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub mime: &'static str,
    pub format: DocumentFormat,
}

impl SelectedFile {
    pub fn new(path: &Path, format: DocumentFormat) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path: path.to_path_buf(),
            name,
            mime: format.mime(),
            format,
        }
    }
}
