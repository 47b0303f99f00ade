use std::collections::BTreeMap;

use crate::types::{Position, SelectionId, TextSelection};

/// A painted highlight box, tagged with the selection it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub id: SelectionId,
    pub position: Position,
}

/// Confirmed highlights for the open document. Overlays are keyed by page and
/// by the layout width the page had when the selection was made, since a
/// stored position only lines up with text wrapped at that width.
#[derive(Debug, Default)]
pub struct HighlightStore {
    entries: Vec<TextSelection>,
    by_page: BTreeMap<(usize, u16), Vec<Overlay>>,
}

impl HighlightStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, selection: TextSelection, layout_width: u16) {
        self.by_page
            .entry((selection.page_number(), layout_width))
            .or_default()
            .push(Overlay {
                id: selection.id(),
                position: selection.position(),
            });
        self.entries.push(selection);
    }

    pub fn overlays_for(&self, page_number: usize, layout_width: u16) -> &[Overlay] {
        self.by_page
            .get(&(page_number, layout_width))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All highlights in confirmation order.
    pub fn entries(&self) -> &[TextSelection] {
        &self.entries
    }

    pub fn get(&self, id: SelectionId) -> Option<&TextSelection> {
        self.entries.iter().find(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_page.clear();
    }
}
