use std::path::PathBuf;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::layout::centered_box;
use crate::theme::Theme;

pub const PROMPT: &str = "Click to upload or drag and drop";
pub const SUPPORTED: &str = "Supports PDF and EPUB files";
const HINT: &str = "↑/↓ select · Enter open · paste or drop a path";
const BOX_WIDTH: u16 = 60;
const MAX_ROWS: u16 = 12;

pub struct UploadView<'a> {
    pub entries: &'a [PathBuf],
    pub selected: usize,
    pub theme: &'a Theme,
}

impl UploadView<'_> {
    /// Draws the drop zone and picker. Returns the screen row of each
    /// visible entry with its index.
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) -> Vec<(Rect, usize)> {
        let rows = (self.entries.len() as u16).clamp(1, MAX_ROWS);
        let rect = centered_box(BOX_WIDTH, rows + 7, area);
        let block = Block::default()
            .title(" BetterRead ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.footer_fg));
        let inner = block.inner(rect);
        f.render_widget(block, rect);

        let header = Paragraph::new(vec![
            Line::styled(PROMPT, Style::default().add_modifier(Modifier::BOLD)),
            Line::styled(SUPPORTED, Style::default().fg(self.theme.muted_fg)),
        ])
        .alignment(Alignment::Center);
        f.render_widget(header, Rect { height: inner.height.min(2), ..inner });

        let list_top = inner.y + 3;
        let list_bottom = inner.y + inner.height.saturating_sub(2);
        let mut hits = Vec::new();
        if self.entries.is_empty() {
            if list_top < list_bottom {
                f.render_widget(
                    Paragraph::new("No PDF or EPUB files in this directory")
                        .alignment(Alignment::Center)
                        .style(Style::default().fg(self.theme.muted_fg)),
                    Rect {
                        y: list_top,
                        height: 1,
                        ..inner
                    },
                );
            }
        } else {
            let visible = usize::from(list_bottom.saturating_sub(list_top));
            let first = self.selected.saturating_sub(visible.saturating_sub(1));
            for (offset, (idx, path)) in self
                .entries
                .iter()
                .enumerate()
                .skip(first)
                .take(visible)
                .enumerate()
            {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                let row = Rect {
                    y: list_top + offset as u16,
                    height: 1,
                    ..inner
                };
                let style = if idx == self.selected {
                    Style::default()
                        .bg(self.theme.footer_bg)
                        .fg(self.theme.header_fg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                f.render_widget(Paragraph::new(format!("  {name}")).style(style), row);
                hits.push((row, idx));
            }
        }

        if inner.height > 0 {
            f.render_widget(
                Paragraph::new(HINT)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(self.theme.muted_fg)),
                Rect {
                    y: inner.y + inner.height - 1,
                    height: 1,
                    ..inner
                },
            );
        }
        hits
    }
}
