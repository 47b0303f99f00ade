use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use unicode_segmentation::UnicodeSegmentation;
use viewer_core::types::TextSelection;

use crate::theme::Theme;

const PREVIEW_GRAPHEMES: usize = 40;

/// The active AI query: the selected text and the page it came from.
pub fn render_ai_query(f: &mut Frame<'_>, area: Rect, query: Option<&TextSelection>, theme: &Theme) {
    let block = Block::default().title(" Ask AI ").borders(Borders::ALL);
    let body = match query {
        Some(query) => Paragraph::new(vec![
            Line::styled(
                format!("Page {}", query.page_number()),
                Style::default().fg(theme.footer_fg).add_modifier(Modifier::BOLD),
            ),
            Line::from(query.text().to_string()),
        ]),
        None => Paragraph::new("Select text and choose Ask AI")
            .style(Style::default().fg(theme.muted_fg)),
    };
    f.render_widget(body.block(block).wrap(Wrap { trim: true }), area);
}

/// Every confirmed highlight with its page and capture time.
pub fn render_highlights(f: &mut Frame<'_>, area: Rect, highlights: &[TextSelection], theme: &Theme) {
    let block = Block::default()
        .title(format!(" Highlights ({}) ", highlights.len()))
        .borders(Borders::ALL);
    if highlights.is_empty() {
        f.render_widget(
            Paragraph::new("No highlights yet")
                .style(Style::default().fg(theme.muted_fg))
                .block(block),
            area,
        );
        return;
    }
    let items: Vec<ListItem> = highlights
        .iter()
        .map(|h| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!("Page {}", h.page_number()),
                        Style::default().fg(theme.footer_fg),
                    ),
                    Span::styled(
                        format!("  {}", h.timestamp().format("%H:%M:%S")),
                        Style::default().fg(theme.muted_fg),
                    ),
                ]),
                Line::from(format!("  {}", preview(h.text()))),
            ])
        })
        .collect();
    f.render_widget(List::new(items).block(block), area);
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let graphemes: Vec<&str> = flat.graphemes(true).collect();
    if graphemes.len() <= PREVIEW_GRAPHEMES {
        return flat;
    }
    format!("{}…", graphemes[..PREVIEW_GRAPHEMES - 1].concat())
}
