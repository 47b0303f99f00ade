use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};
use viewer_core::{types::TooltipAnchor, TooltipPlacement};

use crate::layout::{to_screen, to_terminal};
use crate::theme::Theme;

const HIGHLIGHT: &str = "[ Highlight ]";
const ASK_AI: &str = "[ Ask AI ]";
const SEPARATOR: &str = " │ ";
const HEIGHT: u16 = 3;

pub struct TooltipAreas {
    pub region: Rect,
    pub highlight: Rect,
    pub ask_ai: Rect,
}

pub fn width() -> u16 {
    // Borders plus one cell of padding either side.
    (HIGHLIGHT.len() + SEPARATOR.chars().count() + ASK_AI.len()) as u16 + 4
}

pub fn render(
    f: &mut Frame<'_>,
    frame: Rect,
    anchor: TooltipAnchor,
    placement: TooltipPlacement,
    theme: &Theme,
) -> Option<TooltipAreas> {
    let mut rect = placement.rect(anchor, width(), HEIGHT, to_screen(frame));
    let max_top = i32::from(frame.y + frame.height.saturating_sub(HEIGHT));
    rect.y = rect.y.min(max_top);
    let region = to_terminal(rect, frame)?;

    let style = Style::default().bg(theme.tooltip_bg).fg(theme.tooltip_fg);
    let button = Style::default()
        .bg(theme.tooltip_bg)
        .fg(theme.footer_fg)
        .add_modifier(Modifier::BOLD);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.muted_fg))
        .style(style);
    let inner = block.inner(region);
    f.render_widget(Clear, region);
    f.render_widget(block, region);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" ", style),
            Span::styled(HIGHLIGHT, button),
            Span::styled(SEPARATOR, style),
            Span::styled(ASK_AI, button),
        ])),
        inner,
    );

    let row = Rect {
        height: inner.height.min(1),
        ..inner
    };
    let highlight = Rect {
        x: row.x + 1,
        width: HIGHLIGHT.len() as u16,
        ..row
    }
    .intersection(inner);
    let ask_ai = Rect {
        x: row.x + 1 + HIGHLIGHT.len() as u16 + SEPARATOR.chars().count() as u16,
        width: ASK_AI.len() as u16,
        ..row
    }
    .intersection(inner);
    Some(TooltipAreas {
        region,
        highlight,
        ask_ai,
    })
}
