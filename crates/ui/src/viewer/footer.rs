use ratatui::{prelude::*, widgets::Paragraph};
use viewer_core::PageNavigator;

use crate::theme::Theme;

const PREVIOUS: &str = "[ Previous ]";
const NEXT: &str = "[ Next ]";

/// Draws `[ Previous ]  Page x of n  [ Next ]` and returns the two button
/// rectangles.
pub fn render(f: &mut Frame<'_>, area: Rect, nav: PageNavigator, theme: &Theme) -> (Rect, Rect) {
    let label = if nav.page_count() == 0 {
        "  Page - of -  ".to_string()
    } else {
        format!("  Page {} of {}  ", nav.current(), nav.page_count())
    };
    let button = |enabled: bool| {
        if enabled {
            Style::default()
                .fg(theme.footer_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.disabled_fg)
        }
    };
    let line = Line::from(vec![
        Span::styled(PREVIOUS, button(nav.can_go_previous())),
        Span::styled(label.clone(), Style::default().fg(theme.footer_fg)),
        Span::styled(NEXT, button(nav.can_go_next())),
    ]);

    let prev_w = PREVIOUS.len() as u16;
    let label_w = label.chars().count() as u16;
    let next_w = NEXT.len() as u16;
    let total = prev_w + label_w + next_w;
    let x = area.x + area.width.saturating_sub(total) / 2;
    f.render_widget(
        Paragraph::new("").style(Style::default().bg(theme.footer_bg)),
        area,
    );
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.footer_bg)),
        Rect {
            x,
            width: total.min(area.width),
            ..area
        },
    );
    let previous = Rect {
        x,
        width: prev_w,
        ..area
    };
    let next = Rect {
        x: x + prev_w + label_w,
        width: next_w,
        ..area
    };
    (previous, next)
}
