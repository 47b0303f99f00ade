use ratatui::prelude::Style;
use ratatui::text::{Line, Span};
use unicode_segmentation::UnicodeSegmentation;
use viewer_core::selection::{span_for_line, SelectionRange};

use crate::theme::Theme;

/// One page line, with the dragged span painted in the selection colour.
pub fn styled_line(
    line: &str,
    line_idx: usize,
    drag: Option<SelectionRange>,
    theme: &Theme,
) -> Line<'static> {
    let span = drag.and_then(|range| span_for_line(range, line_idx, line));
    let Some((start, end)) = span else {
        return Line::from(line.to_string());
    };
    let graphemes: Vec<&str> = line.graphemes(true).collect();
    let end = end.min(graphemes.len());
    let start = start.min(end);
    let mut spans = Vec::with_capacity(3);
    if start > 0 {
        spans.push(Span::raw(graphemes[..start].concat()));
    }
    spans.push(Span::styled(
        graphemes[start..end].concat(),
        Style::default().bg(theme.selection_bg),
    ));
    if end < graphemes.len() {
        spans.push(Span::raw(graphemes[end..].concat()));
    }
    Line::from(spans)
}
