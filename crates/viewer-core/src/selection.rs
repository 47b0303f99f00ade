use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::types::{ScreenRect, TextSelection, TooltipAnchor};

/// Line/column inside a rendered page. Columns count graphemes, not cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionPoint {
    pub line: usize,
    pub col: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: SelectionPoint,
    pub end: SelectionPoint,
}

impl SelectionRange {
    pub fn caret(point: SelectionPoint) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    pub fn normalized(self) -> (SelectionPoint, SelectionPoint) {
        let a = (self.start.line, self.start.col);
        let b = (self.end.line, self.end.col);
        if a <= b {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }

    pub fn is_collapsed(self) -> bool {
        self.start == self.end
    }
}

/// Outcome of a pointer release over the page surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Capture {
    Cleared,
    Pending {
        selection: TextSelection,
        anchor: TooltipAnchor,
    },
}

/// Maps a screen cell onto the page, clamping to the nearest line and column
/// so drags that leave the surface still resolve.
pub fn point_at(lines: &[String], container: ScreenRect, column: i32, row: i32) -> Option<SelectionPoint> {
    if lines.is_empty() {
        return None;
    }
    let last_line = lines.len() - 1;
    let line = usize::try_from(row - container.y).unwrap_or(0).min(last_line);
    let cell = usize::try_from(column - container.x).unwrap_or(0);
    Some(SelectionPoint {
        line,
        col: col_at_cell(&lines[line], cell),
    })
}

/// Selected column span `[start, end)` of one line, if any.
pub fn span_for_line(range: SelectionRange, line_idx: usize, line: &str) -> Option<(usize, usize)> {
    let line_len = grapheme_len(line);
    if line_len == 0 {
        return None;
    }
    let (start, end) = range.normalized();
    if line_idx < start.line || line_idx > end.line {
        return None;
    }
    let start_col = if line_idx == start.line {
        start.col.min(line_len)
    } else {
        0
    };
    let end_col = if line_idx == end.line {
        end.col.min(line_len)
    } else {
        line_len
    };
    if start_col >= end_col {
        None
    } else {
        Some((start_col, end_col))
    }
}

pub fn selected_text(range: SelectionRange, lines: &[String]) -> String {
    let (start, end) = range.normalized();
    let mut out: Vec<String> = Vec::new();
    for (idx, line) in lines
        .iter()
        .enumerate()
        .take(end.line.saturating_add(1))
        .skip(start.line)
    {
        let text = match span_for_line(range, idx, line) {
            Some((from, to)) => slice_graphemes(line, from, to),
            None => String::new(),
        };
        out.push(text);
    }
    out.join("\n")
}

/// Screen-space union of the selected spans.
pub fn bounding_rect(range: SelectionRange, lines: &[String], container: ScreenRect) -> Option<ScreenRect> {
    let (start, end) = range.normalized();
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for (idx, line) in lines
        .iter()
        .enumerate()
        .take(end.line.saturating_add(1))
        .skip(start.line)
    {
        let Some((from, to)) = span_for_line(range, idx, line) else {
            continue;
        };
        let (from, to) = (cell_of_col(line, from), cell_of_col(line, to));
        bounds = Some(match bounds {
            None => (from, to, idx, idx),
            Some((left, right, top, _)) => (left.min(from), right.max(to), top, idx),
        });
    }
    let (left, right, top, bottom) = bounds?;
    Some(ScreenRect {
        x: container.x + to_i32(left),
        y: container.y + to_i32(top),
        width: u16::try_from(right - left).unwrap_or(u16::MAX),
        height: u16::try_from(bottom - top + 1).unwrap_or(u16::MAX),
    })
}

/// Turns the active range into a pending selection. Collapsed, missing and
/// whitespace-only ranges clear instead.
pub fn capture(
    range: Option<SelectionRange>,
    lines: &[String],
    page_number: usize,
    container: ScreenRect,
) -> Capture {
    let Some(range) = range else {
        return Capture::Cleared;
    };
    if range.is_collapsed() {
        return Capture::Cleared;
    }
    let Some(rect) = bounding_rect(range, lines, container) else {
        return Capture::Cleared;
    };
    let text = selected_text(range, lines);
    let Some(selection) = TextSelection::new(&text, page_number, rect.relative_to(container)) else {
        return Capture::Cleared;
    };
    let anchor = TooltipAnchor {
        x: rect.x + i32::from(rect.width) / 2,
        y: rect.y,
    };
    Capture::Pending { selection, anchor }
}

/// Grapheme boundary nearest to a cell offset. A cell inside a wide
/// grapheme resolves to the boundary before it.
pub fn col_at_cell(line: &str, cell: usize) -> usize {
    let mut start = 0usize;
    let mut col = 0usize;
    for grapheme in line.graphemes(true) {
        let width = grapheme.width();
        if 2 * start + width >= 2 * cell {
            break;
        }
        start += width;
        col += 1;
    }
    col
}

/// Cells covered by the first `col` graphemes of `line`.
pub fn cell_of_col(line: &str, col: usize) -> usize {
    line.graphemes(true).take(col).map(UnicodeWidthStr::width).sum()
}

pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

fn slice_graphemes(text: &str, start: usize, end: usize) -> String {
    if start >= end {
        return String::new();
    }
    text.graphemes(true).skip(start).take(end - start).collect()
}

fn to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
