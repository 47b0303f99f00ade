use ratatui::layout::{Constraint, Direction, Layout, Rect};

use viewer_core::types::ScreenRect;

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Fixed-size box centred in `r`, shrunk to fit.
pub fn centered_box(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

pub fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    let x_end = rect.x.saturating_add(rect.width);
    let y_end = rect.y.saturating_add(rect.height);
    col >= rect.x && col < x_end && row >= rect.y && row < y_end
}

pub fn to_screen(rect: Rect) -> ScreenRect {
    ScreenRect::new(i32::from(rect.x), i32::from(rect.y), rect.width, rect.height)
}

/// Part of `rect` that lies on screen, clipped to `bounds`.
pub fn to_terminal(rect: ScreenRect, bounds: Rect) -> Option<Rect> {
    let clipped = rect.intersect(to_screen(bounds))?;
    Some(Rect {
        x: u16::try_from(clipped.x).ok()?,
        y: u16::try_from(clipped.y).ok()?,
        width: clipped.width,
        height: clipped.height,
    })
}
