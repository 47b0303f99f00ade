use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use viewer_core::{
    selection::{capture, point_at, Capture, SelectionRange},
    tooltip::dismiss_on_outside,
    TooltipAction,
};

use crate::layout::{rect_contains, to_screen};

use super::types::{Drag, PageStatus, Screen};
use super::App;

const WHEEL_STEP: i32 = 3;

impl App {
    pub(super) fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.mouse_down(mouse.column, mouse.row),
            MouseEventKind::Drag(MouseButton::Left) => self.mouse_drag(mouse.column, mouse.row),
            MouseEventKind::Up(MouseButton::Left) => self.mouse_up(),
            // Other buttons only close the tooltip.
            MouseEventKind::Down(_) if self.screen() == Screen::Viewer => {
                self.pointer_down_outside_tooltip(mouse.column, mouse.row);
            }
            MouseEventKind::ScrollDown if self.screen() == Screen::Viewer => {
                self.scroll_by(WHEEL_STEP)
            }
            MouseEventKind::ScrollUp if self.screen() == Screen::Viewer => {
                self.scroll_by(-WHEEL_STEP)
            }
            _ => {}
        }
    }

    /// Hides a visible tooltip unless the pointer is inside it. Returns false
    /// when the pointer landed inside.
    fn pointer_down_outside_tooltip(&mut self, col: u16, row: u16) -> bool {
        let Some(region) = self.areas.tooltip.filter(|_| self.tooltip.is_visible()) else {
            return true;
        };
        let tooltip = &mut self.tooltip;
        dismiss_on_outside(to_screen(region), i32::from(col), i32::from(row), || {
            tooltip.hide()
        })
    }

    fn mouse_down(&mut self, col: u16, row: u16) {
        if self.screen() == Screen::Upload {
            let hit = self
                .areas
                .picker_rows
                .iter()
                .find(|(rect, _)| rect_contains(*rect, col, row))
                .map(|(_, idx)| *idx);
            if let Some(idx) = hit {
                self.picker.selected = idx;
                self.open_picked();
            }
            return;
        }

        if self.tooltip.is_visible() {
            if hit(self.areas.highlight_button, col, row) {
                self.apply_tooltip_action(TooltipAction::Highlight);
                return;
            }
            if hit(self.areas.ask_button, col, row) {
                self.apply_tooltip_action(TooltipAction::AskAi);
                return;
            }
            if !self.pointer_down_outside_tooltip(col, row) {
                return;
            }
        }

        if self.error_visible() {
            if hit(self.areas.dismiss_error, col, row) {
                self.dismiss_error();
            }
            return;
        }
        if hit(self.areas.previous, col, row) {
            self.go_previous();
            return;
        }
        if hit(self.areas.next, col, row) {
            self.go_next();
            return;
        }
        if !hit(self.areas.surface, col, row) {
            return;
        }
        let point = match (&self.page, self.areas.container) {
            (PageStatus::Ready(lines), Some(container)) => {
                point_at(lines, container, i32::from(col), i32::from(row))
            }
            _ => None,
        };
        self.drag = point.map(|anchor| Drag {
            anchor,
            range: SelectionRange::caret(anchor),
        });
    }

    fn mouse_drag(&mut self, col: u16, row: u16) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let (PageStatus::Ready(lines), Some(container)) = (&self.page, self.areas.container) else {
            return;
        };
        if let Some(point) = point_at(lines, container, i32::from(col), i32::from(row)) {
            drag.range = SelectionRange {
                start: drag.anchor,
                end: point,
            };
        }
    }

    fn mouse_up(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let (PageStatus::Ready(lines), Some(container)) = (&self.page, self.areas.container) else {
            return;
        };
        match capture(Some(drag.range), lines, self.nav.current(), container) {
            Capture::Pending { selection, anchor } => self.tooltip.show(selection, anchor),
            Capture::Cleared => self.tooltip.hide(),
        }
    }
}

fn hit(rect: Option<Rect>, col: u16, row: u16) -> bool {
    rect.is_some_and(|rect| rect_contains(rect, col, row))
}
