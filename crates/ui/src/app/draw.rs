use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::layout::{centered_box, centered_rect};
use crate::panels::{render_ai_query, render_highlights};
use crate::tooltip_view;
use crate::upload_view::UploadView;
use crate::viewer::ViewerView;

use super::types::{HitAreas, Screen};
use super::App;

pub(super) const PANEL_WIDTH: u16 = 36;
const PANEL_HEIGHT: u16 = 12;
const MIN_SPLIT_WIDTH: u16 = 72;
const AI_PANEL_HEIGHT: u16 = 8;

const HELP_LINES: [&str; 12] = [
    "q / Ctrl-C: quit",
    "drag with the mouse: select text on the page",
    "Enter / click [ Highlight ]: highlight the selection",
    "a / click [ Ask AI ]: ask AI about the selection",
    "y: copy the selection",
    "Esc: dismiss the tooltip or error",
    "h / l, arrows, PageUp / PageDown: previous / next page",
    "j / k, mouse wheel: scroll the page",
    "o: back to the upload screen",
    "paste or drop a file path: open it",
    "j / k, Enter on the upload screen: pick a file",
    "?: toggle this help",
];

impl App {
    /// Draws the current screen and records the hit areas mouse events are
    /// routed through.
    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let area = f.area();
        let mut areas = HitAreas::default();
        let mut page_width = None;

        match self.screen() {
            Screen::Upload => {
                let upload = UploadView {
                    entries: &self.picker.entries,
                    selected: self.picker.selected,
                    theme: &self.theme,
                };
                areas.picker_rows = upload.render(f, area);
            }
            Screen::Viewer => {
                let (main, side) = split(area);
                let viewer = ViewerView {
                    file_name: self.file.as_ref().map(|file| file.name.as_str()).unwrap_or(""),
                    document: &self.document,
                    page: &self.page,
                    nav: self.nav,
                    scroll: self.scroll,
                    page_width: self.settings.page_width,
                    overlays: self
                        .highlights
                        .overlays_for(self.nav.current(), self.render_width),
                    drag: self.drag.map(|drag| drag.range),
                    theme: &self.theme,
                };
                let drawn = viewer.render(f, main);
                areas.surface = Some(drawn.surface);
                areas.container = drawn.container;
                areas.previous = Some(drawn.previous);
                areas.next = Some(drawn.next);
                areas.dismiss_error = drawn.dismiss_error;
                page_width = Some(drawn.page_width);

                if let Some(side) = side {
                    let chunks = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([Constraint::Length(AI_PANEL_HEIGHT), Constraint::Min(3)])
                        .split(side);
                    render_ai_query(f, chunks[0], self.ai_query.as_ref(), &self.theme);
                    render_highlights(f, chunks[1], self.highlights.entries(), &self.theme);
                }

                if let Some(anchor) = self.tooltip.anchor() {
                    if let Some(tooltip) =
                        tooltip_view::render(f, area, anchor, self.settings.tooltip, &self.theme)
                    {
                        areas.tooltip = Some(tooltip.region);
                        areas.highlight_button = Some(tooltip.highlight);
                        areas.ask_button = Some(tooltip.ask_ai);
                    }
                }
            }
        }

        self.render_notice(f, area);
        if self.show_help {
            render_help(f, area);
        }
        self.areas = areas;
        if let Some(width) = page_width {
            self.set_render_width(width);
        }
    }

    fn render_notice(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(notice) = &self.notice else {
            return;
        };
        let width = u16::try_from(notice.text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let row = Rect {
            y: area.y + area.height.saturating_sub(3),
            height: area.height.min(1),
            ..area
        };
        let rect = centered_box(width, 1, row);
        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(notice.text.as_str())
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .bg(self.theme.footer_bg)
                        .fg(self.theme.header_fg),
                ),
            rect,
        );
    }
}

/// Main column plus the side panels; the panels move below the page on
/// narrow terminals.
fn split(area: Rect) -> (Rect, Option<Rect>) {
    if area.width >= MIN_SPLIT_WIDTH {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(PANEL_WIDTH)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else if area.height > PANEL_HEIGHT * 2 {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(PANEL_HEIGHT)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    }
}

fn render_help(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(70, 70, area);
    let help = Paragraph::new(HELP_LINES.join("\n"))
        .block(
            Block::default()
                .title("Help (Esc or ? to close)")
                .borders(Borders::ALL),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
