//! Page surface: header, the rendered page with selection and highlight
//! overlays, and the Previous/Next footer.

mod footer;
mod text;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use viewer_core::{
    highlights::Overlay, selection::SelectionRange, types::ScreenRect, PageNavigator,
};

use crate::app::{DocumentStatus, PageStatus};
use crate::layout::{centered_box, to_terminal};
use crate::theme::Theme;

pub const DOCUMENT_LOADING: &str = "Loading PDF...";
pub const PAGE_LOADING: &str = "Loading page...";
pub const PAGE_FAILED: &str = "Error loading page. Please try again.";
pub const DOCUMENT_FAILED: &str =
    "Failed to load PDF. Please ensure the file is not corrupted and try again.";
const DISMISS_LABEL: &str = "[ Dismiss ]";
const ERROR_BOX_WIDTH: u16 = 64;
const ERROR_BOX_HEIGHT: u16 = 10;

pub struct ViewerView<'a> {
    pub file_name: &'a str,
    pub document: &'a DocumentStatus,
    pub page: &'a PageStatus,
    pub nav: PageNavigator,
    pub scroll: u16,
    pub page_width: u16,
    pub overlays: &'a [Overlay],
    pub drag: Option<SelectionRange>,
    pub theme: &'a Theme,
}

#[derive(Clone, Debug, Default)]
pub struct ViewerAreas {
    pub surface: Rect,
    pub container: Option<ScreenRect>,
    pub previous: Rect,
    pub next: Rect,
    pub dismiss_error: Option<Rect>,
    /// Width pages should be laid out at for this surface.
    pub page_width: u16,
}

impl ViewerView<'_> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) -> ViewerAreas {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);
        let (header, surface, footer_area) = (chunks[0], chunks[1], chunks[2]);
        self.render_header(f, header);

        let page_width = self.page_width.min(surface.width);
        let left_pad = surface.width.saturating_sub(page_width) / 2;
        let page_rect = Rect {
            x: surface.x + left_pad,
            y: surface.y,
            width: page_width,
            height: surface.height,
        };

        let mut container = None;
        match (self.document, self.page) {
            (DocumentStatus::Loading, _) => self.placeholder(f, page_rect, DOCUMENT_LOADING, false),
            (DocumentStatus::Ready { .. }, PageStatus::Loading) => {
                self.placeholder(f, page_rect, PAGE_LOADING, false)
            }
            (DocumentStatus::Ready { .. }, PageStatus::Failed) => {
                self.placeholder(f, page_rect, PAGE_FAILED, true)
            }
            (DocumentStatus::Ready { .. }, PageStatus::Ready(lines)) => {
                container = Some(self.render_page(f, page_rect, lines));
            }
            _ => {}
        }

        let (previous, next) = footer::render(f, footer_area, self.nav, self.theme);
        let dismiss_error = match self.document {
            DocumentStatus::Failed {
                cause,
                dismissed: false,
            } => Some(self.render_error(f, area, cause)),
            _ => None,
        };

        ViewerAreas {
            surface,
            container,
            previous,
            next,
            dismiss_error,
            page_width,
        }
    }

    fn render_header(&self, f: &mut Frame<'_>, area: Rect) {
        let title = match self.document {
            DocumentStatus::Ready {
                title: Some(title), ..
            } if !title.trim().is_empty() => format!(" {}  ·  {}", self.file_name, title.trim()),
            _ => format!(" {}", self.file_name),
        };
        let header = Paragraph::new(title).style(
            Style::default()
                .bg(self.theme.header_bg)
                .fg(self.theme.header_fg)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(header, area);
    }

    fn placeholder(&self, f: &mut Frame<'_>, area: Rect, text: &str, error: bool) {
        let fg = if error {
            self.theme.error_fg
        } else {
            self.theme.muted_fg
        };
        let row = Rect {
            y: area.y + area.height / 2,
            height: area.height.min(1),
            ..area
        };
        f.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(Style::default().fg(fg)),
            row,
        );
    }

    fn render_page(&self, f: &mut Frame<'_>, page_rect: Rect, lines: &[String]) -> ScreenRect {
        let container = ScreenRect {
            x: i32::from(page_rect.x),
            y: i32::from(page_rect.y) - i32::from(self.scroll),
            width: page_rect.width,
            height: u16::try_from(lines.len()).unwrap_or(u16::MAX),
        };
        let visible: Vec<Line<'static>> = lines
            .iter()
            .enumerate()
            .skip(usize::from(self.scroll))
            .take(usize::from(page_rect.height))
            .map(|(idx, line)| text::styled_line(line, idx, self.drag, self.theme))
            .collect();
        f.render_widget(Paragraph::new(visible), page_rect);

        let patch = Style::default().bg(self.theme.highlight_bg);
        for overlay in self.overlays {
            let rect = ScreenRect::offset(container, overlay.position);
            if let Some(cells) = to_terminal(rect, page_rect) {
                f.buffer_mut().set_style(cells, patch);
            }
        }
        container
    }

    fn render_error(&self, f: &mut Frame<'_>, area: Rect, cause: &str) -> Rect {
        let rect = centered_box(ERROR_BOX_WIDTH, ERROR_BOX_HEIGHT, area);
        let block = Block::default()
            .title("Error")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.error_fg));
        let inner = block.inner(rect);
        f.render_widget(Clear, rect);
        f.render_widget(block, rect);
        let body = Paragraph::new(vec![
            Line::from(DOCUMENT_FAILED),
            Line::from(""),
            Line::styled(cause.to_string(), Style::default().fg(self.theme.muted_fg)),
        ])
        .wrap(Wrap { trim: true });
        let body_area = Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        };
        f.render_widget(body, body_area);

        let label_width = DISMISS_LABEL.len() as u16;
        let button = Rect {
            x: inner.x + inner.width.saturating_sub(label_width) / 2,
            y: inner.y + inner.height.saturating_sub(1),
            width: label_width.min(inner.width),
            height: inner.height.min(1),
        };
        f.render_widget(
            Paragraph::new(DISMISS_LABEL).style(
                Style::default()
                    .fg(self.theme.error_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            button,
        );
        button
    }
}
