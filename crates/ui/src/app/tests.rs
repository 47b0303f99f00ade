use std::{cell::RefCell, fs, rc::Rc};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::TestBackend, Terminal};
use tempfile::TempDir;
use viewer_core::{
    config::Settings,
    render::{DocumentRenderer, DocumentSummary, RenderError},
    types::DocumentFormat,
    upload::accept_path,
    ObjectUrls, RenderWorker,
};

use crate::viewer::{DOCUMENT_LOADING, PAGE_FAILED};

use super::{App, DocumentStatus, Screen};

struct Scripted {
    pages: Vec<Vec<String>>,
    fail_open: bool,
    fail_pages: Vec<usize>,
}

/// Blank rows above the text so the tooltip has room above a selection.
const TOP_PADDING: usize = 5;

impl Scripted {
    fn new(pages: &[&[&str]]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|lines| {
                    std::iter::repeat(String::new())
                        .take(TOP_PADDING)
                        .chain(lines.iter().map(|l| l.to_string()))
                        .collect()
                })
                .collect(),
            fail_open: false,
            fail_pages: Vec::new(),
        }
    }
}

impl DocumentRenderer for Scripted {
    fn open(&mut self, _bytes: &[u8], format: DocumentFormat) -> Result<DocumentSummary, RenderError> {
        if format == DocumentFormat::Epub {
            return Err(RenderError::UnsupportedFormat("EPUB"));
        }
        if self.fail_open {
            return Err(RenderError::Pdf("bad xref table".into()));
        }
        Ok(DocumentSummary {
            page_count: self.pages.len(),
            title: Some("Sample".into()),
        })
    }

    fn render_page(&mut self, page_number: usize, _width: u16) -> Result<Vec<String>, RenderError> {
        if self.fail_pages.contains(&page_number) {
            return Err(RenderError::Pdf("broken content stream".into()));
        }
        self.pages
            .get(page_number.wrapping_sub(1))
            .cloned()
            .ok_or(RenderError::PageOutOfRange(page_number))
    }
}

fn three_page_script() -> Scripted {
    Scripted::new(&[
        &["Alpha beta gamma", "delta"],
        &["Second page text"],
        &["Third page"],
    ])
}

struct Harness {
    app: App,
    terminal: Terminal<TestBackend>,
    urls: ObjectUrls,
    dir: TempDir,
}

impl Harness {
    fn new(renderer: Scripted) -> Self {
        Self::build(renderer, |app| app)
    }

    fn build(renderer: Scripted, configure: impl FnOnce(App) -> App) -> Self {
        let dir = tempfile::tempdir().expect("tmp dir");
        for name in ["paper.pdf", "other.pdf", "notes.txt", "book.epub"] {
            fs::write(dir.path().join(name), b"%PDF-1.5 stub").expect("write fixture");
        }
        let urls = ObjectUrls::new();
        let worker = RenderWorker::inline(Box::new(renderer), urls.clone());
        let app = configure(
            App::new(Settings::default(), worker, urls.clone()).with_picker_dir(dir.path()),
        );
        let terminal = Terminal::new(TestBackend::new(120, 40)).expect("terminal");
        let mut harness = Self {
            app,
            terminal,
            urls,
            dir,
        };
        harness.settle();
        harness
    }

    fn three_pages() -> Self {
        Self::new(three_page_script())
    }

    fn settle(&mut self) {
        for _ in 0..2 {
            self.app.update();
            self.terminal
                .draw(|f| self.app.draw(f))
                .expect("draw");
        }
    }

    fn open(&mut self, name: &str) {
        let file = accept_path(&self.dir.path().join(name)).expect("accepted");
        self.app.open_file(file);
        self.settle();
    }

    fn send(&mut self, event: Event) {
        self.app.handle_event(event);
        self.settle();
    }

    fn key(&mut self, code: KeyCode) {
        self.send(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn mouse(&mut self, kind: MouseEventKind, (column, row): (u16, u16)) {
        self.send(Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }));
    }

    fn click(&mut self, at: (u16, u16)) {
        self.mouse(MouseEventKind::Down(MouseButton::Left), at);
        self.mouse(MouseEventKind::Up(MouseButton::Left), at);
    }

    fn drag(&mut self, from: (u16, u16), to: (u16, u16)) {
        self.mouse(MouseEventKind::Down(MouseButton::Left), from);
        self.mouse(MouseEventKind::Drag(MouseButton::Left), to);
        self.mouse(MouseEventKind::Up(MouseButton::Left), to);
    }

    fn rows(&self) -> Vec<String> {
        let buffer = self.terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn screen(&self) -> String {
        self.rows().join("\n")
    }

    /// Cell coordinates of `needle`, counting wide graphemes as two cells.
    fn find(&self, needle: &str) -> (u16, u16) {
        let buffer = self.terminal.backend().buffer();
        for y in 0..buffer.area.height {
            let mut row = String::new();
            let mut starts = Vec::new();
            for x in 0..buffer.area.width {
                starts.push((row.len(), x));
                row.push_str(buffer[(x, y)].symbol());
            }
            if let Some(idx) = row.find(needle) {
                let x = starts
                    .iter()
                    .rev()
                    .find(|(at, _)| *at <= idx)
                    .map_or(0, |(_, x)| *x);
                return (x, y);
            }
        }
        panic!("{needle:?} not on screen:\n{}", self.screen());
    }

    /// Rows of the side panels, which sit right of the page at this size.
    fn side_panel_rows(&self) -> Vec<String> {
        let buffer = self.terminal.backend().buffer();
        let left = buffer.area.width - super::draw::PANEL_WIDTH;
        (0..buffer.area.height)
            .map(|y| {
                (left..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn select_word(&mut self, word: &str) {
        let (x, y) = self.find(word);
        self.drag((x, y), (x + word.len() as u16, y));
    }

    fn highlighted_cells(&self) -> usize {
        let buffer = self.terminal.backend().buffer();
        let bg = self.app.theme().highlight_bg;
        buffer.content.iter().filter(|cell| cell.bg == bg).count()
    }
}

#[test]
fn starts_on_the_upload_screen() {
    let h = Harness::three_pages();
    assert_eq!(h.app.screen(), Screen::Upload);
    let screen = h.screen();
    assert!(screen.contains("Click to upload or drag and drop"));
    assert!(screen.contains("Supports PDF and EPUB files"));
    assert!(screen.contains("book.epub"));
    assert!(screen.contains("paper.pdf"));
    assert!(!screen.contains("notes.txt"));
}

#[test]
fn drag_selection_shows_tooltip_with_page_and_text() {
    let mut h = Harness::three_pages();
    h.open("paper.pdf");
    assert_eq!(h.app.page_count(), 3);
    h.select_word("beta");
    let pending = h.app.tooltip().pending().expect("pending selection");
    assert_eq!(pending.text(), "beta");
    assert_eq!(pending.page_number(), 1);
    assert_eq!(pending.position().y, TOP_PADDING as i32);
    assert_eq!(pending.position().width, 4);
    assert!(h.screen().contains("[ Highlight ]"));
    assert!(h.screen().contains("[ Ask AI ]"));
}

#[test]
fn highlight_then_next_page_shows_no_overlays() {
    let mut h = Harness::three_pages();
    h.open("paper.pdf");
    let (x, y) = h.find("beta");
    h.select_word("beta");
    let button = h.find("[ Highlight ]");
    h.click((button.0 + 2, button.1));

    assert!(!h.app.tooltip().is_visible());
    assert_eq!(h.app.highlights().len(), 1);
    assert_eq!(h.app.highlights().overlays_for(1, h.app.render_width).len(), 1);
    assert_eq!(h.highlighted_cells(), 4);
    let buffer = h.terminal.backend().buffer();
    assert_eq!(buffer[(x, y)].bg, h.app.theme().highlight_bg);
    assert_eq!(buffer[(x, y)].symbol(), "b");

    h.key(KeyCode::Right);
    assert_eq!(h.app.current_page(), 2);
    assert!(h.screen().contains("Second page text"));
    assert!(h.app.highlights().overlays_for(2, h.app.render_width).is_empty());
    assert_eq!(h.highlighted_cells(), 0);
    let entries = h.app.highlights().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].page_number(), 1);
    assert!(h.screen().contains("Highlights (1)"));
    assert!(h.screen().contains("Page 1"));

    h.key(KeyCode::Left);
    assert_eq!(h.highlighted_cells(), 4);
}

#[test]
fn ask_ai_fills_the_panel_and_leaves_highlights_alone() {
    let asked = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&asked);
    let mut h = Harness::build(three_page_script(), |app| {
        app.with_ask_ai_hook(move |selection| sink.borrow_mut().push(selection.text().to_string()))
    });
    h.open("paper.pdf");
    h.select_word("gamma");
    h.key(KeyCode::Char('a'));

    assert!(!h.app.tooltip().is_visible());
    assert!(h.app.highlights().is_empty());
    let query = h.app.ai_query().expect("ai query");
    assert_eq!(query.text(), "gamma");
    assert_eq!(query.page_number(), 1);
    assert_eq!(asked.borrow().as_slice(), ["gamma".to_string()]);
    let panel = h.side_panel_rows().join("\n");
    assert!(panel.contains("gamma"), "{panel}");
    assert!(panel.contains("Page 1"), "{panel}");
    assert!(!panel.contains("Page 1 of"), "{panel}");
    assert!(panel.contains("Highlights (0)"));
}

fn is_clock(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 8
        && bytes.iter().enumerate().all(|(idx, b)| match idx {
            2 | 5 => *b == b':',
            _ => b.is_ascii_digit(),
        })
}

#[test]
fn highlights_panel_lists_page_and_capture_time() {
    let mut h = Harness::three_pages();
    h.open("paper.pdf");
    h.select_word("beta");
    h.key(KeyCode::Enter);
    let rows = h.side_panel_rows();
    let entry = rows
        .iter()
        .find_map(|row| row.split_once("Page 1  ").map(|(_, rest)| rest.to_string()))
        .expect("highlight row");
    assert!(entry.get(..8).is_some_and(is_clock), "{entry:?}");
    assert!(rows.iter().any(|row| row.contains("  beta")));
    assert!(rows.iter().any(|row| row.contains("Highlights (1)")));
}

#[test]
fn selection_over_wide_characters_matches_the_dragged_cells() {
    let mut h = Harness::new(Scripted::new(&[&["日本語 text here"]]));
    h.open("paper.pdf");
    h.select_word("text");
    let pending = h.app.tooltip().pending().expect("pending selection");
    assert_eq!(pending.text(), "text");
    assert_eq!(pending.position().x, 7);
    assert_eq!(pending.position().width, 4);
    h.key(KeyCode::Enter);
    assert_eq!(h.highlighted_cells(), 4);
}

#[test]
fn clicking_ask_ai_button_resolves_the_tooltip() {
    let mut h = Harness::three_pages();
    h.open("paper.pdf");
    h.select_word("delta");
    let button = h.find("[ Ask AI ]");
    h.click((button.0 + 1, button.1));
    assert_eq!(h.app.ai_query().map(|q| q.text()), Some("delta"));
    assert!(!h.app.tooltip().is_visible());
}

#[test]
fn collapsed_click_and_outside_click_clear_the_tooltip() {
    let mut h = Harness::three_pages();
    h.open("paper.pdf");
    h.select_word("beta");
    assert!(h.app.tooltip().is_visible());
    let (x, y) = h.find("delta");
    h.click((x + 1, y));
    assert!(!h.app.tooltip().is_visible());
    assert!(h.app.highlights().is_empty());

    h.select_word("beta");
    h.key(KeyCode::Esc);
    assert!(!h.app.tooltip().is_visible());
    assert!(h.app.highlights().is_empty());
}

#[test]
fn whitespace_only_selection_clears_the_tooltip() {
    let mut h = Harness::new(Scripted::new(&[&["word     word"]]));
    h.open("paper.pdf");
    h.select_word("word");
    assert!(h.app.tooltip().is_visible());
    let (x, y) = h.find("word     word");
    h.drag((x + 4, y), (x + 9, y));
    assert!(!h.app.tooltip().is_visible());
}

#[test]
fn navigation_stays_within_bounds() {
    let mut h = Harness::three_pages();
    h.open("paper.pdf");
    assert!(h.screen().contains("Page 1 of 3"));
    h.key(KeyCode::Left);
    let previous = h.find("[ Previous ]");
    h.click(previous);
    assert_eq!(h.app.current_page(), 1);

    let next = h.find("[ Next ]");
    for _ in 0..5 {
        h.click(h.find("[ Next ]"));
    }
    assert_eq!(h.app.current_page(), 3);
    assert!(!h.app.navigator().can_go_next());
    assert!(h.screen().contains("Page 3 of 3"));
    assert!(h.screen().contains("Third page"));
    h.click(next);
    assert_eq!(h.app.current_page(), 3);
    h.key(KeyCode::PageUp);
    assert_eq!(h.app.current_page(), 2);
}

#[test]
fn dropping_plain_text_is_rejected() {
    let mut h = Harness::three_pages();
    let path = h.dir.path().join("notes.txt");
    h.send(Event::Paste(format!("'{}'", path.display())));
    assert_eq!(h.app.screen(), Screen::Upload);
    assert!(h.app.file().is_none());
    assert_eq!(h.urls.live_count(), 0);
    let notice = h.app.notice().expect("notice");
    assert!(notice.contains("text/plain"));
    assert!(h.screen().contains("Click to upload or drag and drop"));
}

#[test]
fn dropping_a_pdf_opens_it() {
    let mut h = Harness::three_pages();
    let txt = h.dir.path().join("notes.txt");
    let pdf = h.dir.path().join("paper.pdf");
    h.send(Event::Paste(format!("{} {}", txt.display(), pdf.display())));
    assert_eq!(h.app.screen(), Screen::Viewer);
    assert_eq!(h.app.file().map(|f| f.name.as_str()), Some("paper.pdf"));
    assert!(h.screen().contains("Alpha beta gamma"));
}

#[test]
fn replacing_the_file_releases_its_url_once_and_clears_state() {
    let mut h = Harness::three_pages();
    h.open("paper.pdf");
    h.select_word("beta");
    h.key(KeyCode::Enter);
    h.key(KeyCode::Right);
    h.select_word("Second");
    h.key(KeyCode::Char('a'));
    assert_eq!(h.app.highlights().len(), 1);
    assert!(h.app.ai_query().is_some());
    assert_eq!(h.urls.live_count(), 1);

    let other = h.dir.path().join("other.pdf");
    h.send(Event::Paste(other.display().to_string()));
    assert_eq!(h.urls.revoked_count(), 1);
    assert_eq!(h.urls.live_count(), 1);
    assert!(h.app.highlights().is_empty());
    assert!(h.app.ai_query().is_none());
    assert_eq!(h.app.current_page(), 1);

    h.key(KeyCode::Char('o'));
    assert_eq!(h.app.screen(), Screen::Upload);
    assert_eq!(h.urls.revoked_count(), 2);
    assert_eq!(h.urls.live_count(), 0);
}

#[test]
fn load_failure_shows_a_dismissible_error() {
    let mut renderer = Scripted::new(&[&["never shown"]]);
    renderer.fail_open = true;
    let mut h = Harness::new(renderer);
    h.open("paper.pdf");
    assert!(matches!(h.app.document(), DocumentStatus::Failed { .. }));
    let screen = h.screen();
    assert!(screen.contains("Failed to load PDF."));
    assert!(screen.contains("bad xref table"));
    assert!(!screen.contains(DOCUMENT_LOADING));

    let dismiss = h.find("[ Dismiss ]");
    h.click(dismiss);
    assert!(matches!(
        h.app.document(),
        DocumentStatus::Failed {
            dismissed: true,
            ..
        }
    ));
    assert!(!h.screen().contains("Failed to load PDF."));
    assert_eq!(h.app.screen(), Screen::Viewer);
}

#[test]
fn epub_is_accepted_but_not_rendered() {
    let mut h = Harness::three_pages();
    h.open("book.epub");
    assert_eq!(h.app.screen(), Screen::Viewer);
    assert!(h.screen().contains("EPUB rendering is not supported"));
}

#[test]
fn page_failure_is_inline_and_other_pages_still_load() {
    let mut renderer = Scripted::new(&[&["first"], &["second"], &["third"]]);
    renderer.fail_pages = vec![2];
    let mut h = Harness::new(renderer);
    h.open("paper.pdf");
    h.key(KeyCode::Right);
    assert!(h.screen().contains(PAGE_FAILED));
    h.key(KeyCode::Right);
    assert!(h.screen().contains("third"));
    assert!(!h.screen().contains(PAGE_FAILED));
}

#[test]
fn selection_on_a_scrolled_page_is_page_relative() {
    let lines: Vec<String> = (1..=60).map(|n| format!("line {n}")).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let mut h = Harness::new(Scripted::new(&[&refs]));
    h.open("paper.pdf");
    for _ in 0..5 {
        h.key(KeyCode::Char('j'));
    }
    assert_eq!(h.find("line 1").1, 1);
    h.select_word("line 10");
    let pending = h.app.tooltip().pending().expect("pending");
    assert_eq!(pending.text(), "line 10");
    assert_eq!(pending.position().y, (TOP_PADDING + 9) as i32);
}

#[test]
fn picker_opens_the_selected_file() {
    let mut h = Harness::three_pages();
    h.key(KeyCode::Enter);
    assert_eq!(h.app.file().map(|f| f.name.as_str()), Some("book.epub"));
    h.key(KeyCode::Char('o'));
    let row = h.find("paper.pdf");
    h.click(row);
    assert_eq!(h.app.file().map(|f| f.name.as_str()), Some("paper.pdf"));
}

#[test]
fn help_toggles_and_swallows_keys() {
    let mut h = Harness::three_pages();
    h.open("paper.pdf");
    h.key(KeyCode::Char('?'));
    assert!(h.screen().contains("Help (Esc or ? to close)"));
    h.key(KeyCode::Right);
    assert_eq!(h.app.current_page(), 1);
    h.key(KeyCode::Esc);
    assert!(!h.screen().contains("Help (Esc or ? to close)"));
}

#[test]
fn any_button_outside_the_tooltip_dismisses_it() {
    let mut h = Harness::three_pages();
    h.open("paper.pdf");
    h.select_word("beta");
    let button = h.find("[ Ask AI ]");
    h.mouse(MouseEventKind::Down(MouseButton::Right), (button.0 + 1, button.1));
    assert!(h.app.tooltip().is_visible());
    assert!(h.app.ai_query().is_none());

    let (x, y) = h.find("delta");
    h.mouse(MouseEventKind::Down(MouseButton::Middle), (x, y));
    assert!(!h.app.tooltip().is_visible());
    assert!(h.app.highlights().is_empty());
}

#[test]
fn highlights_stay_on_the_layout_they_were_made_in() {
    let mut h = Harness::three_pages();
    h.open("paper.pdf");
    h.select_word("beta");
    h.key(KeyCode::Enter);
    assert_eq!(h.highlighted_cells(), 4);
    let wide = h.app.render_width;

    h.terminal.backend_mut().resize(100, 40);
    h.settle();
    assert_ne!(h.app.render_width, wide);
    assert_eq!(h.highlighted_cells(), 0);
    assert_eq!(h.app.highlights().len(), 1);

    h.terminal.backend_mut().resize(120, 40);
    h.settle();
    assert_eq!(h.app.render_width, wide);
    assert_eq!(h.highlighted_cells(), 4);
}
