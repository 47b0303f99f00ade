use arboard::Clipboard;
use log::{debug, info, warn};
use viewer_core::{
    render::{RenderEvent, RenderRequest},
    types::SelectedFile,
    upload::{accept_drop, accept_path, parse_dropped_paths, UploadError},
    PageNavigator, TooltipAction,
};

use super::types::{DocumentStatus, Notice, PageStatus};
use super::App;

impl App {
    /// Replaces the open document. The previous file's object URL is
    /// released and every piece of selection state is discarded.
    pub fn open_file(&mut self, file: SelectedFile) {
        self.generation += 1;
        self.reset_document_state();
        self.object_url = None;
        info!(
            "opening {} ({}, generation {})",
            file.path.display(),
            file.mime,
            self.generation
        );
        match self.urls.create_from_path(&file.path) {
            Ok(url) => {
                self.worker.request(RenderRequest::Open {
                    generation: self.generation,
                    url: url.as_str().to_string(),
                    format: file.format,
                });
                self.object_url = Some(url);
                self.document = DocumentStatus::Loading;
            }
            Err(err) => {
                warn!("cannot read {}: {}", file.path.display(), err);
                self.document = DocumentStatus::Failed {
                    cause: err.to_string(),
                    dismissed: false,
                };
            }
        }
        self.file = Some(file);
    }

    /// Back to the upload screen.
    pub fn close_file(&mut self) {
        if let Some(file) = self.file.take() {
            info!("closing {}", file.path.display());
        }
        self.generation += 1;
        self.reset_document_state();
        self.object_url = None;
        self.document = DocumentStatus::Idle;
        self.refresh_picker();
    }

    fn reset_document_state(&mut self) {
        self.nav = PageNavigator::default();
        self.page = PageStatus::Loading;
        self.scroll = 0;
        self.drag = None;
        self.tooltip.hide();
        self.highlights.clear();
        self.ai_query = None;
    }

    /// Applies pending render events and expires the notice.
    pub fn update(&mut self) {
        loop {
            let events = self.worker.poll();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.apply_render_event(event);
            }
        }
        if self.notice.as_ref().is_some_and(Notice::expired) {
            self.notice = None;
        }
    }

    fn apply_render_event(&mut self, event: RenderEvent) {
        if event.generation() != self.generation {
            debug!(
                "ignoring event for generation {} (current {})",
                event.generation(),
                self.generation
            );
            return;
        }
        match event {
            RenderEvent::DocumentLoaded { summary, .. } => {
                info!("document ready: {} pages", summary.page_count);
                self.nav = PageNavigator::new(summary.page_count);
                self.document = DocumentStatus::Ready {
                    page_count: summary.page_count,
                    title: summary.title,
                };
                self.request_current_page();
            }
            RenderEvent::DocumentFailed { error, .. } => {
                warn!("document failed to load: {}", error);
                self.document = DocumentStatus::Failed {
                    cause: error.to_string(),
                    dismissed: false,
                };
            }
            RenderEvent::PageLoaded { page, .. } => {
                if page.page_number == self.nav.current() && page.width == self.render_width {
                    self.page = PageStatus::Ready(page.lines);
                }
            }
            RenderEvent::PageFailed {
                page_number, error, ..
            } => {
                warn!("page {} failed: {}", page_number, error);
                if page_number == self.nav.current() {
                    self.page = PageStatus::Failed;
                }
            }
        }
    }

    pub(super) fn request_current_page(&mut self) {
        if !matches!(self.document, DocumentStatus::Ready { .. }) {
            return;
        }
        self.page = PageStatus::Loading;
        self.worker.request(RenderRequest::Page {
            generation: self.generation,
            page_number: self.nav.current(),
            width: self.render_width,
        });
    }

    pub(super) fn set_render_width(&mut self, width: u16) {
        if width == 0 || width == self.render_width {
            return;
        }
        debug!("page width {} -> {}", self.render_width, width);
        self.render_width = width;
        self.drag = None;
        self.tooltip.hide();
        self.request_current_page();
    }

    pub(super) fn go_previous(&mut self) {
        if self.nav.previous() {
            self.page_changed();
        }
    }

    pub(super) fn go_next(&mut self) {
        if self.nav.next() {
            self.page_changed();
        }
    }

    fn page_changed(&mut self) {
        debug!("page {}", self.nav.current());
        self.scroll = 0;
        self.drag = None;
        self.tooltip.hide();
        self.request_current_page();
    }

    pub(super) fn scroll_by(&mut self, delta: i32) {
        let max = match &self.page {
            PageStatus::Ready(lines) => {
                let visible = self.areas.surface.map(|s| s.height).unwrap_or(0);
                u16::try_from(lines.len())
                    .unwrap_or(u16::MAX)
                    .saturating_sub(visible)
            }
            _ => 0,
        };
        let next = (i32::from(self.scroll) + delta).clamp(0, i32::from(max));
        let next = u16::try_from(next).unwrap_or(0);
        if next != self.scroll {
            self.scroll = next;
            self.tooltip.hide();
        }
    }

    /// Text pasted into the terminal: a drag-and-drop of one or more files.
    pub(super) fn handle_drop(&mut self, pasted: &str) {
        let paths = parse_dropped_paths(pasted);
        match accept_drop(&paths) {
            Ok(file) => self.open_file(file),
            Err(err) => self.reject(err),
        }
    }

    pub(super) fn open_picked(&mut self) {
        let Some(path) = self.picker.current().cloned() else {
            return;
        };
        match accept_path(&path) {
            Ok(file) => self.open_file(file),
            Err(err) => self.reject(err),
        }
    }

    fn reject(&mut self, err: UploadError) {
        info!("rejected drop: {}", err);
        if self.settings.report_rejected_drops {
            let text = match &err {
                UploadError::Empty => "Nothing to open".to_string(),
                UploadError::Unsupported { mime, .. } => {
                    format!("Unsupported file type ({mime}). Drop a PDF or EPUB file.")
                }
            };
            self.notice = Some(Notice::new(text));
        }
    }

    pub(super) fn apply_tooltip_action(&mut self, action: TooltipAction) {
        let Some(selection) = self.tooltip.resolve(action) else {
            return;
        };
        match action {
            TooltipAction::Highlight => {
                info!(
                    "highlight {} on page {}",
                    selection.id(),
                    selection.page_number()
                );
                self.highlights.push(selection, self.render_width);
            }
            TooltipAction::AskAi => {
                info!(
                    "ask AI about {} chars on page {}",
                    selection.text().len(),
                    selection.page_number()
                );
                if let Some(hook) = self.ask_ai_hook.as_mut() {
                    hook(&selection);
                }
                self.ai_query = Some(selection);
            }
            TooltipAction::Dismiss => {}
        }
    }

    pub(super) fn copy_pending(&mut self) {
        let Some(text) = self.tooltip.pending().map(|s| s.text().to_string()) else {
            return;
        };
        if self.clipboard.is_none() {
            self.clipboard = Clipboard::new().ok();
        }
        match &mut self.clipboard {
            Some(clipboard) => {
                if let Err(err) = clipboard.set_text(text) {
                    warn!("clipboard: {}", err);
                } else {
                    self.notice = Some(Notice::new("Copied selection"));
                }
            }
            None => warn!("clipboard unavailable"),
        }
    }

    pub(super) fn dismiss_error(&mut self) {
        if let DocumentStatus::Failed { dismissed, .. } = &mut self.document {
            *dismissed = true;
        }
    }

    pub(super) fn error_visible(&self) -> bool {
        matches!(
            self.document,
            DocumentStatus::Failed {
                dismissed: false,
                ..
            }
        )
    }
}
