use std::path::{Path, PathBuf};

use arboard::Clipboard;
use log::warn;
use viewer_core::{
    config::Settings,
    render::Generation,
    types::{SelectedFile, TextSelection},
    upload::list_candidates,
    HighlightStore, ObjectUrl, ObjectUrls, PageNavigator, RenderWorker, TooltipState,
};

use crate::theme::Theme;

use super::types::{
    AskAiHook, DocumentStatus, Drag, HitAreas, Notice, PageStatus, Picker, Screen,
};

pub struct App {
    pub(super) settings: Settings,
    pub(super) theme: Theme,
    pub(super) urls: ObjectUrls,
    pub(super) worker: RenderWorker,
    pub(super) generation: Generation,
    pub(super) file: Option<SelectedFile>,
    pub(super) object_url: Option<ObjectUrl>,
    pub(super) document: DocumentStatus,
    pub(super) page: PageStatus,
    pub(super) nav: PageNavigator,
    /// Width the current page was requested at.
    pub(super) render_width: u16,
    pub(super) scroll: u16,
    pub(super) drag: Option<Drag>,
    pub(super) tooltip: TooltipState,
    pub(super) highlights: HighlightStore,
    pub(super) ai_query: Option<TextSelection>,
    pub(super) ask_ai_hook: Option<AskAiHook>,
    pub(super) notice: Option<Notice>,
    pub(super) picker: Picker,
    pub(super) show_help: bool,
    pub(super) areas: HitAreas,
    pub(super) clipboard: Option<Clipboard>,
}

impl App {
    pub fn new(settings: Settings, worker: RenderWorker, urls: ObjectUrls) -> Self {
        let render_width = settings.page_width;
        let mut app = Self {
            settings,
            theme: Theme::default(),
            urls,
            worker,
            generation: 0,
            file: None,
            object_url: None,
            document: DocumentStatus::Idle,
            page: PageStatus::Loading,
            nav: PageNavigator::default(),
            render_width,
            scroll: 0,
            drag: None,
            tooltip: TooltipState::default(),
            highlights: HighlightStore::new(),
            ai_query: None,
            ask_ai_hook: None,
            notice: None,
            picker: Picker::default(),
            show_help: false,
            areas: HitAreas::default(),
            clipboard: None,
        };
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        app.set_picker_dir(&dir);
        app
    }

    pub fn with_ask_ai_hook(mut self, hook: impl FnMut(&TextSelection) + 'static) -> Self {
        self.ask_ai_hook = Some(Box::new(hook));
        self
    }

    pub fn with_picker_dir(mut self, dir: &Path) -> Self {
        self.set_picker_dir(dir);
        self
    }

    pub(super) fn set_picker_dir(&mut self, dir: &Path) {
        self.picker.dir = dir.to_path_buf();
        self.refresh_picker();
    }

    pub(super) fn refresh_picker(&mut self) {
        self.picker.entries = match list_candidates(&self.picker.dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("cannot list {}: {}", self.picker.dir.display(), err);
                Vec::new()
            }
        };
        self.picker.selected = self
            .picker
            .selected
            .min(self.picker.entries.len().saturating_sub(1));
    }

    pub fn screen(&self) -> Screen {
        if self.file.is_some() {
            Screen::Viewer
        } else {
            Screen::Upload
        }
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn document(&self) -> &DocumentStatus {
        &self.document
    }

    pub fn page(&self) -> &PageStatus {
        &self.page
    }

    pub fn current_page(&self) -> usize {
        self.nav.current()
    }

    pub fn page_count(&self) -> usize {
        self.nav.page_count()
    }

    pub fn navigator(&self) -> PageNavigator {
        self.nav
    }

    pub fn highlights(&self) -> &HighlightStore {
        &self.highlights
    }

    pub fn ai_query(&self) -> Option<&TextSelection> {
        self.ai_query.as_ref()
    }

    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|n| n.text.as_str())
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }
}
