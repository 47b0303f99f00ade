use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use viewer_core::selection::{SelectionPoint, SelectionRange};
use viewer_core::types::{ScreenRect, TextSelection};
use viewer_core::TooltipAction;

/// Called with the selection the user chose "Ask AI" on.
pub type AskAiHook = Box<dyn FnMut(&TextSelection)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Upload,
    Viewer,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentStatus {
    /// No file, or the file was closed.
    Idle,
    Loading,
    Ready {
        page_count: usize,
        title: Option<String>,
    },
    Failed {
        cause: String,
        dismissed: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageStatus {
    Loading,
    Ready(Vec<String>),
    Failed,
}

#[derive(Clone, Copy, Debug)]
pub(super) enum Command {
    Exit,
    ToggleHelp,
    CloseHelp,
    PreviousPage,
    NextPage,
    ScrollDown(u16),
    ScrollUp(u16),
    Tooltip(TooltipAction),
    CopySelection,
    DismissError,
    OpenUpload,
    PickerUp,
    PickerDown,
    PickerOpen,
    PickerRefresh,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Exit,
}

/// Mouse drag in progress over the page surface.
#[derive(Clone, Copy, Debug)]
pub(super) struct Drag {
    pub(super) anchor: SelectionPoint,
    pub(super) range: SelectionRange,
}

/// Rectangles from the last drawn frame, used to route mouse events.
#[derive(Clone, Debug, Default)]
pub(super) struct HitAreas {
    pub(super) surface: Option<Rect>,
    /// Screen origin of the page, moved up by the scroll offset.
    pub(super) container: Option<ScreenRect>,
    pub(super) previous: Option<Rect>,
    pub(super) next: Option<Rect>,
    pub(super) dismiss_error: Option<Rect>,
    pub(super) tooltip: Option<Rect>,
    pub(super) highlight_button: Option<Rect>,
    pub(super) ask_button: Option<Rect>,
    pub(super) picker_rows: Vec<(Rect, usize)>,
}

const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Clone, Debug)]
pub(super) struct Notice {
    pub(super) text: String,
    pub(super) shown_at: Instant,
}

impl Notice {
    pub(super) fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    pub(super) fn expired(&self) -> bool {
        self.shown_at.elapsed() >= NOTICE_TTL
    }
}

/// Files offered on the upload screen.
#[derive(Clone, Debug, Default)]
pub(super) struct Picker {
    pub(super) dir: PathBuf,
    pub(super) entries: Vec<PathBuf>,
    pub(super) selected: usize,
}

impl Picker {
    pub(super) fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(super) fn down(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1).min(self.entries.len() - 1);
        }
    }

    pub(super) fn current(&self) -> Option<&PathBuf> {
        self.entries.get(self.selected)
    }
}
