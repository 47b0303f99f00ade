use serde::{Deserialize, Serialize};

use crate::types::{ScreenRect, TextSelection, TooltipAnchor};

/// Vertical placement of the tooltip relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipPlacement {
    /// Distance from the anchor to the tooltip's top edge.
    pub offset: i32,
    /// Lowest allowed top edge.
    pub top_margin: i32,
}

impl TooltipPlacement {
    /// Terminal cells: the tooltip box is three rows tall.
    pub const CELLS: TooltipPlacement = TooltipPlacement {
        offset: 3,
        top_margin: 1,
    };
    pub const PIXELS: TooltipPlacement = TooltipPlacement {
        offset: 45,
        top_margin: 10,
    };

    pub fn top(&self, anchor: TooltipAnchor) -> i32 {
        (anchor.y - self.offset).max(self.top_margin)
    }

    /// Box of `width`x`height` centred on the anchor and kept inside `frame`.
    pub fn rect(&self, anchor: TooltipAnchor, width: u16, height: u16, frame: ScreenRect) -> ScreenRect {
        let width = width.min(frame.width);
        let half = i32::from(width) / 2;
        let max_x = frame.right() - i32::from(width);
        let x = (anchor.x - half).clamp(frame.x, max_x.max(frame.x));
        ScreenRect {
            x,
            y: self.top(anchor),
            width,
            height,
        }
    }
}

impl Default for TooltipPlacement {
    fn default() -> Self {
        Self::CELLS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipAction {
    Highlight,
    AskAi,
    Dismiss,
}

/// Hidden until a selection is captured; any action hides it again.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TooltipState {
    #[default]
    Hidden,
    Visible {
        selection: TextSelection,
        anchor: TooltipAnchor,
    },
}

impl TooltipState {
    /// Replaces whatever was pending.
    pub fn show(&mut self, selection: TextSelection, anchor: TooltipAnchor) {
        *self = TooltipState::Visible { selection, anchor };
    }

    pub fn hide(&mut self) {
        *self = TooltipState::Hidden;
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, TooltipState::Visible { .. })
    }

    pub fn pending(&self) -> Option<&TextSelection> {
        match self {
            TooltipState::Visible { selection, .. } => Some(selection),
            TooltipState::Hidden => None,
        }
    }

    pub fn anchor(&self) -> Option<TooltipAnchor> {
        match self {
            TooltipState::Visible { anchor, .. } => Some(*anchor),
            TooltipState::Hidden => None,
        }
    }

    /// Applies an action and hands back the pending selection for
    /// `Highlight`/`AskAi`. Always ends hidden.
    pub fn resolve(&mut self, action: TooltipAction) -> Option<TextSelection> {
        let previous = std::mem::take(self);
        match (action, previous) {
            (TooltipAction::Dismiss, _) | (_, TooltipState::Hidden) => None,
            (_, TooltipState::Visible { selection, .. }) => Some(selection),
        }
    }
}

/// Calls `dismiss` when a pointer-down lands outside `region`. Returns true
/// if it did.
pub fn dismiss_on_outside(region: ScreenRect, column: i32, row: i32, dismiss: impl FnOnce()) -> bool {
    if region.contains(column, row) {
        return false;
    }
    dismiss();
    true
}
