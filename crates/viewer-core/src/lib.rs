pub mod config;
pub mod highlights;
pub mod lease;
pub mod navigation;
pub mod pdf;
pub mod render;
pub mod selection;
pub mod tooltip;
pub mod types;
pub mod upload;

pub use highlights::{HighlightStore, Overlay};
pub use lease::{ObjectUrl, ObjectUrls};
pub use navigation::PageNavigator;
pub use render::{
    DocumentRenderer, DocumentSummary, RenderError, RenderEvent, RenderRequest, RenderWorker,
};
pub use tooltip::{TooltipAction, TooltipPlacement, TooltipState};
pub use types::{
    DocumentFormat, Position, ScreenRect, SelectedFile, SelectionId, TextSelection, TooltipAnchor,
};
