use ratatui::prelude::Color;

// Tokyonight-inspired palette.
const TN_BG_ALT: Color = Color::Rgb(31, 35, 53); // #1f2335
const TN_BG_STRONG: Color = Color::Rgb(65, 72, 104); // #414868
const TN_FG: Color = Color::Rgb(192, 202, 245); // #c0caf5
const TN_COMMENT: Color = Color::Rgb(86, 95, 137); // #565f89
const TN_BLUE: Color = Color::Rgb(122, 162, 247); // #7aa2f7
const TN_YELLOW: Color = Color::Rgb(224, 175, 104); // #e0af68
const TN_RED: Color = Color::Rgb(247, 118, 142); // #f7768e

#[derive(Clone, Debug)]
pub struct Theme {
    pub header_bg: Color,
    pub header_fg: Color,
    pub footer_bg: Color,
    pub footer_fg: Color,
    pub disabled_fg: Color,
    pub selection_bg: Color,
    pub highlight_bg: Color,
    pub tooltip_bg: Color,
    pub tooltip_fg: Color,
    pub error_fg: Color,
    pub muted_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            header_bg: TN_BG_ALT,
            header_fg: TN_FG,
            footer_bg: TN_BG_STRONG,
            footer_fg: TN_BLUE,
            disabled_fg: TN_COMMENT,
            selection_bg: Color::DarkGray,
            highlight_bg: TN_YELLOW,
            tooltip_bg: TN_BG_ALT,
            tooltip_fg: TN_FG,
            error_fg: TN_RED,
            muted_fg: TN_COMMENT,
        }
    }
}
