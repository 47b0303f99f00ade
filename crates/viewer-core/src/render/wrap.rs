use unicode_linebreak::{linebreaks, BreakOpportunity};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::pdf::Block;

/// Lays blocks out as display lines, one blank line between blocks.
pub fn layout_blocks(blocks: &[Block], width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut out = Vec::new();
    for (idx, block) in blocks.iter().enumerate() {
        if idx > 0 {
            out.push(String::new());
        }
        match block {
            Block::Paragraph(text) => out.extend(wrap_text(text, width)),
            Block::Preformatted(text) => {
                for line in text.lines() {
                    out.extend(hard_split(line, width));
                }
            }
        }
    }
    out
}

/// Greedy word wrap by display width. Tokens wider than `width` break at
/// line-break opportunities first and are cut only when those run out.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;
    for token in text.split_whitespace() {
        for (idx, part) in split_token(token, width).into_iter().enumerate() {
            let part_len = part.width();
            // Pieces of one token are joined without a space.
            let gap = usize::from(idx == 0 && line_len > 0);
            if line_len > 0 && line_len + gap + part_len > width {
                out.push(std::mem::take(&mut line));
                line_len = 0;
            } else if gap == 1 {
                line.push(' ');
                line_len += 1;
            }
            line.push_str(&part);
            line_len += part_len;
        }
    }
    if !line.is_empty() {
        out.push(line);
    }
    out
}

fn split_token(token: &str, width: usize) -> Vec<String> {
    if token.width() <= width {
        return vec![token.to_string()];
    }
    let mut parts = Vec::new();
    let mut start = 0usize;
    let mut last_break = 0usize;
    for (idx, opp) in linebreaks(token) {
        if !matches!(opp, BreakOpportunity::Mandatory | BreakOpportunity::Allowed) {
            continue;
        }
        if token[start..idx].width() > width && last_break > start {
            parts.push(token[start..last_break].to_string());
            start = last_break;
        }
        last_break = idx;
    }
    let mut out = Vec::new();
    parts.push(token[start..].to_string());
    for part in parts {
        out.extend(hard_split(&part, width));
    }
    out
}

/// Cuts on grapheme boundaries so no piece is wider than `width` cells. A
/// single grapheme wider than `width` gets a piece of its own.
fn hard_split(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    let mut out = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0usize;
    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if piece_width > 0 && piece_width + w > width {
            out.push(std::mem::take(&mut piece));
            piece_width = 0;
        }
        piece.push_str(grapheme);
        piece_width += w;
    }
    if !piece.is_empty() {
        out.push(piece);
    }
    out
}
