use super::types::Block;

/// Groups extracted page text into paragraphs. Blank lines separate
/// paragraphs, hard hyphens at line ends are joined, and column-aligned runs
/// are kept as preformatted blocks.
pub fn page_text_to_blocks(text: &str) -> Vec<Block> {
    let mut out = Vec::new();
    let mut lines: Vec<String> = Vec::new();
    for raw_line in text.lines() {
        let line = raw_line.trim_end();
        if line.trim().is_empty() {
            flush_lines(&mut lines, &mut out);
            continue;
        }
        lines.push(line.to_string());
    }
    flush_lines(&mut lines, &mut out);
    out
}

fn flush_lines(lines: &mut Vec<String>, out: &mut Vec<Block>) {
    if lines.is_empty() {
        return;
    }
    if is_monospace_like(lines) {
        out.push(Block::Preformatted(lines.join("\n")));
        lines.clear();
        return;
    }
    let para = lines_to_paragraph(lines);
    let cleaned = para.trim();
    if !cleaned.is_empty() {
        out.push(Block::Paragraph(cleaned.to_string()));
    }
    lines.clear();
}

fn lines_to_paragraph(lines: &[String]) -> String {
    let mut current = String::new();
    let mut hyphenated = false;
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !current.is_empty() && !hyphenated {
            current.push(' ');
        }
        hyphenated = ends_with_hard_hyphen(trimmed);
        if hyphenated {
            current.push_str(trimmed.trim_end_matches('-'));
        } else {
            current.push_str(trimmed);
        }
    }
    current
}

fn is_monospace_like(lines: &[String]) -> bool {
    if lines.len() < 2 {
        return false;
    }
    let avg_len: f32 = lines.iter().map(|l| l.len() as f32).sum::<f32>() / lines.len() as f32;
    let variance: f32 = lines
        .iter()
        .map(|l| {
            let diff = l.len() as f32 - avg_len;
            diff * diff
        })
        .sum::<f32>()
        / lines.len() as f32;
    let spaced = lines.iter().filter(|l| l.contains("  ")).count();
    variance < 16.0 && spaced as f32 / lines.len() as f32 > 0.4
}

fn ends_with_hard_hyphen(s: &str) -> bool {
    s.ends_with('-') && !s.ends_with("--")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_split_paragraphs() {
        let blocks = page_text_to_blocks("First line\ncontinues here\n\nSecond para\n");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("First line continues here".into()),
                Block::Paragraph("Second para".into()),
            ]
        );
    }

    #[test]
    fn hard_hyphens_are_joined() {
        let blocks = page_text_to_blocks("inter-\nnational\n");
        assert_eq!(blocks, vec![Block::Paragraph("international".into())]);
    }

    #[test]
    fn aligned_columns_stay_preformatted() {
        let text = "name    value\nalpha   1    \nbeta    2    \n";
        let blocks = page_text_to_blocks(text);
        assert!(matches!(blocks.as_slice(), [Block::Preformatted(_)]));
    }

    #[test]
    fn empty_text_yields_no_blocks() {
        assert!(page_text_to_blocks("  \n\n ").is_empty());
    }
}
