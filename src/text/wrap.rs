//! Word wrapping by measured width.
//!
//! Widths are terminal-style column counts (`unicode-width`) scaled by a
//! per-column advance, so a paint with `advance = 9.0` measures "abc" as 27.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// One wrapped line and its measured width.
#[derive(Clone, Debug, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    pub width: f32,
}

/// Measured width of `s`.
#[must_use]
pub fn measure(s: &str, advance: f32) -> f32 {
    UnicodeWidthStr::width(s) as f32 * advance
}

/// Wrap `text` so each line fits `max_width`.
///
/// Explicit newlines always break. Words longer than a line are split at
/// grapheme boundaries. A line never ends in whitespace and continuation
/// lines never start with it.
#[must_use]
pub fn wrap_text(text: &str, max_width: f32, advance: f32) -> Vec<WrappedLine> {
    let mut lines = Vec::new();
    if text.is_empty() {
        return lines;
    }
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph.trim_end_matches('\r'), max_width, advance, &mut lines);
    }
    lines
}

fn wrap_paragraph(paragraph: &str, max_width: f32, advance: f32, out: &mut Vec<WrappedLine>) {
    let first_line = out.len();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in paragraph.split_word_bounds() {
        let width = measure(word, advance);
        let is_ws = word.chars().all(char::is_whitespace);

        if is_ws && current.is_empty() && out.len() > first_line {
            continue;
        }
        if current_width + width <= max_width {
            current.push_str(word);
            current_width += width;
            continue;
        }
        if is_ws {
            flush(&mut current, &mut current_width, advance, out);
            continue;
        }
        if !current.is_empty() {
            flush(&mut current, &mut current_width, advance, out);
        }
        if width <= max_width {
            current.push_str(word);
            current_width = width;
            continue;
        }
        for grapheme in word.graphemes(true) {
            let gw = measure(grapheme, advance);
            if current_width + gw > max_width && !current.is_empty() {
                flush(&mut current, &mut current_width, advance, out);
            }
            current.push_str(grapheme);
            current_width += gw;
        }
    }

    if !current.is_empty() || out.len() == first_line {
        flush(&mut current, &mut current_width, advance, out);
    }
}

fn flush(current: &mut String, current_width: &mut f32, advance: f32, out: &mut Vec<WrappedLine>) {
    let text = current.trim_end().to_string();
    let width = measure(&text, advance);
    out.push(WrappedLine { text, width });
    current.clear();
    *current_width = 0.0;
}
