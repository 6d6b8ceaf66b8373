use vitae_font::ResolvedFont;
use vitae_types::script::contains_cjk;

use crate::measure::TextMeasurer;

/// Wraps `text` into lines no wider than `max_width`.
///
/// Text containing any CJK-range codepoint wraps per codepoint; everything
/// else wraps per whitespace-delimited word. Both paths accumulate
/// greedily and flush when the next unit would overflow a non-empty line.
/// A single unit wider than `max_width` is placed alone on its own line,
/// unsplit — the one documented overflow case. Embedded newlines are hard
/// breaks.
pub fn wrap(
    text: &str,
    max_width: f32,
    font: &ResolvedFont,
    size: f32,
    measurer: &TextMeasurer,
) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for segment in text.split('\n') {
        if segment.trim().is_empty() {
            lines.push(String::new());
        } else if contains_cjk(segment) {
            wrap_codepoints(segment, max_width, font, size, measurer, &mut lines);
        } else {
            wrap_words(segment, max_width, font, size, measurer, &mut lines);
        }
    }
    lines
}

fn wrap_codepoints(
    segment: &str,
    max_width: f32,
    font: &ResolvedFont,
    size: f32,
    measurer: &TextMeasurer,
    lines: &mut Vec<String>,
) {
    let widths = measurer.char_widths(segment, font, size);
    let mut line = String::new();
    let mut line_width = 0.0;

    for (c, width) in segment.chars().zip(widths) {
        if !line.is_empty() && line_width + width > max_width {
            lines.push(std::mem::take(&mut line));
            line_width = 0.0;
            // a break swallows the space that caused it
            if c == ' ' {
                continue;
            }
        }
        line.push(c);
        line_width += width;
    }
    if !line.is_empty() {
        lines.push(line);
    }
}

fn wrap_words(
    segment: &str,
    max_width: f32,
    font: &ResolvedFont,
    size: f32,
    measurer: &TextMeasurer,
    lines: &mut Vec<String>,
) {
    let space_width = measurer.width(" ", font, size);
    let mut line = String::new();
    let mut line_width = 0.0;

    for word in segment.split_whitespace() {
        let word_width = measurer.width(word, font, size);
        if line.is_empty() {
            line.push_str(word);
            line_width = word_width;
        } else if line_width + space_width + word_width > max_width {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_width = word_width;
        } else {
            line.push(' ');
            line.push_str(word);
            line_width += space_width + word_width;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
}
