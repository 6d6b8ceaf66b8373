use rustybuzz::{Feature, UnicodeBuffer};
use ttf_parser::Tag;
use vitae_font::{builtin, FontSource, ResolvedFont};
use vitae_types::script;

/// Empirical shrink applied when digits are interleaved with CJK glyphs;
/// some CJK fonts report slightly generous digit advances.
pub const CJK_DIGIT_SHRINK: f32 = 0.95;

/// Half an em per codepoint, the estimate used when measurement fails.
const ESTIMATE_FACTOR: f32 = 0.5;

/// Answers width-of-string-at-size queries against a resolved font.
///
/// Measurement never fails: embedded fonts are shaped with rustybuzz, the
/// built-in font uses its static advance table, and anything that goes
/// wrong falls back to a length-based estimate.
#[derive(Debug, Clone, Copy)]
pub struct TextMeasurer {
    pub cjk_digit_shrink: f32,
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self { cjk_digit_shrink: CJK_DIGIT_SHRINK }
    }
}

impl TextMeasurer {
    pub fn width(&self, text: &str, font: &ResolvedFont, size: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        match &font.source {
            FontSource::Builtin { .. } => builtin_width(text, size),
            FontSource::Embedded { data, .. } => match shaped_width(data, text, size) {
                Some(width) => width * self.shrink_for(text),
                None => {
                    log::debug!("measurement failed for {:?}; using estimate", text);
                    estimate(text, size)
                }
            },
        }
    }

    /// Per-codepoint advance widths, for the codepoint-wise wrapper. The
    /// face is parsed once for the whole string.
    pub fn char_widths(&self, text: &str, font: &ResolvedFont, size: f32) -> Vec<f32> {
        match &font.source {
            FontSource::Builtin { .. } => text
                .chars()
                .map(|c| builtin::advance_width(c) as f32 / 1000.0 * size)
                .collect(),
            FontSource::Embedded { data, .. } => match ttf_parser::Face::parse(data, 0) {
                Ok(face) => {
                    let upem = face.units_per_em() as f32;
                    text.chars()
                        .map(|c| {
                            face.glyph_index(c)
                                .and_then(|gid| face.glyph_hor_advance(gid))
                                .map(|adv| adv as f32 / upem * size)
                                .unwrap_or(size * ESTIMATE_FACTOR)
                        })
                        .collect()
                }
                Err(_) => text.chars().map(|_| size * ESTIMATE_FACTOR).collect(),
            },
        }
    }

    fn shrink_for(&self, text: &str) -> f32 {
        let has_digit = text.chars().any(|c| c.is_ascii_digit());
        if has_digit && script::contains_cjk(text) {
            self.cjk_digit_shrink
        } else {
            1.0
        }
    }
}

fn builtin_width(text: &str, size: f32) -> f32 {
    text.chars()
        .map(|c| builtin::advance_width(c) as f32 / 1000.0 * size)
        .sum()
}

fn estimate(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * ESTIMATE_FACTOR
}

fn shaped_width(data: &[u8], text: &str, size: f32) -> Option<f32> {
    let face = rustybuzz::Face::from_slice(data, 0)?;
    let upem = face.units_per_em() as f32;
    if upem <= 0.0 {
        return None;
    }
    let scale = size / upem;

    let features = [
        Feature::new(Tag::from_bytes(b"liga"), 1, ..),
        Feature::new(Tag::from_bytes(b"kern"), 1, ..),
    ];
    let mut buffer = UnicodeBuffer::new();
    buffer.push_str(text);
    buffer.guess_segment_properties();
    let glyphs = rustybuzz::shape(&face, &features, buffer);

    let total: i32 = glyphs.glyph_positions().iter().map(|p| p.x_advance).sum();
    Some(total as f32 * scale)
}
