//! The terminal fallback: base-14 Helvetica.
//!
//! Viewers ship these fonts, so nothing is embedded and resolution can
//! never fail. Glyph coverage is WinAnsi Latin only; CJK codepoints render
//! as notdef, which is exactly the documented degraded mode.

pub const BASE_FONT_REGULAR: &str = "Helvetica";
pub const BASE_FONT_BOLD: &str = "Helvetica-Bold";

/// Helvetica AFM advance widths for U+0020..U+007E, in 1/1000 em.
const WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278,
    584, 584, 584, 556, 1015, 667, 667, 722, 722, 667, 611, 778, 722, 278,
    500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556,
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Advance width of one codepoint in 1/1000 em.
///
/// Codepoints outside the table get a full em when they would need CJK
/// glyphs (keeps degraded CJK layout roughly monospaced) and a half em
/// otherwise.
pub fn advance_width(c: char) -> u16 {
    let code = c as u32;
    if (0x20..=0x7E).contains(&code) {
        WIDTHS[(code - 0x20) as usize]
    } else if vitae_types::Script::of(c).needs_cjk_font() {
        1000
    } else {
        500
    }
}
