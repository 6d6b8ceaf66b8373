//! Font acquisition for the rendering pipeline.
//!
//! [`FontResolver`] turns a `(family, weight, script)` request into usable
//! font-program bytes through an ordered fallback chain, backed by an
//! on-disk content-addressed cache. Resolution is total: the terminal
//! fallback is a built-in base-14 font that always succeeds, so callers
//! never handle a missing font, only degraded coverage.

use std::sync::Arc;

use thiserror::Error;
use vitae_types::Script;

pub mod builtin;
pub mod cache;
pub mod resolver;

pub use cache::DiskFontCache;
pub use resolver::{FontOrigin, FontResolver, DEFAULT_CJK_FONT_URL};

#[derive(Error, Debug)]
pub enum FontError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP fetch failed: {0}")]
    Http(String),
    #[error("font data rejected: {0}")]
    InvalidData(String),
}

/// The binary shape of a font program, taken from its sfnt magic.
///
/// Collections cannot be embedded in a PDF font stream, so the resolver
/// rejects them outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontProgramKind {
    TrueType,
    OpenTypeCff,
}

impl FontProgramKind {
    pub fn sniff(data: &[u8]) -> Option<FontProgramKind> {
        match data.get(..4)? {
            [0x00, 0x01, 0x00, 0x00] | b"true" => Some(FontProgramKind::TrueType),
            b"OTTO" => Some(FontProgramKind::OpenTypeCff),
            _ => None,
        }
    }
}

/// Which scripts a resolved font program has glyphs for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coverage {
    pub latin: bool,
    pub cjk: bool,
    pub hangul: bool,
    pub kana: bool,
}

impl Coverage {
    /// Probes one representative codepoint per script through the cmap.
    pub fn of_face(face: &ttf_parser::Face<'_>) -> Coverage {
        let has = |c: char| face.glyph_index(c).is_some();
        Coverage {
            latin: has(Script::Latin.representative_char()),
            cjk: has(Script::Cjk.representative_char()),
            hangul: has(Script::Hangul.representative_char()),
            kana: has(Script::Kana.representative_char()),
        }
    }

    pub fn latin_only() -> Coverage {
        Coverage { latin: true, ..Coverage::default() }
    }

    pub fn covers(&self, script: Script) -> bool {
        match script {
            Script::Latin | Script::Other => self.latin,
            Script::Cjk => self.cjk,
            Script::Hangul => self.hangul,
            Script::Kana => self.kana,
        }
    }
}

/// Where a resolved font's glyphs come from.
#[derive(Debug, Clone)]
pub enum FontSource {
    /// A real font program to be embedded in the output document.
    Embedded {
        data: Arc<Vec<u8>>,
        postscript_name: String,
        kind: FontProgramKind,
    },
    /// A base-14 standard font known to every PDF viewer. No CJK glyphs.
    Builtin { base_font: &'static str },
}

/// The result of a resolution: always usable, possibly degraded.
#[derive(Debug, Clone)]
pub struct ResolvedFont {
    pub source: FontSource,
    pub origin: FontOrigin,
    pub coverage: Coverage,
}

impl ResolvedFont {
    pub fn is_embedded(&self) -> bool {
        matches!(self.source, FontSource::Embedded { .. })
    }

    /// Raw program bytes for embedded fonts.
    pub fn data(&self) -> Option<&Arc<Vec<u8>>> {
        match &self.source {
            FontSource::Embedded { data, .. } => Some(data),
            FontSource::Builtin { .. } => None,
        }
    }

    /// A stable name identifying this font inside one rendered document.
    pub fn resource_key(&self) -> &str {
        match &self.source {
            FontSource::Embedded { postscript_name, .. } => postscript_name,
            FontSource::Builtin { base_font } => base_font,
        }
    }
}

/// Extracts a PostScript-usable name from font data, trying name IDs in
/// the same order the layout engine's font library does: PostScript name,
/// full name, family name.
pub fn extract_postscript_name(data: &[u8]) -> Option<String> {
    let face = ttf_parser::Face::parse(data, 0).ok()?;

    for name_id in [
        ttf_parser::name_id::POST_SCRIPT_NAME,
        ttf_parser::name_id::FULL_NAME,
        ttf_parser::name_id::FAMILY,
    ] {
        if let Some(name) = face
            .names()
            .into_iter()
            .find(|n| n.name_id == name_id)
            .and_then(|n| n.to_string())
        {
            return Some(name.replace(' ', ""));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_program_kinds() {
        assert_eq!(
            FontProgramKind::sniff(&[0x00, 0x01, 0x00, 0x00, 0xAA]),
            Some(FontProgramKind::TrueType)
        );
        assert_eq!(FontProgramKind::sniff(b"OTTOrest"), Some(FontProgramKind::OpenTypeCff));
        // Collections are not embeddable
        assert_eq!(FontProgramKind::sniff(b"ttcfrest"), None);
        assert_eq!(FontProgramKind::sniff(b"ab"), None);
    }

    #[test]
    fn builtin_coverage_is_latin_only() {
        let cov = Coverage::latin_only();
        assert!(cov.covers(Script::Latin));
        assert!(!cov.covers(Script::Cjk));
        assert!(!cov.covers(Script::Hangul));
    }
}
