use once_cell::sync::Lazy;
use thiserror::Error;
use vitae_types::Rgb;

#[derive(Error, Debug)]
pub enum StyleError {
    #[error("theme '{theme}' has color channel out of [0,1]: {slot}")]
    ChannelOutOfRange { theme: &'static str, slot: &'static str },
    #[error("theme '{theme}' has non-positive spacing constant: {slot}")]
    BadSpacing { theme: &'static str, slot: &'static str },
}

/// Closed set of theme identifiers. Adding a theme means adding a variant
/// here and a record in the registry; there is no dynamic registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeId {
    Minimalist,
    Modern,
    Classic,
    Creative,
}

impl ThemeId {
    pub const ALL: [ThemeId; 4] = [
        ThemeId::Minimalist,
        ThemeId::Modern,
        ThemeId::Classic,
        ThemeId::Creative,
    ];

    pub fn from_name(name: &str) -> Option<ThemeId> {
        match name.to_ascii_lowercase().as_str() {
            "minimalist" => Some(ThemeId::Minimalist),
            "modern" => Some(ThemeId::Modern),
            "classic" => Some(ThemeId::Classic),
            "creative" => Some(ThemeId::Creative),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeId::Minimalist => "minimalist",
            ThemeId::Modern => "modern",
            ThemeId::Classic => "classic",
            ThemeId::Creative => "creative",
        }
    }
}

/// Decorative draw calls a theme adds around section titles. Themes share
/// one layout algorithm; this is the only thing that varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionDecoration {
    None,
    TimelineDot,
    Underline,
    Card,
}

/// Vertical rhythm constants, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    pub section_gap: f32,
    pub item_gap: f32,
    pub line_gap: f32,
    pub bullet_indent: f32,
}

/// A validated, immutable style record served by [`ThemeRegistry`].
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeConfig {
    pub id: ThemeId,
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub text: Rgb,
    pub light: Rgb,
    pub background: Rgb,
    pub spacing: Spacing,
    pub decoration: SectionDecoration,
}

impl ThemeConfig {
    pub fn validate(&self) -> Result<(), StyleError> {
        let theme = self.id.name();
        for (slot, color) in [
            ("primary", self.primary),
            ("secondary", self.secondary),
            ("accent", self.accent),
            ("text", self.text),
            ("light", self.light),
            ("background", self.background),
        ] {
            if !color.is_unit() {
                return Err(StyleError::ChannelOutOfRange { theme, slot });
            }
        }
        for (slot, value) in [
            ("section_gap", self.spacing.section_gap),
            ("item_gap", self.spacing.item_gap),
            ("line_gap", self.spacing.line_gap),
            ("bullet_indent", self.spacing.bullet_indent),
        ] {
            if value <= 0.0 {
                return Err(StyleError::BadSpacing { theme, slot });
            }
        }
        Ok(())
    }
}

const DEFAULT_SPACING: Spacing = Spacing {
    section_gap: 16.0,
    item_gap: 10.0,
    line_gap: 3.0,
    bullet_indent: 12.0,
};

static THEMES: Lazy<[ThemeConfig; 4]> = Lazy::new(|| {
    let themes = [
        ThemeConfig {
            id: ThemeId::Minimalist,
            primary: Rgb::from_u8(33, 33, 33),
            secondary: Rgb::from_u8(97, 97, 97),
            accent: Rgb::from_u8(66, 66, 66),
            text: Rgb::from_u8(33, 33, 33),
            light: Rgb::from_u8(158, 158, 158),
            background: Rgb::WHITE,
            spacing: DEFAULT_SPACING,
            decoration: SectionDecoration::None,
        },
        ThemeConfig {
            id: ThemeId::Modern,
            primary: Rgb::from_u8(44, 62, 80),
            secondary: Rgb::from_u8(52, 73, 94),
            accent: Rgb::from_u8(52, 152, 219),
            text: Rgb::from_u8(44, 62, 80),
            light: Rgb::from_u8(127, 140, 141),
            background: Rgb::WHITE,
            spacing: DEFAULT_SPACING,
            decoration: SectionDecoration::TimelineDot,
        },
        ThemeConfig {
            id: ThemeId::Classic,
            primary: Rgb::from_u8(26, 26, 46),
            secondary: Rgb::from_u8(75, 75, 105),
            accent: Rgb::from_u8(144, 12, 63),
            text: Rgb::from_u8(26, 26, 46),
            light: Rgb::from_u8(130, 130, 150),
            background: Rgb::WHITE,
            spacing: Spacing { section_gap: 18.0, ..DEFAULT_SPACING },
            decoration: SectionDecoration::Underline,
        },
        ThemeConfig {
            id: ThemeId::Creative,
            primary: Rgb::from_u8(88, 24, 69),
            secondary: Rgb::from_u8(199, 0, 57),
            accent: Rgb::from_u8(255, 87, 51),
            text: Rgb::from_u8(40, 40, 40),
            light: Rgb::from_u8(120, 120, 120),
            background: Rgb::from_u8(253, 250, 246),
            spacing: Spacing { item_gap: 12.0, ..DEFAULT_SPACING },
            decoration: SectionDecoration::Card,
        },
    ];
    for theme in &themes {
        debug_assert!(theme.validate().is_ok());
    }
    themes
});

/// Fixed registry mapping theme identifiers to validated style records.
pub struct ThemeRegistry;

impl ThemeRegistry {
    pub fn get(id: ThemeId) -> &'static ThemeConfig {
        match THEMES.iter().find(|t| t.id == id) {
            Some(theme) => theme,
            // ALL and THEMES are defined together; a miss is unreachable.
            None => &THEMES[0],
        }
    }

    pub fn by_name(name: &str) -> Option<&'static ThemeConfig> {
        ThemeId::from_name(name).map(ThemeRegistry::get)
    }

    pub fn names() -> Vec<&'static str> {
        ThemeId::ALL.iter().map(|id| id.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_theme_validates() {
        for id in ThemeId::ALL {
            let theme = ThemeRegistry::get(id);
            assert_eq!(theme.id, id);
            theme.validate().unwrap();
        }
    }

    #[test]
    fn lookup_by_name_is_case_insensitive() {
        assert!(ThemeRegistry::by_name("Modern").is_some());
        assert!(ThemeRegistry::by_name("MINIMALIST").is_some());
        assert!(ThemeRegistry::by_name("vaporwave").is_none());
    }

    #[test]
    fn registry_names_match_ids() {
        let names = ThemeRegistry::names();
        assert_eq!(names.len(), ThemeId::ALL.len());
        assert!(names.contains(&"creative"));
    }
}
