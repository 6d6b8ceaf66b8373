/// Weight of a text run. The renderer applies weight uniformly across all
/// scripts of a string, so two steps are enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

impl FontWeight {
    /// Numeric weight on the 100-900 CSS scale, used in cache keys and
    /// system font queries.
    pub fn numeric_value(self) -> u16 {
        match self {
            FontWeight::Regular => 400,
            FontWeight::Bold => 700,
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, FontWeight::Bold)
    }
}

/// Where the bundled font programs for a family live, relative to the
/// resolver's asset directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFamilySpec {
    pub display_name: String,
    pub regular_file: String,
    pub bold_file: String,
}

impl FontFamilySpec {
    /// Conventional asset layout: `<Family>-Regular.ttf` / `<Family>-Bold.ttf`
    /// with spaces stripped from the family name.
    pub fn for_family(name: &str) -> Self {
        let stem: String = name.split_whitespace().collect();
        Self {
            display_name: name.to_string(),
            regular_file: format!("{stem}-Regular.ttf"),
            bold_file: format!("{stem}-Bold.ttf"),
        }
    }

    pub fn file_for(&self, weight: FontWeight) -> &str {
        match weight {
            FontWeight::Regular => &self.regular_file,
            FontWeight::Bold => &self.bold_file,
        }
    }
}

impl Default for FontFamilySpec {
    fn default() -> Self {
        FontFamilySpec::for_family("Inter")
    }
}
