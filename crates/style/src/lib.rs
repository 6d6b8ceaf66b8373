//! Static styling data: the fixed theme registry and font family specs.

pub mod font;
pub mod theme;

pub use font::{FontFamilySpec, FontWeight};
pub use theme::{SectionDecoration, Spacing, StyleError, ThemeConfig, ThemeId, ThemeRegistry};
