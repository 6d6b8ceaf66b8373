//! vitae: renders a structured resume record into a paginated A4/Letter
//! PDF with mixed Latin/CJK text, without a browser or OS text shaper.
//!
//! The heavy lifting lives in the member crates; this crate wires them
//! into an [`Exporter`] that an export command drives:
//!
//! ```no_run
//! use vitae::{Exporter, Resume};
//!
//! # fn main() -> Result<(), vitae::ExportError> {
//! let resume: Resume = serde_json::from_str(r#"{"name":"Ana Lee","email":"ana@x.com"}"#)?;
//! let exporter = Exporter::builder().theme("modern").build()?;
//! exporter.export_to_file(&resume, "resume.pdf")?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod exporter;
pub mod profile;

pub use error::ExportError;
pub use exporter::{Exporter, ExporterBuilder};
pub use profile::{InMemoryProfileProvider, NoProfile, ProfileDefaults, ProfileProvider};

pub use vitae_font::{DiskFontCache, FontResolver};
pub use vitae_layout::{fmt_date_range, LayoutEngine};
pub use vitae_render::{DocumentAssembler, DocumentMeta, RenderedDocument};
pub use vitae_style::{FontFamilySpec, FontWeight, ThemeConfig, ThemeId, ThemeRegistry};
pub use vitae_text::{segment, wrap, TextMeasurer};
pub use vitae_types::{
    EducationItem, ExperienceItem, PageSize, ProjectItem, Resume, Script, SkillGroup,
};

use std::path::Path;

/// Reads and parses a resume record from a JSON file.
pub fn load_resume(path: impl AsRef<Path>) -> Result<Resume, ExportError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
