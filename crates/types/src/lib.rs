//! Foundation types shared across the vitae rendering pipeline.
//!
//! This crate has no dependencies beyond serde and holds the data every
//! other crate agrees on: the resume input model, colors, script
//! classification, and page geometry.

pub mod color;
pub mod geometry;
pub mod resume;
pub mod script;

pub use color::Rgb;
pub use geometry::{Margins, PageSize};
pub use resume::{EducationItem, ExperienceItem, ProjectItem, Resume, SkillGroup};
pub use script::Script;
