#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use vitae::{Exporter, PageSize, Resume};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods.
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging.
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Renders a resume with a hermetic exporter: temp font cache, no network,
/// no system font probing, so results do not depend on the host machine.
pub fn export_resume(resume: &Resume, theme: &str) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    export_resume_sized(resume, theme, PageSize::A4)
}

pub fn export_resume_sized(
    resume: &Resume,
    theme: &str,
    page_size: PageSize,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let exporter = Exporter::builder()
        .theme(theme)
        .page_size(page_size)
        .cache_dir(dir.path().join("fonts"))
        .offline()
        .system_fonts(false)
        .build()?;
    let bytes = exporter.export(resume)?;
    GeneratedPdf::from_bytes(bytes)
}
