use thiserror::Error;

/// Errors surfaced by the export pipeline.
///
/// Only two conditions are fatal before drawing: an unregistered theme
/// name and a structurally invalid resume. Everything font- or
/// measurement-related degrades inside the pipeline and is logged instead
/// of raised.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("unknown theme '{name}'; registered themes: {available}")]
    UnknownTheme { name: String, available: String },

    #[error("unknown page size '{0}'; expected 'a4' or 'letter'")]
    UnknownPageSize(String),

    #[error("invalid resume: {0}")]
    InvalidResume(String),

    #[error("render error: {0}")]
    Render(#[from] vitae_render::RenderError),

    #[error("font cache error: {0}")]
    FontCache(#[from] vitae_font::FontError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
