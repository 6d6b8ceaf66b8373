use std::path::{Path, PathBuf};

use vitae_font::{DiskFontCache, FontResolver};
use vitae_layout::LayoutEngine;
use vitae_render::{DocumentAssembler, DocumentMeta, RenderedDocument};
use vitae_style::{FontFamilySpec, ThemeConfig, ThemeRegistry};
use vitae_text::TextMeasurer;
use vitae_types::{PageSize, Resume};

use crate::error::ExportError;
use crate::profile::{merge_profile, NoProfile, ProfileProvider};

/// Explicit engine configuration for renders.
///
/// Every render call goes through an `Exporter` built for a theme, page
/// size, font family, and cache location; there is no ambient global
/// state, so two exporters with independent caches can render in
/// parallel.
pub struct Exporter {
    theme: &'static ThemeConfig,
    page_size: PageSize,
    family: FontFamilySpec,
    resolver: FontResolver,
    measurer: TextMeasurer,
    profile: Box<dyn ProfileProvider>,
}

impl std::fmt::Debug for Exporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exporter")
            .field("theme", &self.theme)
            .field("page_size", &self.page_size)
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl Exporter {
    pub fn builder() -> ExporterBuilder {
        ExporterBuilder::new()
    }

    pub fn theme(&self) -> &'static ThemeConfig {
        self.theme
    }

    /// Renders the resume to a PDF byte stream.
    ///
    /// Fails fast on a structurally invalid record; anything font-related
    /// degrades instead of failing.
    pub fn export(&self, resume: &Resume) -> Result<Vec<u8>, ExportError> {
        let resume = merge_profile(resume, self.profile.as_ref());
        resume.validate().map_err(ExportError::InvalidResume)?;

        log::info!(
            "rendering resume for '{}' with theme '{}' on {}",
            resume.name,
            self.theme.id.name(),
            self.page_size.name()
        );

        let pages = LayoutEngine::new(
            self.theme,
            self.page_size,
            &self.family,
            &self.resolver,
            self.measurer,
        )
        .run(&resume);

        let meta = DocumentMeta::new(format!("{} - Resume", resume.name), resume.name.clone());
        let document = RenderedDocument { pages, meta };
        Ok(DocumentAssembler::assemble(&document)?)
    }

    pub fn export_to_file(&self, resume: &Resume, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let bytes = self.export(resume)?;
        std::fs::write(path.as_ref(), bytes)?;
        log::info!("wrote {}", path.as_ref().display());
        Ok(())
    }

    /// Drops every persisted font program. The next render repopulates
    /// lazily.
    pub fn clear_font_cache(&self) -> Result<(), ExportError> {
        self.resolver.cache().clear()?;
        Ok(())
    }
}

/// Builder for [`Exporter`]. Theme and page-size validation happens in
/// [`build`](ExporterBuilder::build), before any drawing.
pub struct ExporterBuilder {
    theme: String,
    page_size: PageSize,
    font_family: Option<String>,
    cache_dir: Option<PathBuf>,
    remote_url: Option<Option<String>>,
    system_fonts: bool,
    profile: Option<Box<dyn ProfileProvider>>,
}

impl ExporterBuilder {
    fn new() -> Self {
        Self {
            theme: "minimalist".to_string(),
            page_size: PageSize::default(),
            font_family: None,
            cache_dir: None,
            remote_url: None,
            system_fonts: true,
            profile: None,
        }
    }

    pub fn theme(mut self, name: impl Into<String>) -> Self {
        self.theme = name.into();
        self
    }

    pub fn page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Optional font-family override; assets are looked up as
    /// `<Family>-Regular.ttf` / `<Family>-Bold.ttf`.
    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Disables the remote font fetch step.
    pub fn offline(mut self) -> Self {
        self.remote_url = Some(None);
        self
    }

    pub fn remote_font_url(mut self, url: impl Into<String>) -> Self {
        self.remote_url = Some(Some(url.into()));
        self
    }

    pub fn system_fonts(mut self, enable: bool) -> Self {
        self.system_fonts = enable;
        self
    }

    pub fn profile_provider(mut self, provider: Box<dyn ProfileProvider>) -> Self {
        self.profile = Some(provider);
        self
    }

    pub fn build(self) -> Result<Exporter, ExportError> {
        let theme = ThemeRegistry::by_name(&self.theme).ok_or_else(|| ExportError::UnknownTheme {
            name: self.theme.clone(),
            available: ThemeRegistry::names().join(", "),
        })?;

        let cache = match self.cache_dir {
            Some(dir) => DiskFontCache::new(dir),
            None => DiskFontCache::default_location(),
        };
        let mut resolver = FontResolver::with_cache(cache).with_system_fonts(self.system_fonts);
        if let Some(remote) = self.remote_url {
            resolver = resolver.with_remote_url(remote);
        }

        let family = self
            .font_family
            .as_deref()
            .map(FontFamilySpec::for_family)
            .unwrap_or_default();

        Ok(Exporter {
            theme,
            page_size: self.page_size,
            family,
            resolver,
            measurer: TextMeasurer::default(),
            profile: self.profile.unwrap_or_else(|| Box::new(NoProfile)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_fails_at_build_time() {
        let err = Exporter::builder().theme("vaporwave").build().unwrap_err();
        match err {
            ExportError::UnknownTheme { name, available } => {
                assert_eq!(name, "vaporwave");
                assert!(available.contains("modern"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_resume_fails_before_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::builder()
            .cache_dir(dir.path().join("fonts"))
            .offline()
            .system_fonts(false)
            .build()
            .unwrap();
        let err = exporter.export(&Resume::default()).unwrap_err();
        assert!(matches!(err, ExportError::InvalidResume(_)));
    }
}
