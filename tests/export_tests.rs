mod common;

use common::fixtures::*;
use common::{export_resume, export_resume_sized, TestResult};
use vitae::{
    ExportError, Exporter, InMemoryProfileProvider, PageSize, ProfileDefaults, Resume,
    ThemeRegistry,
};

#[test]
fn minimal_resume_renders_one_page_for_every_theme() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    for theme in ThemeRegistry::names() {
        let pdf = export_resume(&minimal_resume(), theme)?;
        assert_pdf_page_count!(pdf, 1);
        assert_pdf_contains_text!(pdf, "Ana Lee");
    }
    Ok(())
}

#[test]
fn ana_lee_scenario_renders_expected_content() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let pdf = export_resume(&ana_lee_resume(), "minimalist")?;
    assert_pdf_page_count!(pdf, 1);
    assert_pdf_contains_text!(pdf, "Ana Lee");
    assert_pdf_contains_text!(pdf, "Engineer, Acme");
    assert_pdf_contains_text!(pdf, "2020-01 - Now");
    assert_pdf_contains_text!(pdf, "Shipped v2");
    Ok(())
}

#[test]
fn full_resume_renders_all_sections() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let pdf = export_resume(&full_resume(), "classic")?;
    assert_pdf_contains_text!(pdf, "Summary");
    assert_pdf_contains_text!(pdf, "Education");
    assert_pdf_contains_text!(pdf, "Experience");
    assert_pdf_contains_text!(pdf, "Projects");
    assert_pdf_contains_text!(pdf, "Skills");
    assert_pdf_contains_text!(pdf, "Instituto Superior Tecnico");
    assert_pdf_contains_text!(pdf, "Languages");
    Ok(())
}

#[test]
fn page_sizes_match_their_formats() -> TestResult {
    let a4 = export_resume_sized(&minimal_resume(), "minimalist", PageSize::A4)?;
    assert_pdf_page_size!(a4, 1, 595.0, 842.0);

    let letter = export_resume_sized(&minimal_resume(), "minimalist", PageSize::Letter)?;
    assert_pdf_page_size!(letter, 1, 612.0, 792.0);
    Ok(())
}

#[test]
fn degraded_font_is_the_base_14_standard_font() -> TestResult {
    // Hermetic export: no assets, no system fonts, no network.
    let pdf = export_resume(&minimal_resume(), "minimalist")?;
    assert_pdf_has_font!(pdf, "Helvetica");
    Ok(())
}

#[test]
fn unknown_theme_fails_fast() {
    let err = Exporter::builder().theme("vaporwave").build().unwrap_err();
    assert!(matches!(err, ExportError::UnknownTheme { .. }));
}

#[test]
fn structurally_invalid_resume_fails_fast() -> TestResult {
    let dir = tempfile::tempdir()?;
    let exporter = Exporter::builder()
        .cache_dir(dir.path().join("fonts"))
        .offline()
        .system_fonts(false)
        .build()?;

    let err = exporter.export(&Resume::default()).unwrap_err();
    assert!(matches!(err, ExportError::InvalidResume(_)));
    Ok(())
}

#[test]
fn profile_provider_fills_missing_basics() -> TestResult {
    let dir = tempfile::tempdir()?;
    let provider = InMemoryProfileProvider::new(ProfileDefaults {
        email: Some("profile@x.com".into()),
        location: Some("Lisbon, PT".into()),
        ..ProfileDefaults::default()
    });
    let exporter = Exporter::builder()
        .cache_dir(dir.path().join("fonts"))
        .offline()
        .system_fonts(false)
        .profile_provider(Box::new(provider))
        .build()?;

    let resume = Resume {
        name: "Ana Lee".into(),
        ..Resume::default()
    };
    let pdf = common::GeneratedPdf::from_bytes(exporter.export(&resume)?)?;
    assert_pdf_contains_text!(pdf, "profile@x.com");
    assert_pdf_contains_text!(pdf, "Lisbon, PT");
    Ok(())
}

#[test]
fn document_metadata_carries_title_and_author() -> TestResult {
    let pdf = export_resume(&minimal_resume(), "modern")?;
    let title = common::pdf_assertions::info_title(&pdf.doc);
    assert_eq!(title.as_deref(), Some("Ana Lee - Resume"));
    Ok(())
}
