mod common;

use common::fixtures::*;
use common::{export_resume, TestResult};
use vitae::{segment, wrap, FontResolver, TextMeasurer};

#[test]
fn cjk_heavy_resume_renders_without_error() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let resume = cjk_resume();
    assert!(resume.summary.as_ref().unwrap().chars().count() >= 2000);

    let pdf = export_resume(&resume, "modern")?;
    assert_pdf_min_pages!(pdf, 1);
    // Latin runs render through the degraded font and stay extractable.
    assert_pdf_contains_text!(pdf, "Engineer");
    Ok(())
}

#[test]
fn cjk_wrapping_never_splits_a_glyph() -> TestResult {
    let dir = tempfile::tempdir()?;
    let resolver = FontResolver::with_cache(vitae::DiskFontCache::new(dir.path().join("fonts")))
        .with_asset_dirs(Vec::new())
        .with_system_fonts(false)
        .offline();
    let measurer = TextMeasurer::default();
    let family = vitae::FontFamilySpec::default();
    let font = resolver.resolve(&family, vitae::FontWeight::Regular, vitae::Script::Cjk);

    let text = "面向全球用户的高并发服务架构设计与持续交付".repeat(100);
    let lines = wrap(&text, 480.0, &font, 10.0, &measurer);

    assert!(lines.len() > 1);
    let rejoined: String = lines.concat();
    assert_eq!(rejoined.chars().count(), text.chars().count());
    for line in &lines {
        assert!(line.chars().all(|c| text.contains(c)), "mangled line {line:?}");
    }
    Ok(())
}

#[test]
fn segmenter_round_trips_resume_strings() {
    let resume = cjk_resume();
    for s in [
        resume.name.as_str(),
        resume.summary.as_deref().unwrap(),
        "Built 高可用 services for global traffic.",
    ] {
        let rejoined: String = segment(s).iter().map(|r| r.text.as_str()).collect();
        assert_eq!(rejoined, s);
    }
}
