use std::sync::Arc;

use vitae_font::{FontResolver, ResolvedFont};
use vitae_style::{FontFamilySpec, FontWeight};
use vitae_types::Script;

use crate::measure::TextMeasurer;
use crate::segment::segment;

/// One script run of a mixed-script string, with its resolved font and
/// horizontal placement relative to the string origin.
#[derive(Debug, Clone)]
pub struct PositionedRun {
    pub text: String,
    pub script: Script,
    pub font: Arc<ResolvedFont>,
    pub x: f32,
    pub width: f32,
}

/// Segments a string, resolves a font per run by script, and lays the runs
/// out at increasing x offsets. Weight applies uniformly across runs.
pub fn layout_runs(
    text: &str,
    resolver: &FontResolver,
    family: &FontFamilySpec,
    weight: FontWeight,
    size: f32,
    measurer: &TextMeasurer,
) -> Vec<PositionedRun> {
    let mut x = 0.0;
    let mut runs = Vec::new();
    for run in segment(text) {
        let font = resolver.resolve(family, weight, run.script);
        let width = measurer.width(&run.text, &font, size);
        runs.push(PositionedRun {
            text: run.text,
            script: run.script,
            font,
            x,
            width,
        });
        x += width;
    }
    runs
}

/// Whole-string width: the sum of per-run widths.
pub fn text_width(
    text: &str,
    resolver: &FontResolver,
    family: &FontFamilySpec,
    weight: FontWeight,
    size: f32,
    measurer: &TextMeasurer,
) -> f32 {
    layout_runs(text, resolver, family, weight, size, measurer)
        .iter()
        .map(|run| run.width)
        .sum()
}
