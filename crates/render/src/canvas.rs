use std::sync::Arc;

use vitae_font::ResolvedFont;
use vitae_types::{PageSize, Rgb};

use crate::document::Page;

/// One recorded drawing operation. Coordinates are PDF points with the
/// origin at the lower-left corner of the page.
#[derive(Debug, Clone)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        color: Rgb,
        font: Arc<ResolvedFont>,
        text: String,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    StrokeLine {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Rgb,
    },
    FillCircle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Rgb,
    },
}

/// Records draw operations for one page.
#[derive(Debug)]
pub struct PageCanvas {
    size: PageSize,
    ops: Vec<DrawOp>,
}

impl PageCanvas {
    pub fn new(size: PageSize) -> Self {
        Self { size, ops: Vec::new() }
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    pub fn text(
        &mut self,
        x: f32,
        y: f32,
        size: f32,
        color: Rgb,
        font: Arc<ResolvedFont>,
        text: impl Into<String>,
    ) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.ops.push(DrawOp::Text { x, y, size, color, font, text });
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.ops.push(DrawOp::FillRect { x, y, width, height, color });
    }

    pub fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Rgb) {
        self.ops.push(DrawOp::StrokeLine { x1, y1, x2, y2, width, color });
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb) {
        self.ops.push(DrawOp::FillCircle { cx, cy, radius, color });
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Seals the canvas into an immutable page.
    pub fn finish(self) -> Page {
        Page { size: self.size, ops: self.ops }
    }
}
