//! Paginated resume layout.
//!
//! One engine walks the resume data in canonical section order and draws
//! onto [`vitae_render::PageCanvas`] pages through a descending vertical
//! cursor. Themes only contribute colors, spacing, and decorative draw
//! calls; they never change the traversal or pagination rules.

mod engine;

pub use engine::{fmt_date_range, LayoutEngine, HIGHLIGHT_CAP};
