use chrono::{DateTime, Utc};
use vitae_types::PageSize;

use crate::canvas::DrawOp;

/// A finished page: fixed size plus its ordered draw operations.
/// Immutable once returned by [`PageCanvas::finish`](crate::PageCanvas::finish).
#[derive(Debug, Clone)]
pub struct Page {
    pub size: PageSize,
    pub ops: Vec<DrawOp>,
}

/// Document information written into the PDF Info dictionary.
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    pub title: String,
    pub author: String,
    pub producer: String,
    pub created: DateTime<Utc>,
}

impl DocumentMeta {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            producer: concat!("vitae ", env!("CARGO_PKG_VERSION")).to_string(),
            created: Utc::now(),
        }
    }
}

/// Ordered pages plus metadata, ready for assembly.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub pages: Vec<Page>,
    pub meta: DocumentMeta,
}
