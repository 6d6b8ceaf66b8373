use lopdf::Document as LopdfDocument;

/// Extract all text content from a PDF document.
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// Extract BaseFont names referenced from page resources.
pub fn extract_font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut fonts = std::collections::HashSet::new();

    for (_page_num, page_id) in doc.get_pages() {
        let Ok(page_dict) = doc.get_object(page_id).and_then(|o| o.as_dict()) else {
            continue;
        };
        let Ok(resources) = page_dict.get(b"Resources") else { continue };
        let resources_dict = if let Ok(ref_id) = resources.as_reference() {
            doc.get_object(ref_id).ok().and_then(|o| o.as_dict().ok())
        } else {
            resources.as_dict().ok()
        };
        let Some(resources) = resources_dict else { continue };
        let Ok(font_dict) = resources.get(b"Font").and_then(|f| f.as_dict()) else {
            continue;
        };
        for (_name, value) in font_dict.iter() {
            let entry = if let Ok(ref_id) = value.as_reference() {
                doc.get_object(ref_id).ok().and_then(|o| o.as_dict().ok())
            } else {
                value.as_dict().ok()
            };
            if let Some(entry) = entry {
                if let Ok(base_font) = entry.get(b"BaseFont").and_then(|b| b.as_name()) {
                    fonts.insert(String::from_utf8_lossy(base_font).to_string());
                }
            }
        }
    }

    fonts.into_iter().collect()
}

/// Get page dimensions (width, height) in points.
pub fn get_page_dimensions(doc: &LopdfDocument, page_num: u32) -> Option<(f32, f32)> {
    let pages = doc.get_pages();
    let page_id = pages.get(&page_num)?;
    let page_dict = doc.get_object(*page_id).ok()?.as_dict().ok()?;
    let media_box = page_dict.get(b"MediaBox").ok()?.as_array().ok()?;
    if media_box.len() < 4 {
        return None;
    }
    let width = media_box[2].as_float().ok()? - media_box[0].as_float().ok()?;
    let height = media_box[3].as_float().ok()? - media_box[1].as_float().ok()?;
    Some((width, height))
}

/// The document Info dictionary's Title entry, when readable as text.
pub fn info_title(doc: &LopdfDocument) -> Option<String> {
    let info_ref = doc.trailer.get(b"Info").ok()?;
    let info = if let Ok(ref_id) = info_ref.as_reference() {
        doc.get_object(ref_id).ok()?.as_dict().ok()?
    } else {
        info_ref.as_dict().ok()?
    };
    match info.get(b"Title").ok()? {
        lopdf::Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).to_string()),
        _ => None,
    }
}

// ============================================================================
// Fluent Assertion Macros
// ============================================================================

/// Assert that PDF contains specific text.
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF.
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert minimum number of pages.
#[macro_export]
macro_rules! assert_pdf_min_pages {
    ($pdf:expr, $min:expr) => {
        assert!(
            $pdf.page_count() >= $min,
            "Expected at least {} pages, got {}",
            $min,
            $pdf.page_count()
        );
    };
}

/// Assert that PDF references a font matching a pattern.
#[macro_export]
macro_rules! assert_pdf_has_font {
    ($pdf:expr, $pattern:expr) => {
        let fonts = $crate::common::pdf_assertions::extract_font_names(&$pdf.doc);
        assert!(
            fonts.iter().any(|f| f.contains($pattern)),
            "PDF should contain font matching '{}', fonts found: {:?}",
            $pattern,
            fonts
        );
    };
}

/// Assert page dimensions within tolerance.
#[macro_export]
macro_rules! assert_pdf_page_size {
    ($pdf:expr, $page:expr, $width:expr, $height:expr) => {
        let dims = $crate::common::pdf_assertions::get_page_dimensions(&$pdf.doc, $page);
        assert!(dims.is_some(), "Could not get dimensions for page {}", $page);
        let (w, h) = dims.unwrap();
        assert!(
            (w - $width).abs() < 1.0,
            "Page {} width expected ~{}, got {}",
            $page,
            $width,
            w
        );
        assert!(
            (h - $height).abs() < 1.0,
            "Page {} height expected ~{}, got {}",
            $page,
            $height,
            h
        );
    };
}
