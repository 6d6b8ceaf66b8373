use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use lopdf::{dictionary, Dictionary, Document as PdfDocument, Object, ObjectId, Stream, StringFormat};
use vitae_font::{builtin, FontProgramKind, FontSource, ResolvedFont};
use vitae_types::Rgb;

use crate::canvas::DrawOp;
use crate::document::{DocumentMeta, Page, RenderedDocument};
use crate::RenderError;

const BEZIER_CIRCLE_K: f32 = 0.552_284_75;

/// Finalizes rendered pages into a PDF byte stream.
///
/// Embedded fonts become Type0 composite fonts with Identity-H encoding:
/// content streams address glyphs by glyph id, a ToUnicode CMap maps the
/// used glyphs back to text, and a W array carries their advances. The
/// built-in degraded font is written as a non-embedded base-14 Type1 font
/// with WinAnsi encoding.
pub struct DocumentAssembler;

impl DocumentAssembler {
    pub fn assemble(document: &RenderedDocument) -> Result<Vec<u8>, RenderError> {
        if document.pages.is_empty() {
            return Err(RenderError::Other("document has no pages".into()));
        }

        let mut doc = PdfDocument::with_version("1.7");
        let pages_id = doc.new_object_id();

        let fonts = collect_fonts(&document.pages);

        let mut font_dict = Dictionary::new();
        for resource in fonts.values() {
            let font_id = write_font_object(&mut doc, resource);
            font_dict.set(resource.res_name.as_bytes(), Object::Reference(font_id));
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => Object::Dictionary(font_dict),
        });

        let mut kids = Vec::with_capacity(document.pages.len());
        for page in &document.pages {
            let content = page_content(page, &fonts);
            let content_id = doc.add_object(Object::Stream(Stream::new(Dictionary::new(), content)));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "MediaBox" => vec![
                    0.0.into(),
                    0.0.into(),
                    page.size.width().into(),
                    page.size.height().into(),
                ],
                "Contents" => Object::Reference(content_id),
                "Resources" => Object::Reference(resources_id),
            });
            kids.push(Object::Reference(page_id));
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Object::Array(kids),
                "Count" => page_count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        let info_id = doc.add_object(Object::Dictionary(info_dict(&document.meta)));
        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc.trailer.set("Info", Object::Reference(info_id));

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

struct FaceMetrics {
    ascent: i64,
    descent: i64,
    cap_height: i64,
    bbox: [i64; 4],
}

enum FontResourceKind {
    Builtin {
        base_font: &'static str,
    },
    Embedded {
        data: Arc<Vec<u8>>,
        postscript_name: String,
        program: FontProgramKind,
        /// Used codepoints mapped to their glyph ids.
        gid_map: BTreeMap<char, u16>,
        /// Advance per used glyph id, in 1/1000 em.
        widths: BTreeMap<u16, i64>,
        metrics: FaceMetrics,
    },
}

struct FontResource {
    res_name: String,
    kind: FontResourceKind,
}

/// Gathers the distinct fonts drawn across all pages, together with the
/// characters each one must cover. An embedded program that no longer
/// parses degrades to the built-in font instead of producing a broken
/// document.
fn collect_fonts(pages: &[Page]) -> BTreeMap<String, FontResource> {
    let mut used: BTreeMap<String, (Arc<ResolvedFont>, BTreeSet<char>)> = BTreeMap::new();
    for page in pages {
        for op in &page.ops {
            if let DrawOp::Text { font, text, .. } = op {
                let entry = used
                    .entry(font.resource_key().to_string())
                    .or_insert_with(|| (font.clone(), BTreeSet::new()));
                entry.1.extend(text.chars());
            }
        }
    }

    let mut resources = BTreeMap::new();
    for (index, (key, (font, chars))) in used.into_iter().enumerate() {
        let res_name = format!("F{}", index + 1);
        let kind = match &font.source {
            FontSource::Builtin { base_font } => FontResourceKind::Builtin { base_font },
            FontSource::Embedded { data, postscript_name, kind } => {
                match ttf_parser::Face::parse(data, 0) {
                    Ok(face) => {
                        let upem = face.units_per_em() as f32;
                        let scale = 1000.0 / upem;
                        let mut gid_map = BTreeMap::new();
                        let mut widths = BTreeMap::new();
                        for c in chars {
                            let gid = face.glyph_index(c).map(|g| g.0).unwrap_or(0);
                            gid_map.insert(c, gid);
                            let advance = face
                                .glyph_hor_advance(ttf_parser::GlyphId(gid))
                                .unwrap_or(upem as u16);
                            widths.insert(gid, (advance as f32 * scale).round() as i64);
                        }
                        let bbox = face.global_bounding_box();
                        let ascent = (face.ascender() as f32 * scale).round() as i64;
                        let metrics = FaceMetrics {
                            ascent,
                            descent: (face.descender() as f32 * scale).round() as i64,
                            cap_height: face
                                .capital_height()
                                .map(|h| (h as f32 * scale).round() as i64)
                                .unwrap_or(ascent),
                            bbox: [
                                (bbox.x_min as f32 * scale).round() as i64,
                                (bbox.y_min as f32 * scale).round() as i64,
                                (bbox.x_max as f32 * scale).round() as i64,
                                (bbox.y_max as f32 * scale).round() as i64,
                            ],
                        };
                        FontResourceKind::Embedded {
                            data: data.clone(),
                            postscript_name: postscript_name.clone(),
                            program: *kind,
                            gid_map,
                            widths,
                            metrics,
                        }
                    }
                    Err(e) => {
                        log::warn!("embedded font '{key}' no longer parses ({e}); degrading");
                        FontResourceKind::Builtin { base_font: builtin::BASE_FONT_REGULAR }
                    }
                }
            }
        };
        resources.insert(key, FontResource { res_name, kind });
    }
    resources
}

fn write_font_object(doc: &mut PdfDocument, resource: &FontResource) -> ObjectId {
    match &resource.kind {
        FontResourceKind::Builtin { base_font } => doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => *base_font,
            "Encoding" => "WinAnsiEncoding",
        }),
        FontResourceKind::Embedded {
            data,
            postscript_name,
            program,
            gid_map,
            widths,
            metrics,
        } => {
            let file_stream = match program {
                FontProgramKind::TrueType => Stream::new(
                    dictionary! { "Length1" => data.len() as i64 },
                    data.as_ref().clone(),
                ),
                FontProgramKind::OpenTypeCff => Stream::new(
                    dictionary! { "Subtype" => "OpenType" },
                    data.as_ref().clone(),
                ),
            };
            let file_id = doc.add_object(Object::Stream(file_stream));

            let mut descriptor = dictionary! {
                "Type" => "FontDescriptor",
                "FontName" => Object::Name(postscript_name.clone().into_bytes()),
                "Flags" => 4,
                "FontBBox" => Object::Array(metrics.bbox.iter().map(|v| Object::Integer(*v)).collect()),
                "ItalicAngle" => 0,
                "Ascent" => metrics.ascent,
                "Descent" => metrics.descent,
                "CapHeight" => metrics.cap_height,
                "StemV" => 80,
            };
            let file_key = match program {
                FontProgramKind::TrueType => "FontFile2",
                FontProgramKind::OpenTypeCff => "FontFile3",
            };
            descriptor.set(file_key, Object::Reference(file_id));
            let descriptor_id = doc.add_object(Object::Dictionary(descriptor));

            let mut w_array = Vec::with_capacity(widths.len() * 2);
            for (gid, width) in widths {
                w_array.push(Object::Integer(*gid as i64));
                w_array.push(Object::Array(vec![Object::Integer(*width)]));
            }

            let cid_subtype = match program {
                // Content streams address glyph ids directly, so the CID to
                // glyph mapping is identity for TrueType outlines.
                FontProgramKind::TrueType => "CIDFontType2",
                FontProgramKind::OpenTypeCff => "CIDFontType0",
            };
            let mut cidfont = dictionary! {
                "Type" => "Font",
                "Subtype" => cid_subtype,
                "BaseFont" => Object::Name(postscript_name.clone().into_bytes()),
                "CIDSystemInfo" => dictionary! {
                    "Registry" => Object::string_literal("Adobe"),
                    "Ordering" => Object::string_literal("Identity"),
                    "Supplement" => 0,
                },
                "FontDescriptor" => Object::Reference(descriptor_id),
                "DW" => 1000,
                "W" => Object::Array(w_array),
            };
            if matches!(program, FontProgramKind::TrueType) {
                cidfont.set("CIDToGIDMap", "Identity");
            }
            let cidfont_id = doc.add_object(Object::Dictionary(cidfont));

            let tounicode_id = doc.add_object(Object::Stream(Stream::new(
                Dictionary::new(),
                to_unicode_cmap(gid_map),
            )));

            doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type0",
                "BaseFont" => Object::Name(postscript_name.clone().into_bytes()),
                "Encoding" => "Identity-H",
                "DescendantFonts" => Object::Array(vec![Object::Reference(cidfont_id)]),
                "ToUnicode" => Object::Reference(tounicode_id),
            })
        }
    }
}

/// A bfchar CMap covering exactly the glyphs the document uses.
fn to_unicode_cmap(gid_map: &BTreeMap<char, u16>) -> Vec<u8> {
    let mut by_gid: BTreeMap<u16, char> = BTreeMap::new();
    for (c, gid) in gid_map {
        by_gid.entry(*gid).or_insert(*c);
    }

    let mut out = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let entries: Vec<(u16, char)> = by_gid.into_iter().collect();
    // bfchar blocks hold at most 100 entries
    for chunk in entries.chunks(100) {
        out.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for (gid, c) in chunk {
            let mut units = [0u16; 2];
            let encoded = c.encode_utf16(&mut units);
            let target: String = encoded.iter().map(|u| format!("{u:04X}")).collect();
            out.push_str(&format!("<{gid:04X}> <{target}>\n"));
        }
        out.push_str("endbfchar\n");
    }

    out.push_str(
        "endcmap\n\
         CMapName currentdict /CMap defineresource pop\n\
         end\n\
         end",
    );
    out.into_bytes()
}

fn page_content(page: &Page, fonts: &BTreeMap<String, FontResource>) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Text { x, y, size, color, font, text } => {
                let Some(resource) = fonts.get(font.resource_key()) else { continue };
                out.extend_from_slice(b"BT\n");
                out.extend_from_slice(
                    format!("/{} {:.2} Tf\n", resource.res_name, size).as_bytes(),
                );
                out.extend_from_slice(format!("{} rg\n", rgb(color)).as_bytes());
                out.extend_from_slice(format!("1 0 0 1 {x:.2} {y:.2} Tm\n").as_bytes());
                match &resource.kind {
                    FontResourceKind::Builtin { .. } => {
                        out.push(b'(');
                        out.extend_from_slice(&win_ansi_bytes(text));
                        out.extend_from_slice(b") Tj\n");
                    }
                    FontResourceKind::Embedded { gid_map, .. } => {
                        out.push(b'<');
                        for c in text.chars() {
                            let gid = gid_map.get(&c).copied().unwrap_or(0);
                            out.extend_from_slice(format!("{gid:04X}").as_bytes());
                        }
                        out.extend_from_slice(b"> Tj\n");
                    }
                }
                out.extend_from_slice(b"ET\n");
            }
            DrawOp::FillRect { x, y, width, height, color } => {
                out.extend_from_slice(
                    format!("{} rg\n{x:.2} {y:.2} {width:.2} {height:.2} re f\n", rgb(color))
                        .as_bytes(),
                );
            }
            DrawOp::StrokeLine { x1, y1, x2, y2, width, color } => {
                out.extend_from_slice(
                    format!(
                        "{} RG\n{width:.2} w\n{x1:.2} {y1:.2} m {x2:.2} {y2:.2} l S\n",
                        rgb(color)
                    )
                    .as_bytes(),
                );
            }
            DrawOp::FillCircle { cx, cy, radius, color } => {
                out.extend_from_slice(circle_path(*cx, *cy, *radius, color).as_bytes());
            }
        }
    }
    out
}

fn rgb(color: &Rgb) -> String {
    format!("{:.3} {:.3} {:.3}", color.r, color.g, color.b)
}

/// Four cubic Bezier arcs approximating a filled circle.
fn circle_path(cx: f32, cy: f32, r: f32, color: &Rgb) -> String {
    let k = BEZIER_CIRCLE_K * r;
    let mut s = format!("{} rg\n{:.2} {:.2} m\n", rgb(color), cx + r, cy);
    s.push_str(&format!(
        "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
        cx + r, cy + k, cx + k, cy + r, cx, cy + r
    ));
    s.push_str(&format!(
        "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
        cx - k, cy + r, cx - r, cy + k, cx - r, cy
    ));
    s.push_str(&format!(
        "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
        cx - r, cy - k, cx - k, cy - r, cx, cy - r
    ));
    s.push_str(&format!(
        "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\nf\n",
        cx + k, cy - r, cx + r, cy - k, cx + r, cy
    ));
    s
}

/// Encodes text for a WinAnsi literal string. Codepoints outside the
/// encoding collapse to '?', which is the honest rendering of the degraded
/// font's coverage.
fn win_ansi_bytes(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        let code = c as u32;
        match c {
            '(' | ')' | '\\' => {
                bytes.push(b'\\');
                bytes.push(c as u8);
            }
            _ if (0x20..=0x7E).contains(&code) => bytes.push(c as u8),
            _ if (0xA0..=0xFF).contains(&code) => bytes.push(code as u8),
            _ => bytes.push(b'?'),
        }
    }
    bytes
}

fn info_dict(meta: &DocumentMeta) -> Dictionary {
    dictionary! {
        "Title" => pdf_text_string(&meta.title),
        "Author" => pdf_text_string(&meta.author),
        "Producer" => pdf_text_string(&meta.producer),
        "CreationDate" => Object::string_literal(
            meta.created.format("D:%Y%m%d%H%M%SZ").to_string()
        ),
    }
}

/// PDF text string: plain literal for ASCII, UTF-16BE with BOM otherwise.
fn pdf_text_string(text: &str) -> Object {
    if text.is_ascii() {
        Object::string_literal(text)
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes, StringFormat::Hexadecimal)
    }
}
